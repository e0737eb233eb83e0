//! Formatters that render a table to text.
//!
//! Formatting cannot fail: an empty table renders as a format-specific "No data"
//! placeholder.

pub mod html;
pub mod markdown;
pub mod text;

pub use html::HtmlFormatter;
pub use markdown::MarkdownFormatter;
pub use text::PlainTextFormatter;

use crate::model::Table;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Renders a table to a string.
pub trait Formatter {
    fn format(&self, table: &Table) -> String;

    fn format_name(&self) -> String;
}

/// The built-in output formats, as selected from the CLI or settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Html,
    #[default]
    Markdown,
    Text,
}

impl OutputFormat {
    pub fn formatter(self) -> Box<dyn Formatter> {
        match self {
            Self::Html => Box::new(HtmlFormatter),
            Self::Markdown => Box::new(MarkdownFormatter),
            Self::Text => Box::new(PlainTextFormatter),
        }
    }

    /// File extension for reports written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
            Self::Text => "txt",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            "text" | "txt" | "plain" => Ok(Self::Text),
            other => Err(format!("Unknown output format: {other}")),
        }
    }
}

/// Column names in first-seen order across all rows.
pub(crate) fn columns_in_order(table: &Table) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for row in table {
        for key in row.keys() {
            if !names.contains(&key) {
                names.push(key);
            }
        }
    }
    names
}
