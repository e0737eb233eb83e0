use super::Formatter;
use crate::model::Table;
use std::collections::BTreeMap;

const PADDING: usize = 2;

/// Fixed-width plain-text table.
///
/// Columns are the union of all field names, sorted lexicographically so the layout is
/// deterministic for sparse tables. Each column is as wide as its longest name or value
/// plus two spaces of padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormatter;

impl Formatter for PlainTextFormatter {
    fn format(&self, table: &Table) -> String {
        if table.is_empty() {
            return "No data\n".to_owned();
        }

        let mut widths: BTreeMap<&str, usize> = BTreeMap::new();
        for row in table {
            for (name, value) in row.iter() {
                let width = widths.entry(name).or_insert(0);
                *width = (*width)
                    .max(name.chars().count())
                    .max(value.to_string().chars().count());
            }
        }

        let mut text = String::from("Report\n");
        text.push_str(&"=".repeat(40));
        text.push_str("\n\n");

        for (name, width) in &widths {
            text.push_str(&pad(name, *width));
        }
        text.push('\n');
        let total: usize = widths.values().map(|w| w + PADDING).sum();
        text.push_str(&"-".repeat(total));
        text.push('\n');

        for row in table {
            for (name, width) in &widths {
                let cell = row.get(name).map(ToString::to_string).unwrap_or_default();
                text.push_str(&pad(&cell, *width));
            }
            text.push('\n');
        }
        text
    }

    fn format_name(&self) -> String {
        "Plain Text".to_owned()
    }
}

fn pad(value: &str, width: usize) -> String {
    format!("{value:<w$}", w = width + PADDING)
}
