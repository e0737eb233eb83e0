use super::{Formatter, columns_in_order};
use crate::model::Table;

const STYLE: &str = "    table { border-collapse: collapse; width: 100%; }
    th, td { border: 1px solid #ddd; padding: 8px; }
    th { background-color: #f2f2f2; }
    tr:nth-child(even) { background-color: #f9f9f9; }
";

/// Standalone HTML document with a styled table.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter;

impl Formatter for HtmlFormatter {
    fn format(&self, table: &Table) -> String {
        if table.is_empty() {
            return "<p>No data</p>".to_owned();
        }
        let columns = columns_in_order(table);

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <style>\n");
        html.push_str(STYLE);
        html.push_str("  </style>\n</head>\n<body>\n");
        html.push_str("  <h2>Report</h2>\n");
        html.push_str("  <table>\n    <tr>\n");
        for name in &columns {
            html.push_str(&format!("      <th>{}</th>\n", escape(name)));
        }
        html.push_str("    </tr>\n");

        for row in table {
            html.push_str("    <tr>\n");
            for name in &columns {
                let cell = row.get(name).map(ToString::to_string).unwrap_or_default();
                html.push_str(&format!("      <td>{}</td>\n", escape(&cell)));
            }
            html.push_str("    </tr>\n");
        }

        html.push_str("  </table>\n</body>\n</html>");
        html
    }

    fn format_name(&self) -> String {
        "HTML".to_owned()
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
