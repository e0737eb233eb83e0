use super::{Formatter, columns_in_order};
use crate::model::Table;

/// GitHub-flavoured Markdown table under a `# Report` heading.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn format(&self, table: &Table) -> String {
        if table.is_empty() {
            return "*No data*".to_owned();
        }
        let columns = columns_in_order(table);

        let mut md = String::from("# Report\n\n");
        for name in &columns {
            md.push_str(&format!("| {} ", cell_text(name)));
        }
        md.push_str("|\n");
        md.push_str(&"| --- ".repeat(columns.len()));
        md.push_str("|\n");

        for row in table {
            for name in &columns {
                let cell = row.get(name).map(ToString::to_string).unwrap_or_default();
                md.push_str(&format!("| {} ", cell_text(&cell)));
            }
            md.push_str("|\n");
        }
        md
    }

    fn format_name(&self) -> String {
        "Markdown".to_owned()
    }
}

// Pipes would split the cell.
fn cell_text(raw: &str) -> String {
    raw.replace('|', "\\|")
}
