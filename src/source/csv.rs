//! Delimited text file source.
//!
//! The first record holds the field names. Every following non-blank record becomes one
//! row; values are typed by a simple rule: text containing `.` is tried as a real,
//! anything else as an integer, and whatever fails to parse stays text. Quoting follows
//! the `csv` crate, so a quoted field may contain the delimiter.

use super::DataSource;
use crate::model::{CellValue, OperationResult, Table};
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// Reads a delimited text file into a table.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    delimiter: char,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_delimiter(path, ',')
    }

    pub fn with_delimiter(path: impl Into<PathBuf>, delimiter: char) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for CsvSource {
    fn fetch(&self) -> OperationResult {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to open CSV");
                return OperationResult::error(format!(
                    "Cannot open file: {}",
                    self.path.display()
                ));
            }
        };

        match parse_delimited(&content, self.delimiter) {
            Ok(table) => {
                tracing::debug!(path = %self.path.display(), rows = table.len(), "Loaded CSV");
                OperationResult::ok(table)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to parse CSV: {e:#}");
                OperationResult::error(format!(
                    "Cannot parse file {}: {e:#}",
                    self.path.display()
                ))
            }
        }
    }

    fn source_info(&self) -> String {
        format!("CSV file: {}", self.path.display())
    }
}

/// Parse delimited text with a header record.
///
/// Records may be shorter than the header (the row gets fewer fields); values beyond the
/// header width are dropped.
///
/// # Errors
///
/// Returns an error if the delimiter is not a single ASCII character or a record cannot
/// be read.
pub fn parse_delimited(content: &str, delimiter: char) -> Result<Table> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter '{delimiter}' is not a single ASCII character"))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        .from_reader(content.as_bytes());
    let headers = reader.headers().context("Failed to read CSV header")?.clone();

    let mut table = Table::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV record {}", index + 1))?;
        // Whitespace-only lines
        if record.len() <= 1 && record.iter().all(|raw| raw.trim().is_empty()) {
            continue;
        }
        table.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(name, raw)| (name, infer_cell(raw)))
                .collect(),
        );
    }
    Ok(table)
}

/// Type a raw field value.
pub fn infer_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.contains('.') {
        if let Ok(real) = trimmed.parse::<f64>() {
            return CellValue::Real(real);
        }
    } else if let Ok(int) = trimmed.parse::<i64>() {
        return CellValue::Integer(int);
    }
    CellValue::Text(raw.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_infer_cell() {
        assert_eq!(infer_cell("15"), CellValue::Integer(15));
        assert_eq!(infer_cell("999.99"), CellValue::Real(999.99));
        assert_eq!(infer_cell("North"), CellValue::from("North"));
        assert_eq!(infer_cell("1.2.3"), CellValue::from("1.2.3"));
        assert_eq!(infer_cell(""), CellValue::from(""));
    }

    #[test]
    fn test_parse_types_and_header() {
        let table = parse_delimited("id,name,value\n1,Item1,10.5\n2,Item2,20.3\n", ',')
            .expect("valid csv");
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].get("id"), Some(&CellValue::Integer(1)));
        assert_eq!(table[0].get("name"), Some(&CellValue::from("Item1")));
        assert_eq!(table[1].get("value"), Some(&CellValue::Real(20.3)));
        let keys: Vec<&str> = table[0].keys().collect();
        assert_eq!(keys, vec!["id", "name", "value"]);
    }

    #[test]
    fn test_short_and_long_lines() {
        let table = parse_delimited("a;b\n1\n   \n1;2;3\n\n", ';').expect("valid csv");
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].len(), 1);
        assert_eq!(table[1].len(), 2);
    }

    #[test]
    fn test_quoted_field_keeps_delimiter() {
        let table = parse_delimited("name,units,price\n\"Smith, John\",15,999.99\n", ',')
            .expect("valid csv");
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].get("name"), Some(&CellValue::from("Smith, John")));
        assert_eq!(table[0].get("units"), Some(&CellValue::Integer(15)));
        assert_eq!(table[0].get("price"), Some(&CellValue::Real(999.99)));
    }

    #[test]
    fn test_header_only_gives_empty_table() {
        let table = parse_delimited("a,b\n", ',').expect("valid csv");
        assert!(table.is_empty());
    }

    #[test]
    fn test_non_ascii_delimiter_is_a_failure() {
        assert!(parse_delimited("a§b\n1§2\n", '§').is_err());

        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        write!(file, "a,b\n1,2\n").expect("write csv");
        let result = CsvSource::with_delimiter(file.path(), '§').fetch();
        assert!(
            result
                .error_message()
                .is_some_and(|m| m.starts_with("Cannot parse file")),
            "{result:?}"
        );
    }

    #[test]
    fn test_fetch_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        write!(file, "product,units,price\r\nLaptop,15,999.99\r\n").expect("write csv");

        let source = CsvSource::new(file.path());
        let result = source.fetch();
        assert!(result.is_ok());
        assert_eq!(result.table().len(), 1);
        assert_eq!(
            result.table()[0].get("price"),
            Some(&CellValue::Real(999.99))
        );
        assert!(source.source_info().starts_with("CSV file: "));
    }

    #[test]
    fn test_missing_file_is_a_failure() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nope.csv");
        let result = CsvSource::new(&path).fetch();
        assert!(!result.is_ok());
        assert!(result.error_message().is_some_and(|m| m.starts_with("Cannot open file:")));
    }
}
