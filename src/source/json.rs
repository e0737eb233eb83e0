use super::DataSource;
use crate::model::{OperationResult, Row};

const PREVIEW_CHARS: usize = 30;

/// Placeholder source for JSON payloads.
///
/// The payload is not parsed; the source yields a single `message` row that quotes the
/// start of the content.
#[derive(Debug, Clone)]
pub struct JsonSource {
    content: String,
}

impl JsonSource {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl DataSource for JsonSource {
    fn fetch(&self) -> OperationResult {
        let preview: String = self.content.chars().take(PREVIEW_CHARS).collect();
        let row = Row::new().with("message", format!("JSON data from: {preview}..."));
        OperationResult::ok(vec![row])
    }

    fn source_info(&self) -> String {
        "JSON data provider".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_single_preview_row() {
        let source = JsonSource::new(r#"{"orders": [{"id": 1, "total": 42.0}, {"id": 2}]}"#);
        let result = source.fetch();
        assert_eq!(result.table().len(), 1);
        assert_eq!(
            result.table()[0].get("message"),
            Some(&CellValue::from(r#"JSON data from: {"orders": [{"id": 1, "total":..."#))
        );
    }
}
