//! Success/failure envelope passed between pipeline stages.

use super::Table;
use serde::ser::{Serialize, SerializeStruct as _, Serializer};

static EMPTY: Table = Vec::new();

/// Outcome of a pipeline stage: either a table or an error message.
///
/// A failure never carries rows; [`OperationResult::table`] returns an empty table for it.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    Success(Table),
    Failure(String),
}

impl OperationResult {
    pub fn ok(table: Table) -> Self {
        Self::Success(table)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The error message, present only for failures.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(msg) => Some(msg),
        }
    }

    pub fn table(&self) -> &Table {
        match self {
            Self::Success(table) => table,
            Self::Failure(_) => &EMPTY,
        }
    }

    pub fn into_table(self) -> Table {
        match self {
            Self::Success(table) => table,
            Self::Failure(_) => Table::new(),
        }
    }

    pub fn into_result(self) -> Result<Table, String> {
        match self {
            Self::Success(table) => Ok(table),
            Self::Failure(msg) => Err(msg),
        }
    }
}

impl From<Result<Table, String>> for OperationResult {
    fn from(value: Result<Table, String>) -> Self {
        match value {
            Ok(table) => Self::Success(table),
            Err(msg) => Self::Failure(msg),
        }
    }
}

// Serialized as `{ "ok": bool, "error": string|null, "table": [...] }`.
impl Serialize for OperationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OperationResult", 3)?;
        state.serialize_field("ok", &self.is_ok())?;
        state.serialize_field("error", &self.error_message())?;
        state.serialize_field("table", self.table())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;

    #[test]
    fn test_failure_has_message_and_no_rows() {
        let result = OperationResult::error("boom");
        assert!(!result.is_ok());
        assert_eq!(result.error_message(), Some("boom"));
        assert!(result.table().is_empty());
        assert!(result.into_table().is_empty());
    }

    #[test]
    fn test_success_has_no_message() {
        let result = OperationResult::ok(vec![Row::new().with("a", 1)]);
        assert!(result.is_ok());
        assert!(result.error_message().is_none());
        assert_eq!(result.table().len(), 1);
        assert_eq!(result.into_result().map(|t| t.len()), Ok(1));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(OperationResult::error("Export failed"))
            .expect("serialize result");
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "Export failed");
        assert_eq!(json["table"], serde_json::json!([]));
    }
}
