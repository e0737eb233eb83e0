use super::DataSource;
use crate::model::{OperationResult, Table};

/// Serves a fixed table. Each fetch hands out a fresh copy.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    data: Table,
}

impl InMemorySource {
    pub fn new(data: Table) -> Self {
        Self { data }
    }
}

impl DataSource for InMemorySource {
    fn fetch(&self) -> OperationResult {
        OperationResult::ok(self.data.clone())
    }

    fn source_info(&self) -> String {
        format!("In-memory data ({} rows)", self.data.len())
    }
}
