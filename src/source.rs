//! Data sources that produce the initial table of a report.
//!
//! A source never panics or returns a Rust error: an unreachable or malformed source is
//! reported as an [`OperationResult::Failure`](crate::model::OperationResult::Failure).

pub mod csv;
pub mod json;
pub mod memory;

pub use csv::CsvSource;
pub use json::JsonSource;
pub use memory::InMemorySource;

use crate::model::OperationResult;

/// Produces the table a report starts from.
pub trait DataSource {
    fn fetch(&self) -> OperationResult;

    /// Diagnostic description of where the data comes from.
    fn source_info(&self) -> String;
}
