//! Table transforms applied between the data source and the formatter.
//!
//! Every transform takes ownership of the table it is given and returns an
//! [`OperationResult`]. Three kinds are built in:
//! - **Filter**: keep rows matching a predicate ([`FilterTransform`])
//! - **Sort**: reorder rows by the string form of a field ([`SortTransform`])
//! - **Aggregate**: reduce the table to summary rows ([`AggregationTransform`],
//!   [`MultiAggregationTransform`])
//!
//! # Example
//!
//! ```
//! use tabreport::model::Row;
//! use tabreport::transform::{AggregateOp, AggregationTransform, SortTransform, Transform as _};
//!
//! let table = vec![
//!     Row::new().with("region", "North").with("units", 15),
//!     Row::new().with("region", "East").with("units", 8),
//! ];
//!
//! let sorted = SortTransform::ascending("region").process(table);
//! let summary = AggregationTransform::new("units", AggregateOp::Sum).process(sorted.into_table());
//! assert_eq!(summary.table().len(), 1);
//! ```

pub mod aggregate;
pub mod filter;
pub mod sort;

pub use aggregate::{AggregateOp, AggregationTransform, MultiAggregationTransform};
pub use filter::FilterTransform;
pub use sort::{SortOrder, SortTransform};

use crate::model::{OperationResult, Table};

/// A pipeline stage turning one table into another.
pub trait Transform {
    /// Apply the transform. Failures are reported through the returned result.
    fn process(&self, table: Table) -> OperationResult;

    /// Human-readable description, used when printing a pipeline.
    fn description(&self) -> String;
}
