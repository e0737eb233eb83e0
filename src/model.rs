//! Row/cell data model shared by every pipeline stage.
//!
//! A [`Table`] is an ordered list of [`Row`]s; each row maps field names to [`CellValue`]s
//! and rows in one table may carry different field sets. Stages hand tables to each other
//! through an [`OperationResult`], which is also the only failure channel inside a run.
//!
//! ```
//! use tabreport::model::{CellValue, OperationResult, Row, Table};
//!
//! let table: Table = vec![
//!     Row::new().with("product", "Laptop").with("units", 15),
//!     Row::new().with("product", "Phone").with("units", 32),
//! ];
//!
//! let result = OperationResult::ok(table);
//! assert!(result.is_ok());
//! assert_eq!(result.table()[1].get("units"), Some(&CellValue::Integer(32)));
//! ```

pub mod cell;
pub mod result;
pub mod row;

pub use cell::CellValue;
pub use result::OperationResult;
pub use row::Row;

/// An ordered sequence of rows. Order is the iteration, sort and display order.
pub type Table = Vec<Row>;
