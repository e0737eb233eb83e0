//! # tabreport - tabular report pipelines
//!
//! A report is a linear pipeline: one data source produces a table, an ordered list of
//! transforms reshapes it, a formatter renders it to text, and a sink delivers the text.
//!
//! ## Quick Start
//!
//! ```
//! use tabreport::format::PlainTextFormatter;
//! use tabreport::model::Row;
//! use tabreport::report::ReportBuilder;
//! use tabreport::sink::EmailSink;
//! use tabreport::source::InMemorySource;
//! use tabreport::transform::{AggregateOp, AggregationTransform, FilterTransform};
//!
//! let data = vec![
//!     Row::new().with("product", "Laptop").with("units", 15).with("price", 999.99),
//!     Row::new().with("product", "Monitor").with("units", 8).with("price", 299.99),
//! ];
//!
//! let report = ReportBuilder::new()
//!     .source(InMemorySource::new(data))
//!     .transform(FilterTransform::field_gt("price", 500.0))
//!     .transform(AggregationTransform::new("units", AggregateOp::Sum))
//!     .formatter(PlainTextFormatter)
//!     .sink(EmailSink::new("sales@company.com"))
//!     .build()?;
//!
//! let result = report.generate();
//! assert!(result.is_ok());
//! assert_eq!(result.table()[0].get("value").and_then(|v| v.as_f64()), Some(15.0));
//! # Ok::<(), tabreport::error::ReportError>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`model`]: cell values, rows, tables and the success-or-failure result type
//! - [`source`]: data sources (in-memory, CSV, JSON placeholder)
//! - [`transform`]: filter, sort and aggregation steps
//! - [`format`]: HTML, Markdown and plain-text formatters
//! - [`sink`]: console, file and mocked email delivery
//! - [`report`]: the pipeline runner and its builder
//! - [`factories`]: ready-made finance and sales reports
//! - [`config`], [`logging`], [`error`]: application plumbing

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod factories;
pub mod format;
pub mod logging;
pub mod model;
pub mod report;
pub mod sink;
pub mod source;
pub mod transform;
