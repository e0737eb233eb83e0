//! Report runner and its builder.
//!
//! A [`Report`] owns one data source, an ordered list of transforms, one formatter and
//! one sink, and runs them strictly in that order:
//!
//! ```text
//! source.fetch() ──fail──> return failure
//!   │
//!   ├─> transform[0].process() ──fail──> return failure (later stages never run)
//!   ├─> ...
//!   │
//!   ├─> formatter.format()           (cannot fail)
//!   └─> sink.export() ──false──> return "Export failed" (table discarded)
//!         │
//!         └─> return the final table
//! ```
//!
//! # Example
//!
//! ```
//! use tabreport::format::MarkdownFormatter;
//! use tabreport::model::Row;
//! use tabreport::report::ReportBuilder;
//! use tabreport::sink::EmailSink;
//! use tabreport::source::InMemorySource;
//! use tabreport::transform::SortTransform;
//!
//! let report = ReportBuilder::new()
//!     .source(InMemorySource::new(vec![
//!         Row::new().with("name", "b"),
//!         Row::new().with("name", "a"),
//!     ]))
//!     .transform(SortTransform::ascending("name"))
//!     .formatter(MarkdownFormatter)
//!     .sink(EmailSink::new("team@example.com"))
//!     .build()?;
//!
//! let result = report.generate();
//! assert!(result.is_ok());
//! # Ok::<(), tabreport::error::ReportError>(())
//! ```

use crate::error::{ReportError, Result};
use crate::format::Formatter;
use crate::model::{OperationResult, Table};
use crate::sink::Sink;
use crate::source::DataSource;
use crate::transform::Transform;
use std::fmt;

/// Message returned when the sink refuses the formatted report.
pub const EXPORT_FAILED: &str = "Export failed";

/// Which stage of a run failed, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StageFailure {
    Source(String),
    Transform { index: usize, message: String },
    Export,
}

impl StageFailure {
    fn message(&self) -> &str {
        match self {
            Self::Source(message) | Self::Transform { message, .. } => message,
            Self::Export => EXPORT_FAILED,
        }
    }
}

/// A fully assembled, immutable report pipeline.
pub struct Report {
    source: Box<dyn DataSource>,
    transforms: Vec<Box<dyn Transform>>,
    formatter: Box<dyn Formatter>,
    sink: Box<dyn Sink>,
}

impl Report {
    /// Assemble a report from its parts. Use [`ReportBuilder`] to assemble one step at
    /// a time with validation.
    pub fn new(
        source: Box<dyn DataSource>,
        transforms: Vec<Box<dyn Transform>>,
        formatter: Box<dyn Formatter>,
        sink: Box<dyn Sink>,
    ) -> Self {
        Self {
            source,
            transforms,
            formatter,
            sink,
        }
    }

    /// Run the pipeline once.
    ///
    /// On success the result carries the post-transform table. On failure it carries
    /// the message of the first failing stage and no rows.
    pub fn generate(&self) -> OperationResult {
        match self.run() {
            Ok(table) => OperationResult::ok(table),
            Err(failure) => OperationResult::error(failure.message()),
        }
    }

    /// Run the pipeline once, mapping a failed run onto [`ReportError`].
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Source`], [`ReportError::Transform`] or
    /// [`ReportError::Export`] depending on the stage that failed.
    pub fn try_generate(&self) -> Result<Table> {
        self.run().map_err(|failure| match failure {
            StageFailure::Source(message) => ReportError::Source(message),
            StageFailure::Transform { index, message } => ReportError::Transform(format!(
                "step {} ({}): {message}",
                index + 1,
                self.transforms
                    .get(index)
                    .map(|t| t.description())
                    .unwrap_or_default()
            )),
            StageFailure::Export => ReportError::Export(format!(
                "{EXPORT_FAILED} via {}",
                self.sink.method_name()
            )),
        })
    }

    fn run(&self) -> std::result::Result<Table, StageFailure> {
        let start = std::time::Instant::now();
        tracing::debug!(source = %self.source.source_info(), "Fetching data");

        let mut table = self
            .source
            .fetch()
            .into_result()
            .map_err(|message| {
                tracing::warn!(source = %self.source.source_info(), "Source failed: {message}");
                StageFailure::Source(message)
            })?;
        tracing::debug!(rows = table.len(), "Fetched data");

        for (index, transform) in self.transforms.iter().enumerate() {
            let rows_before = table.len();
            table = transform.process(table).into_result().map_err(|message| {
                tracing::warn!(
                    step = index + 1,
                    transform = %transform.description(),
                    "Transform failed: {message}"
                );
                StageFailure::Transform { index, message }
            })?;
            tracing::debug!(
                step = index + 1,
                transform = %transform.description(),
                rows_before,
                rows_after = table.len(),
                "Applied transform"
            );
        }

        let formatted = self.formatter.format(&table);
        tracing::debug!(
            format = %self.formatter.format_name(),
            chars = formatted.len(),
            "Formatted report"
        );

        if !self.sink.export(&formatted) {
            tracing::warn!(exporter = %self.sink.method_name(), "{EXPORT_FAILED}");
            return Err(StageFailure::Export);
        }

        tracing::info!(
            rows = table.len(),
            exporter = %self.sink.method_name(),
            "Report generated in {:.3}s",
            start.elapsed().as_secs_f64()
        );
        Ok(table)
    }

    /// Multi-line description of every stage, in run order.
    pub fn describe(&self) -> String {
        let mut out = String::from("Report Pipeline:\n");
        out.push_str(&format!("  Source: {}\n", self.source.source_info()));
        for transform in &self.transforms {
            out.push_str(&format!("  Transform: {}\n", transform.description()));
        }
        out.push_str(&format!("  Formatter: {}\n", self.formatter.format_name()));
        out.push_str(&format!("  Exporter: {}\n", self.sink.method_name()));
        out
    }

    pub fn transform_count(&self) -> usize {
        self.transforms.len()
    }
}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Report")
            .field("source", &self.source.source_info())
            .field(
                "transforms",
                &self
                    .transforms
                    .iter()
                    .map(|t| t.description())
                    .collect::<Vec<_>>(),
            )
            .field("formatter", &self.formatter.format_name())
            .field("sink", &self.sink.method_name())
            .finish()
    }
}

/// Step-by-step assembly of a [`Report`].
///
/// Source, formatter and sink are required; transforms are optional. Missing parts are
/// reported by [`ReportBuilder::build`], never at run time.
#[derive(Default)]
pub struct ReportBuilder {
    source: Option<Box<dyn DataSource>>,
    transforms: Vec<Box<dyn Transform>>,
    formatter: Option<Box<dyn Formatter>>,
    sink: Option<Box<dyn Sink>>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn source(mut self, source: impl DataSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Append a transform; transforms run in the order they were added.
    #[must_use]
    pub fn transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    #[must_use]
    pub fn boxed_transform(mut self, transform: Box<dyn Transform>) -> Self {
        self.transforms.push(transform);
        self
    }

    #[must_use]
    pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    #[must_use]
    pub fn boxed_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use]
    pub fn boxed_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate and produce the report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Config`] naming every missing part when the source,
    /// formatter or sink has not been set.
    pub fn build(self) -> Result<Report> {
        let mut missing = Vec::new();
        if self.source.is_none() {
            missing.push("data source");
        }
        if self.formatter.is_none() {
            missing.push("formatter");
        }
        if self.sink.is_none() {
            missing.push("sink");
        }

        match (self.source, self.formatter, self.sink) {
            (Some(source), Some(formatter), Some(sink)) => {
                Ok(Report::new(source, self.transforms, formatter, sink))
            }
            _ => Err(ReportError::Config(format!(
                "Incomplete report configuration: missing {}",
                missing.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;
    use crate::source::InMemorySource;
    use crate::transform::{AggregateOp, AggregationTransform, FilterTransform};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct Calls {
        transform: Cell<usize>,
        format: Cell<usize>,
        export: Cell<usize>,
        exported: RefCell<Vec<String>>,
    }

    struct FailingSource;

    impl DataSource for FailingSource {
        fn fetch(&self) -> OperationResult {
            OperationResult::error("Cannot open file: missing.csv")
        }

        fn source_info(&self) -> String {
            "failing".to_owned()
        }
    }

    struct CountingTransform {
        calls: Rc<Calls>,
        fail: bool,
    }

    impl Transform for CountingTransform {
        fn process(&self, table: Table) -> OperationResult {
            self.calls.transform.set(self.calls.transform.get() + 1);
            if self.fail {
                OperationResult::error("transform refused input")
            } else {
                OperationResult::ok(table)
            }
        }

        fn description(&self) -> String {
            "counting".to_owned()
        }
    }

    struct CountingFormatter(Rc<Calls>);

    impl Formatter for CountingFormatter {
        fn format(&self, table: &Table) -> String {
            self.0.format.set(self.0.format.get() + 1);
            format!("{} rows", table.len())
        }

        fn format_name(&self) -> String {
            "counting".to_owned()
        }
    }

    struct RecordingSink {
        calls: Rc<Calls>,
        accept: bool,
    }

    impl Sink for RecordingSink {
        fn export(&self, formatted: &str) -> bool {
            self.calls.export.set(self.calls.export.get() + 1);
            self.calls.exported.borrow_mut().push(formatted.to_owned());
            self.accept
        }

        fn method_name(&self) -> String {
            "recording".to_owned()
        }
    }

    fn rows() -> Table {
        vec![
            Row::new().with("price", 999.99).with("units", 15),
            Row::new().with("price", 299.99).with("units", 8),
        ]
    }

    fn builder(calls: &Rc<Calls>, accept: bool) -> ReportBuilder {
        ReportBuilder::new()
            .source(InMemorySource::new(rows()))
            .formatter(CountingFormatter(Rc::clone(calls)))
            .sink(RecordingSink {
                calls: Rc::clone(calls),
                accept,
            })
    }

    #[test]
    fn test_full_run_returns_final_table() {
        let calls = Rc::new(Calls::default());
        let report = builder(&calls, true)
            .transform(FilterTransform::field_gt("price", 500.0))
            .build()
            .expect("complete report");

        let result = report.generate();
        assert!(result.is_ok());
        assert_eq!(result.table().len(), 1);
        assert_eq!(calls.format.get(), 1);
        assert_eq!(calls.exported.borrow().as_slice(), ["1 rows"]);
    }

    #[test]
    fn test_failing_transform_short_circuits() {
        let calls = Rc::new(Calls::default());
        let report = builder(&calls, true)
            .transform(CountingTransform {
                calls: Rc::clone(&calls),
                fail: true,
            })
            .transform(CountingTransform {
                calls: Rc::clone(&calls),
                fail: false,
            })
            .build()
            .expect("complete report");

        let result = report.generate();
        assert_eq!(result.error_message(), Some("transform refused input"));
        assert_eq!(calls.transform.get(), 1, "second transform must not run");
        assert_eq!(calls.format.get(), 0, "formatter must not run");
        assert_eq!(calls.export.get(), 0, "sink must not run");
    }

    #[test]
    fn test_source_failure_is_returned_as_is() {
        let calls = Rc::new(Calls::default());
        let report = builder(&calls, true)
            .source(FailingSource)
            .transform(CountingTransform {
                calls: Rc::clone(&calls),
                fail: false,
            })
            .build()
            .expect("complete report");

        let result = report.generate();
        assert_eq!(
            result.error_message(),
            Some("Cannot open file: missing.csv")
        );
        assert_eq!(calls.transform.get(), 0);
        assert_eq!(calls.export.get(), 0);
        assert!(matches!(report.try_generate(), Err(ReportError::Source(_))));
    }

    #[test]
    fn test_export_failure_discards_table() {
        let calls = Rc::new(Calls::default());
        let report = builder(&calls, false).build().expect("complete report");

        let result = report.generate();
        assert!(!result.is_ok());
        assert_eq!(result.error_message(), Some(EXPORT_FAILED));
        assert!(result.table().is_empty());
        assert_eq!(calls.export.get(), 1);

        let err = report.try_generate().expect_err("export must fail");
        assert_eq!(err.to_string(), "Export error: Export failed via recording");
    }

    #[test]
    fn test_aggregation_failure_maps_to_transform_error() {
        let calls = Rc::new(Calls::default());
        let report = builder(&calls, true)
            .transform(AggregationTransform::new("revenue", AggregateOp::Avg))
            .build()
            .expect("complete report");

        let err = report.try_generate().expect_err("aggregation must fail");
        let ReportError::Transform(msg) = err else {
            panic!("expected a transform error, got {err:?}");
        };
        assert!(msg.starts_with("step 1 (avg of revenue):"), "{msg}");
        assert!(msg.contains("not found"), "{msg}");
    }

    #[test]
    fn test_build_reports_missing_parts() {
        let err = ReportBuilder::new()
            .formatter(crate::format::MarkdownFormatter)
            .build()
            .expect_err("incomplete report");
        assert_eq!(
            err.to_string(),
            "Configuration error: Incomplete report configuration: missing data source, sink"
        );
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_empty_transform_list_is_valid() {
        let calls = Rc::new(Calls::default());
        let report = builder(&calls, true).build().expect("complete report");
        assert_eq!(report.transform_count(), 0);
        assert_eq!(report.generate().table().len(), 2);
    }

    #[test]
    fn test_describe_lists_stages_in_order() {
        let calls = Rc::new(Calls::default());
        let report = builder(&calls, true)
            .transform(FilterTransform::field_gt("price", 500.0))
            .transform(AggregationTransform::new("units", AggregateOp::Sum))
            .build()
            .expect("complete report");

        assert_eq!(
            report.describe(),
            "Report Pipeline:\n  Source: In-memory data (2 rows)\n  Transform: Filter (price > 500)\n  Transform: sum of units\n  Formatter: counting\n  Exporter: recording\n"
        );
    }
}
