//! Error types for report assembly and the application edges.
//!
//! Failures that happen *during* a report run (a source that cannot be read, an
//! aggregation over a field without numbers, a sink that refuses the output) travel
//! through [`OperationResult`](crate::model::OperationResult). This type covers what
//! happens around a run (incomplete report assembly, settings and report file I/O) and
//! is what [`Report::try_generate`](crate::report::Report::try_generate) maps a failed
//! run onto for callers that prefer `?`.
//!
//! ```
//! use tabreport::error::ReportError;
//!
//! fn describe(err: &ReportError) -> &'static str {
//!     match err {
//!         ReportError::Config(_) => "fix the report definition",
//!         ReportError::Io(_) => "check the filesystem",
//!         _ => "see the message",
//!     }
//! }
//!
//! let err = ReportError::Config("missing sink".to_owned());
//! assert_eq!(describe(&err), "fix the report definition");
//! assert_eq!(err.to_string(), "Configuration error: missing sink");
//! ```

use std::fmt;

/// Main error type for tabreport operations.
#[derive(Debug)]
pub enum ReportError {
    /// I/O errors (settings files, report files)
    Io(std::io::Error),

    /// Incomplete or invalid report configuration
    Config(String),

    /// A data source could not produce a table
    Source(String),

    /// A transform rejected its input (for example an aggregation without numeric data)
    Transform(String),

    /// A formatted report could not be delivered
    Export(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Source(msg) => write!(f, "Source error: {msg}"),
            Self::Transform(msg) => write!(f, "Transform error: {msg}"),
            Self::Export(msg) => write!(f, "Export error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(_)
            | Self::Source(_)
            | Self::Transform(_)
            | Self::Export(_)
            | Self::Other(_) => None,
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

/// Result type alias for tabreport operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped with `msg` as a prefix.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped with the closure's message as a prefix.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ReportError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: ReportError = e.into();
            ReportError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: ReportError = e.into();
            ReportError::Other(format!("{}: {}", f(), err))
        })
    }
}
