//! Sinks deliver a formatted report to its destination.
//!
//! A sink reports delivery with a plain `bool`; the report runner turns `false` into an
//! `"Export failed"` result. Details of what went wrong are logged by the sink itself.

pub mod console;
pub mod email;
pub mod file;

pub use console::ConsoleSink;
pub use email::EmailSink;
pub use file::FileSink;

/// Delivers formatted report text.
pub trait Sink {
    /// Returns `true` when the report was delivered.
    fn export(&self, formatted: &str) -> bool;

    fn method_name(&self) -> String;
}
