use super::Sink;

/// Prints the report to standard output between banner lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// The exact text written to stdout for a report.
    pub fn framed(formatted: &str) -> String {
        format!("\n=== REPORT OUTPUT ===\n{formatted}\n=== END REPORT ===\n")
    }
}

impl Sink for ConsoleSink {
    #[expect(clippy::print_stdout)]
    fn export(&self, formatted: &str) -> bool {
        println!("{}", Self::framed(formatted));
        true
    }

    fn method_name(&self) -> String {
        "Console output".to_owned()
    }
}
