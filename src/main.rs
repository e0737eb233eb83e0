//! # tabreport command-line entry point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Initialize logging (console + daily log file)
//!   └─> Run the selected command
//! ```
//!
//! ```bash
//! tabreport finance --dir reports
//! tabreport csv sales.csv --filter "price>500" --aggregate units:sum --format text
//! tabreport demo
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout, clippy::print_stderr)] // Allow println! in main binary

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // A missing log directory should not stop a report from running.
    if let Err(e) = tabreport::logging::init(&cli.log_level) {
        eprintln!("Warning: failed to initialize logging: {e:#}");
    }

    cli::run_command(cli)
}
