use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tabreport::config::ReportSettings;
use tabreport::factories;
use tabreport::format::{MarkdownFormatter, OutputFormat};
use tabreport::model::OperationResult;
use tabreport::report::{Report, ReportBuilder};
use tabreport::sink::{ConsoleSink, EmailSink, FileSink, Sink};
use tabreport::source::CsvSource;
use tabreport::transform::{
    AggregateOp, AggregationTransform, FilterTransform, MultiAggregationTransform, SortOrder,
    SortTransform, Transform,
};

#[derive(Parser)]
#[command(name = "tabreport", about = "Build and export tabular reports")]
pub struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Settings file to use instead of the platform default
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the built-in finance report (HTML file export)
    Finance {
        /// Directory for exported reports. Defaults to the configured reports directory.
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Print the run result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the built-in sales report (plain text, mocked email)
    Sales {
        /// Print the run result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a report over a CSV file
    Csv {
        /// Path to the CSV file
        file: PathBuf,

        /// Field delimiter. Defaults to the configured delimiter.
        #[arg(long)]
        delimiter: Option<char>,

        /// Keep rows matching FIELD>VALUE, FIELD<VALUE or FIELD=VALUE (repeatable)
        #[arg(long = "filter", value_name = "EXPR")]
        filters: Vec<String>,

        /// Sort rows by this field
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long, requires = "sort_by")]
        desc: bool,

        /// Aggregate FIELD:OP where OP is sum, avg or count (repeatable)
        #[arg(long = "aggregate", value_name = "FIELD:OP")]
        aggregates: Vec<String>,

        /// Output format. Defaults to the configured format.
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Where the formatted report goes
        #[arg(long, value_enum, default_value_t = Output::Console)]
        output: Output,

        /// Directory for file output. Defaults to the configured reports directory.
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Recipient for email output. Defaults to the configured recipient.
        #[arg(long)]
        to: Option<String>,

        /// Print the run result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run every built-in report plus a custom pipeline over sample data
    Demo {
        /// Working directory for sample data and exported reports
        #[arg(short, long, default_value = "demo_output")]
        dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Output {
    Console,
    File,
    Email,
}

pub fn run_command(cli: Cli) -> Result<()> {
    let settings = match &cli.settings {
        Some(path) => ReportSettings::load_from(path)?,
        None => ReportSettings::load()?,
    };

    match cli.command {
        Commands::Finance { dir, json } => {
            let dir = dir.unwrap_or_else(|| settings.reports_dir.clone());
            run_report(&factories::finance_report(&dir), json)
        }
        Commands::Sales { json } => run_report(&factories::sales_report(), json),
        Commands::Csv {
            file,
            delimiter,
            filters,
            sort_by,
            desc,
            aggregates,
            format,
            output,
            dir,
            to,
            json,
        } => {
            let format = format.unwrap_or(settings.default_format);
            let sink: Box<dyn Sink> = match output {
                Output::Console => Box::new(ConsoleSink),
                Output::File => Box::new(FileSink::with_extension(
                    dir.unwrap_or_else(|| settings.reports_dir.clone()),
                    format.extension(),
                )),
                Output::Email => Box::new(EmailSink::new(
                    to.unwrap_or_else(|| settings.email_recipient.clone()),
                )),
            };

            let mut builder = ReportBuilder::new().source(CsvSource::with_delimiter(
                file,
                delimiter.unwrap_or(settings.csv_delimiter),
            ));
            for expr in &filters {
                builder = builder.transform(parse_filter(expr)?);
            }
            if let Some(field) = sort_by {
                let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
                builder = builder.transform(SortTransform::new(field, order));
            }
            if let Some(transform) = parse_aggregates(&aggregates)? {
                builder = builder.boxed_transform(transform);
            }

            let report = builder
                .boxed_formatter(format.formatter())
                .boxed_sink(sink)
                .build()?;
            run_report(&report, json)
        }
        Commands::Demo { dir } => run_demo(&dir),
    }
}

fn run_report(report: &Report, json: bool) -> Result<()> {
    tracing::debug!("{}", report.describe());
    let result = report.generate();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize report result")?
        );
    }

    match result {
        OperationResult::Success(table) => {
            if !json {
                println!("Report generated: {} row(s)", table.len());
            }
            Ok(())
        }
        OperationResult::Failure(message) => anyhow::bail!("Report failed: {message}"),
    }
}

/// Parse `FIELD>VALUE`, `FIELD<VALUE` or `FIELD=VALUE`.
fn parse_filter(expr: &str) -> Result<FilterTransform> {
    let (pos, op) = expr
        .char_indices()
        .find(|(_, c)| matches!(c, '>' | '<' | '='))
        .with_context(|| format!("Filter '{expr}' needs one of the operators >, < or ="))?;

    let field = expr[..pos].trim();
    let value = expr[pos + op.len_utf8()..].trim();
    if field.is_empty() || value.is_empty() {
        anyhow::bail!("Filter '{expr}' is missing a field or a value");
    }

    let threshold = || {
        value
            .parse::<f64>()
            .with_context(|| format!("Filter '{expr}' needs a numeric threshold"))
    };

    Ok(match op {
        '>' => FilterTransform::field_gt(field, threshold()?),
        '<' => FilterTransform::field_lt(field, threshold()?),
        _ => FilterTransform::field_eq(field, value),
    })
}

/// One `FIELD:OP` gives a single aggregation, several give a multi aggregation.
fn parse_aggregates(specs: &[String]) -> Result<Option<Box<dyn Transform>>> {
    let mut parsed = Vec::with_capacity(specs.len());
    for spec in specs {
        let (field, op) = spec
            .rsplit_once(':')
            .with_context(|| format!("Aggregate '{spec}' must look like FIELD:OP"))?;
        let op: AggregateOp = op.parse().map_err(anyhow::Error::msg)?;
        parsed.push((field.trim().to_owned(), op));
    }

    Ok(match parsed.len() {
        0 => None,
        1 => parsed
            .pop()
            .map(|(field, op)| Box::new(AggregationTransform::new(field, op)) as Box<dyn Transform>),
        _ => Some(Box::new(MultiAggregationTransform::new(parsed))),
    })
}

const DEMO_SALES_CSV: &str = "\
product,units,price,region
Laptop,15,999.99,North
Phone,32,699.99,South
Tablet,21,449.99,North
Monitor,8,299.99,East
Keyboard,54,49.99,West
";

fn run_demo(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create demo directory: {}", dir.display()))?;
    let csv_path = dir.join("sales.csv");
    std::fs::write(&csv_path, DEMO_SALES_CSV)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;

    println!("=== Finance report ===");
    let finance = factories::finance_report(&dir.join("reports"));
    println!("{}", finance.describe());
    run_report(&finance, false)?;

    println!("\n=== Budget products (custom pipeline) ===");
    let custom = ReportBuilder::new()
        .source(CsvSource::new(&csv_path))
        .transform(FilterTransform::field_lt("price", 500.0))
        .transform(SortTransform::descending("units"))
        .formatter(MarkdownFormatter)
        .sink(ConsoleSink)
        .build()?;
    println!("{}", custom.describe());
    run_report(&custom, false)?;

    println!("\n=== Sales report ===");
    let sales = factories::sales_report();
    println!("{}", sales.describe());
    run_report(&sales, false)
}
