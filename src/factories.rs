//! Ready-made reports.
//!
//! Each function returns a fully assembled [`Report`] over built-in sample data.

use crate::format::{HtmlFormatter, PlainTextFormatter};
use crate::model::{Row, Table};
use crate::report::Report;
use crate::sink::{EmailSink, FileSink};
use crate::source::InMemorySource;
use crate::transform::{
    AggregateOp, AggregationTransform, FilterTransform, MultiAggregationTransform, SortTransform,
    Transform,
};
use std::path::Path;

/// Recipient of the sales report.
pub const SALES_RECIPIENT: &str = "sales@company.com";

pub fn finance_data() -> Table {
    [
        ("2024-01-01", 15_000, 8_000),
        ("2024-01-02", 18_000, 8_500),
        ("2024-01-03", 12_000, 7_000),
        ("2024-01-04", 22_000, 9_500),
    ]
    .into_iter()
    .map(|(date, revenue, expenses)| {
        Row::new()
            .with("date", date)
            .with("revenue", revenue)
            .with("expenses", expenses)
    })
    .collect()
}

pub fn sales_data() -> Table {
    [
        ("Laptop", 15, 999.99, "North"),
        ("Phone", 32, 699.99, "South"),
        ("Tablet", 21, 449.99, "North"),
        ("Monitor", 8, 299.99, "East"),
    ]
    .into_iter()
    .map(|(product, units, price, region)| {
        Row::new()
            .with("product", product)
            .with("units", units)
            .with("price", price)
            .with("region", region)
    })
    .collect()
}

/// Daily revenue and expense totals, written as an HTML file under
/// `<reports_dir>/finance`.
pub fn finance_report(reports_dir: &Path) -> Report {
    let transforms: Vec<Box<dyn Transform>> = vec![
        Box::new(SortTransform::ascending("date")),
        Box::new(MultiAggregationTransform::new([
            ("revenue", AggregateOp::Sum),
            ("expenses", AggregateOp::Sum),
        ])),
    ];
    Report::new(
        Box::new(InMemorySource::new(finance_data())),
        transforms,
        Box::new(HtmlFormatter),
        Box::new(FileSink::new(reports_dir.join("finance"))),
    )
}

/// Units sold of premium products (price above 500), mailed as plain text.
pub fn sales_report() -> Report {
    let transforms: Vec<Box<dyn Transform>> = vec![
        Box::new(FilterTransform::field_gt("price", 500.0)),
        Box::new(AggregationTransform::new("units", AggregateOp::Sum)),
    ];
    Report::new(
        Box::new(InMemorySource::new(sales_data())),
        transforms,
        Box::new(PlainTextFormatter),
        Box::new(EmailSink::new(SALES_RECIPIENT)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_finance_report_totals() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let report = finance_report(dir.path());

        let table = report.generate().into_result().expect("finance report runs");
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].get("field"), Some(&CellValue::from("revenue")));
        assert_eq!(table[0].get("value"), Some(&CellValue::Real(67_000.0)));
        assert_eq!(table[1].get("field"), Some(&CellValue::from("expenses")));
        assert_eq!(table[1].get("value"), Some(&CellValue::Real(33_000.0)));
        assert_eq!(table[1].get("count"), Some(&CellValue::Integer(4)));

        let written = std::fs::read_dir(dir.path().join("finance"))
            .expect("finance dir exists")
            .count();
        assert_eq!(written, 1);
    }

    #[test]
    fn test_sales_report_sums_premium_units() {
        let report = sales_report();
        let table = report.generate().into_result().expect("sales report runs");
        assert_eq!(table.len(), 1);
        // Laptop (15) and Phone (32) are above 500.
        assert_eq!(table[0].get("value"), Some(&CellValue::Real(47.0)));
        assert_eq!(table[0].get("count"), Some(&CellValue::Integer(2)));
        assert!(report.describe().contains("Exporter: Email to sales@company.com"));
    }
}
