//! Row filtering.

use super::Transform;
use crate::model::{OperationResult, Row, Table};

type Predicate = Box<dyn Fn(&Row) -> bool>;

/// Keeps the rows for which a predicate returns `true`, preserving their order.
///
/// Whether a row missing a referenced field passes is up to the predicate; the
/// helper constructors on this type all reject such rows.
pub struct FilterTransform {
    predicate: Predicate,
    condition: String,
}

impl FilterTransform {
    pub fn new(predicate: impl Fn(&Row) -> bool + 'static, condition: impl Into<String>) -> Self {
        Self {
            predicate: Box::new(predicate),
            condition: condition.into(),
        }
    }

    /// Keep rows whose numeric `field` is strictly greater than `threshold`.
    pub fn field_gt(field: impl Into<String>, threshold: f64) -> Self {
        let field = field.into();
        let condition = format!("{field} > {threshold}");
        Self::new(
            move |row| numeric(row, &field).is_some_and(|v| v > threshold),
            condition,
        )
    }

    /// Keep rows whose numeric `field` is strictly less than `threshold`.
    pub fn field_lt(field: impl Into<String>, threshold: f64) -> Self {
        let field = field.into();
        let condition = format!("{field} < {threshold}");
        Self::new(
            move |row| numeric(row, &field).is_some_and(|v| v < threshold),
            condition,
        )
    }

    /// Keep rows whose `field` equals `expected`.
    ///
    /// When `expected` parses as a number and the cell is numeric, the two are compared
    /// as numbers, so `100.0` matches a cell holding `100`. Otherwise the cell must render
    /// exactly as `expected`.
    pub fn field_eq(field: impl Into<String>, expected: impl Into<String>) -> Self {
        let field = field.into();
        let expected = expected.into();
        let expected_number = expected.trim().parse::<f64>().ok();
        let condition = format!("{field} == {expected}");
        Self::new(
            move |row| {
                row.get(&field).is_some_and(|v| match (v.as_f64(), expected_number) {
                    (Some(actual), Some(wanted)) => actual == wanted,
                    _ => v.to_string() == expected,
                })
            },
            condition,
        )
    }
}

fn numeric(row: &Row, field: &str) -> Option<f64> {
    row.get(field).and_then(|v| v.as_f64())
}

impl Transform for FilterTransform {
    fn process(&self, table: Table) -> OperationResult {
        let filtered: Table = table.into_iter().filter(|row| (self.predicate)(row)).collect();
        OperationResult::ok(filtered)
    }

    fn description(&self) -> String {
        if self.condition.is_empty() {
            "Filter".to_owned()
        } else {
            format!("Filter ({})", self.condition)
        }
    }
}

impl std::fmt::Debug for FilterTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterTransform")
            .field("condition", &self.condition)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn people() -> Table {
        vec![
            Row::new().with("id", 1).with("age", 25).with("active", true),
            Row::new().with("id", 2).with("age", 17).with("active", true),
            Row::new().with("id", 3).with("age", 30).with("active", false),
            Row::new().with("id", 4).with("active", true),
        ]
    }

    fn ids(table: &Table) -> Vec<i64> {
        table
            .iter()
            .filter_map(|r| match r.get("id") {
                Some(CellValue::Integer(i)) => Some(*i),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_keeps_matching_rows_in_order() {
        let filter = FilterTransform::new(
            |row| matches!(row.get("age"), Some(CellValue::Integer(a)) if *a >= 18),
            "age >= 18",
        );
        let result = filter.process(people());
        assert!(result.is_ok());
        assert_eq!(ids(result.table()), vec![1, 3]);
    }

    #[test]
    fn test_missing_field_is_excluded_by_helpers() {
        let result = FilterTransform::field_lt("age", 100.0).process(people());
        assert_eq!(ids(result.table()), vec![1, 2, 3]);
    }

    #[test]
    fn test_predicate_may_accept_missing_field() {
        let filter = FilterTransform::new(|row| !row.contains("age"), "no age");
        assert_eq!(ids(filter.process(people()).table()), vec![4]);
    }

    #[test]
    fn test_empty_result_is_ok() {
        let result = FilterTransform::field_gt("age", 1000.0).process(people());
        assert!(result.is_ok());
        assert!(result.table().is_empty());
    }

    #[test]
    fn test_eq_compares_numbers_by_value() {
        let table = vec![
            Row::new()
                .with("id", 1)
                .with("price", crate::source::csv::infer_cell("100.0")),
            Row::new().with("id", 2).with("price", 100),
            Row::new().with("id", 3).with("price", 100.5),
            Row::new().with("id", 4).with("price", "100.0"),
        ];
        let result = FilterTransform::field_eq("price", "100.0").process(table);
        // Text cells still need an exact match.
        assert_eq!(ids(result.table()), vec![1, 2, 4]);
    }

    #[test]
    fn test_eq_on_text() {
        let table = vec![
            Row::new().with("id", 1).with("region", "North"),
            Row::new().with("id", 2).with("region", "north"),
        ];
        let result = FilterTransform::field_eq("region", "North").process(table);
        assert_eq!(ids(result.table()), vec![1]);
    }

    #[test]
    fn test_result_is_subsequence_and_idempotent() {
        let filter = FilterTransform::field_eq("active", "true");
        let input = people();
        let once = filter.process(input.clone()).into_table();
        assert!(once.len() <= input.len());

        let mut remaining = input.iter();
        for row in &once {
            assert!(
                remaining.any(|r| r == row),
                "filtered rows must appear in input order"
            );
        }

        let twice = filter.process(once.clone()).into_table();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_description() {
        assert_eq!(FilterTransform::new(|_| true, "").description(), "Filter");
        assert_eq!(
            FilterTransform::field_gt("price", 500.0).description(),
            "Filter (price > 500)"
        );
    }
}
