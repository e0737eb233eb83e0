//! Aggregations that reduce a table to summary rows.
//!
//! A summary row has the shape `{field, operation, value, count}` for `sum`/`avg` and
//! `{field, operation, value}` for `count`. The single-field [`AggregationTransform`]
//! fails when a `sum`/`avg` field has no numeric cells; [`MultiAggregationTransform`]
//! skips such fields and keeps going.

use super::Transform;
use crate::model::{OperationResult, Row, Table};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Sum,
    Avg,
    Count,
}

impl AggregateOp {
    /// Name used in the `operation` field of a summary row.
    pub fn output_name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Avg => "average",
            Self::Count => "count",
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum => write!(f, "sum"),
            Self::Avg => write!(f, "avg"),
            Self::Count => write!(f, "count"),
        }
    }
}

impl FromStr for AggregateOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "avg" | "average" | "mean" => Ok(Self::Avg),
            "count" => Ok(Self::Count),
            other => Err(format!("Unknown aggregation operation: {other}")),
        }
    }
}

/// Running total over the numeric cells of one field.
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    total: f64,
    count: usize,
}

impl Accumulator {
    fn scan(table: &Table, field: &str) -> Self {
        table
            .iter()
            .filter_map(|row| row.get(field).and_then(|v| v.as_f64()))
            .fold(Self::default(), |acc, v| Self {
                total: acc.total + v,
                count: acc.count + 1,
            })
    }
}

/// Build the summary row for one `(field, op)` pair, or `None` when a `sum`/`avg`
/// field has no numeric cells.
fn summarize(table: &Table, field: &str, op: AggregateOp) -> Option<Row> {
    let row = Row::new()
        .with("field", field)
        .with("operation", op.output_name());

    match op {
        AggregateOp::Count => Some(row.with("value", table.len())),
        AggregateOp::Sum | AggregateOp::Avg => {
            let acc = Accumulator::scan(table, field);
            if acc.count == 0 {
                return None;
            }
            let value = if op == AggregateOp::Sum {
                acc.total
            } else {
                acc.total / acc.count as f64
            };
            Some(row.with("value", value).with("count", acc.count))
        }
    }
}

/// Replaces the table with a single summary row for one field.
#[derive(Debug, Clone)]
pub struct AggregationTransform {
    field: String,
    op: AggregateOp,
}

impl AggregationTransform {
    pub fn new(field: impl Into<String>, op: AggregateOp) -> Self {
        Self {
            field: field.into(),
            op,
        }
    }
}

impl Transform for AggregationTransform {
    fn process(&self, table: Table) -> OperationResult {
        if table.is_empty() {
            return OperationResult::ok(table);
        }
        match summarize(&table, &self.field, self.op) {
            Some(row) => OperationResult::ok(vec![row]),
            None => {
                tracing::warn!(field = %self.field, op = %self.op, "No numeric data to aggregate");
                OperationResult::error(format!(
                    "Field '{}' not found in data for aggregation",
                    self.field
                ))
            }
        }
    }

    fn description(&self) -> String {
        format!("{} of {}", self.op, self.field)
    }
}

/// Produces one summary row per `(field, op)` pair, in pair order.
#[derive(Debug, Clone)]
pub struct MultiAggregationTransform {
    aggregations: Vec<(String, AggregateOp)>,
}

impl MultiAggregationTransform {
    pub fn new<I, S>(aggregations: I) -> Self
    where
        I: IntoIterator<Item = (S, AggregateOp)>,
        S: Into<String>,
    {
        Self {
            aggregations: aggregations
                .into_iter()
                .map(|(field, op)| (field.into(), op))
                .collect(),
        }
    }
}

impl Transform for MultiAggregationTransform {
    fn process(&self, table: Table) -> OperationResult {
        if table.is_empty() {
            return OperationResult::ok(table);
        }
        let summary = self
            .aggregations
            .iter()
            .filter_map(|(field, op)| {
                let row = summarize(&table, field, *op);
                if row.is_none() {
                    tracing::debug!(field = %field, op = %op, "Skipping field without numeric data");
                }
                row
            })
            .collect();
        OperationResult::ok(summary)
    }

    fn description(&self) -> String {
        let mut desc = "Multi Aggregation:".to_owned();
        for (field, op) in &self.aggregations {
            desc.push_str(&format!(" {field}({op})"));
        }
        desc
    }
}
