//! Row sorting by the string form of one field.

use super::Transform;
use crate::model::{OperationResult, Row, Table};
use serde::{Deserialize, Serialize};

/// Sort direction for [`SortTransform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Reorders rows by [`CellValue::sort_key`](crate::model::CellValue::sort_key) of a field.
///
/// Comparison is lexicographic on strings even for numeric cells, so `"80"` sorts before
/// `"9"`. A row missing the field is never "less than" any other row and no row is less
/// than it; the sort is stable, so such rows keep their position relative to the rows
/// they are compared with.
#[derive(Debug, Clone)]
pub struct SortTransform {
    field: String,
    order: SortOrder,
}

impl SortTransform {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }

    fn less(&self, a: &Row, b: &Row) -> bool {
        let (Some(va), Some(vb)) = (a.get(&self.field), b.get(&self.field)) else {
            return false;
        };
        let (ka, kb) = (va.sort_key(), vb.sort_key());
        match self.order {
            SortOrder::Asc => ka < kb,
            SortOrder::Desc => ka > kb,
        }
    }
}

impl Transform for SortTransform {
    fn process(&self, table: Table) -> OperationResult {
        OperationResult::ok(merge_sort(table, &|a, b| self.less(a, b)))
    }

    fn description(&self) -> String {
        format!("Sort by {} ({})", self.field, self.order.as_str())
    }
}

/// Stable top-down merge sort driven by a strict "less than" predicate.
///
/// The predicate is allowed to be a partial order; the result is then some stable
/// arrangement, never a panic.
fn merge_sort(mut rows: Vec<Row>, less: &dyn Fn(&Row, &Row) -> bool) -> Vec<Row> {
    if rows.len() <= 1 {
        return rows;
    }
    let right = rows.split_off(rows.len() / 2);
    let left = merge_sort(rows, less);
    let right = merge_sort(right, less);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => less(r, l),
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged
}
