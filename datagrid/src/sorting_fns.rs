//! Built-in column sorting functions.
//!
//! Each function has the [`SortingFn`](crate::SortingFn) signature:
//!
//! ```
//! use datagrid::{sorting_fns, ColumnDef};
//!
//! let version: ColumnDef<serde_json::Value> =
//!     ColumnDef::accessor("version").sorting_fn(sorting_fns::alphanumeric);
//! ```
//!
//! Columns without a sorting function use [`basic`].

use std::cmp::Ordering;

use crate::{Record, Row, Value};

fn values<T: Record>(a: &Row<'_, T>, b: &Row<'_, T>, column_id: &str) -> (Value, Value) {
    (
        a.value(column_id).unwrap_or_default(),
        b.value(column_id).unwrap_or_default(),
    )
}

/// Natural ordering of the resolved values ([`Value::compare`]).
pub fn basic<T: Record>(a: &Row<'_, T>, b: &Row<'_, T>, column_id: &str) -> Ordering {
    let (a, b) = values(a, b, column_id);
    a.compare(&b)
}

/// Case-insensitive ordering of the stringified values.
pub fn text<T: Record>(a: &Row<'_, T>, b: &Row<'_, T>, column_id: &str) -> Ordering {
    let (a, b) = values(a, b, column_id);
    a.to_string()
        .to_lowercase()
        .cmp(&b.to_string().to_lowercase())
}

/// Numbers first, in numeric order, then everything else as text.
///
/// Values that are numbers, or strings that parse as numbers, compare
/// numerically; `"10"` sorts after `"9"`.
pub fn alphanumeric<T: Record>(a: &Row<'_, T>, b: &Row<'_, T>, column_id: &str) -> Ordering {
    let (a, b) = values(a, b, column_id);
    compare_alphanumeric(&a, &b)
}

/// The comparison behind [`alphanumeric`], on plain values.
pub fn compare_alphanumeric(a: &Value, b: &Value) -> Ordering {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_string().cmp(&b.to_string()),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Int(_) | Value::Float(_) => value.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
