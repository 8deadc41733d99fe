//! Built-in column filter functions.
//!
//! Each function has the [`FilterFn`](crate::FilterFn) signature and can be
//! passed straight to [`ColumnDef::filter_fn`](crate::ColumnDef::filter_fn):
//!
//! ```
//! use datagrid::{filter_fns, ColumnDef};
//!
//! let status: ColumnDef<serde_json::Value> =
//!     ColumnDef::accessor("status").filter_fn(filter_fns::equals_string);
//! ```
//!
//! Columns without a filter function use [`includes_string`].

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::{Record, Row, Value};

/// Case-insensitive substring test of the stringified values.
pub fn contains_ignore_case(value: &Value, filter: &Value) -> bool {
    value
        .to_string()
        .to_lowercase()
        .contains(&filter.to_string().to_lowercase())
}

/// Keep rows whose value contains the filter text, ignoring case.
pub fn includes_string<T: Record>(row: &Row<'_, T>, column_id: &str, filter: &Value) -> bool {
    row.value(column_id)
        .is_some_and(|value| contains_ignore_case(&value, filter))
}

/// Keep rows whose stringified value equals the filter text, ignoring case.
pub fn equals_string<T: Record>(row: &Row<'_, T>, column_id: &str, filter: &Value) -> bool {
    row.value(column_id)
        .is_some_and(|value| value.to_string().to_lowercase() == filter.to_string().to_lowercase())
}

/// Keep rows whose value is exactly the filter value.
///
/// Integers and floats holding the same number are equal.
pub fn equals<T: Record>(row: &Row<'_, T>, column_id: &str, filter: &Value) -> bool {
    row.value(column_id)
        .is_some_and(|value| value.compare(filter).is_eq())
}

/// Keep rows whose value fuzzy-matches the filter text.
///
/// Uses nucleo's fuzzy matcher with case-insensitive matching, so `"bb"`
/// matches `"Bob Builder"`. An empty filter keeps every row.
pub fn fuzzy<T: Record>(row: &Row<'_, T>, column_id: &str, filter: &Value) -> bool {
    let query = filter.to_string();
    if query.is_empty() {
        return true;
    }
    let Some(value) = row.value(column_id) else {
        return false;
    };
    fuzzy_score(&query, &value.to_string()).is_some()
}

/// Score `haystack` against `query`, or `None` when it does not match.
pub fn fuzzy_score(query: &str, haystack: &str) -> Option<u32> {
    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );
    let mut buf = Vec::new();
    pattern.score(Utf32Str::new(haystack, &mut buf), &mut matcher)
}
