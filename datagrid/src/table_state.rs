//! Plain data types for the table's state slices.
//!
//! All of them are serde-serializable so callers can persist a
//! [`TableState`] snapshot however they like.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::Value;

/// Sort direction of a sorted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// One sort criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    /// Column id.
    pub id: String,
    /// `true` for descending order.
    pub desc: bool,
}

impl ColumnSort {
    /// Ascending order on a column.
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    /// Descending order on a column.
    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }

    /// The criterion's direction.
    pub fn direction(&self) -> SortDirection {
        if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// Ordered sort criteria; earlier entries take precedence.
pub type SortingState = Vec<ColumnSort>;

/// A filter value applied to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    /// Column id.
    pub id: String,
    /// Value handed to the column's filter function.
    pub value: Value,
}

impl ColumnFilter {
    /// Creates a new column filter.
    pub fn new(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Column filters, at most one per column id.
pub type ColumnFiltersState = Vec<ColumnFilter>;

/// Column id to visibility. Absent ids are visible.
pub type VisibilityState = BTreeMap<String, bool>;

/// Row id to selection. Absent ids are not selected.
pub type RowSelectionState = BTreeMap<String, bool>;

/// Page window over the filtered and sorted rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl PaginationState {
    /// First page with the given size.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(crate::DEFAULT_PAGE_SIZE)
    }
}

/// Snapshot of every state slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableState {
    pub sorting: SortingState,
    pub column_filters: ColumnFiltersState,
    pub global_filter: String,
    pub column_visibility: VisibilityState,
    pub row_selection: RowSelectionState,
    pub pagination: PaginationState,
}

/// Insert, replace or remove (when `value` is blank) the filter for `id`.
pub(crate) fn upsert_filter(
    mut filters: ColumnFiltersState,
    id: &str,
    value: Option<Value>,
) -> ColumnFiltersState {
    let value = value.filter(|v| !v.is_blank());
    match (filters.iter().position(|f| f.id == id), value) {
        (Some(pos), Some(value)) => filters[pos].value = value,
        (Some(pos), None) => {
            filters.remove(pos);
        }
        (None, Some(value)) => filters.push(ColumnFilter::new(id, value)),
        (None, None) => {}
    }
    filters
}

/// Keep the last filter for each column id, in first-seen order.
pub(crate) fn dedup_filters(filters: ColumnFiltersState) -> ColumnFiltersState {
    let mut out: ColumnFiltersState = Vec::with_capacity(filters.len());
    for filter in filters {
        match out.iter_mut().find(|f| f.id == filter.id) {
            Some(existing) => existing.value = filter.value,
            None => out.push(filter),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_filter() {
        let filters = upsert_filter(Vec::new(), "name", Some("a".into()));
        assert_eq!(filters, vec![ColumnFilter::new("name", "a")]);

        let filters = upsert_filter(filters, "name", Some("b".into()));
        assert_eq!(filters, vec![ColumnFilter::new("name", "b")]);

        let filters = upsert_filter(filters, "name", Some("".into()));
        assert!(filters.is_empty());
    }

    #[test]
    fn test_dedup_filters_keeps_last_value() {
        let filters = dedup_filters(vec![
            ColumnFilter::new("a", 1),
            ColumnFilter::new("b", 2),
            ColumnFilter::new("a", 3),
        ]);
        assert_eq!(
            filters,
            vec![ColumnFilter::new("a", 3), ColumnFilter::new("b", 2)]
        );
    }

    #[test]
    fn test_state_json_shape() {
        let state = TableState {
            sorting: vec![ColumnSort::desc("name")],
            ..TableState::default()
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["sorting"][0]["desc"], serde_json::json!(true));
        assert_eq!(json["pagination"]["pageSize"], serde_json::json!(10));

        let back: TableState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
