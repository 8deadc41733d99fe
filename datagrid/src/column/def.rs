//! Column declarations.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::{Record, Row, Value};

/// Custom comparator: `(row_a, row_b, column_id) -> Ordering`.
///
/// Panics raised here propagate to the caller of the read that triggered
/// the sort.
pub type SortingFn<T> = Arc<dyn Fn(&Row<'_, T>, &Row<'_, T>, &str) -> Ordering + Send + Sync>;

/// Custom filter predicate: `(row, column_id, filter_value) -> keep`.
///
/// Panics raised here propagate to the caller of the read that triggered
/// the filter.
pub type FilterFn<T> = Arc<dyn Fn(&Row<'_, T>, &str, &Value) -> bool + Send + Sync>;

/// Computed accessor: `row -> value`.
pub type AccessorFn<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// How a column reads its value from a row.
pub enum Accessor<T> {
    /// Look the value up through [`Record::field`].
    Key(String),
    /// Compute the value from the row.
    Fn(AccessorFn<T>),
}

impl<T: Record> Accessor<T> {
    /// Resolve the value for `row`. Missing keys resolve to [`Value::Null`].
    pub fn resolve(&self, row: &T) -> Value {
        match self {
            Accessor::Key(key) => row.field(key).unwrap_or_default(),
            Accessor::Fn(f) => f(row),
        }
    }
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Key(key) => Accessor::Key(key.clone()),
            Accessor::Fn(f) => Accessor::Fn(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Accessor::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// A column declaration.
///
/// # Example
///
/// ```
/// use datagrid::{ColumnDef, Value};
///
/// struct User {
///     first: String,
///     last: String,
/// }
///
/// let full_name = ColumnDef::accessor_fn(|u: &User| Value::from(format!("{} {}", u.first, u.last)))
///     .id("fullName")
///     .header("Full name")
///     .enable_hiding(false);
///
/// assert_eq!(full_name.resolve_id(0), "fullName");
/// ```
pub struct ColumnDef<T> {
    pub(crate) id: Option<String>,
    pub(crate) accessor: Option<Accessor<T>>,
    pub(crate) header: Option<String>,
    pub(crate) footer: Option<String>,
    pub(crate) enable_sorting: bool,
    pub(crate) enable_filtering: bool,
    pub(crate) enable_hiding: bool,
    pub(crate) sorting_fn: Option<SortingFn<T>>,
    pub(crate) filter_fn: Option<FilterFn<T>>,
}

impl<T> ColumnDef<T> {
    fn with_accessor(accessor: Option<Accessor<T>>) -> Self {
        Self {
            id: None,
            accessor,
            header: None,
            footer: None,
            enable_sorting: true,
            enable_filtering: true,
            enable_hiding: true,
            sorting_fn: None,
            filter_fn: None,
        }
    }

    /// Column reading the row field `key`. The key doubles as the id.
    pub fn accessor(key: impl Into<String>) -> Self {
        Self::with_accessor(Some(Accessor::Key(key.into())))
    }

    /// Column computing its value from the row.
    ///
    /// Without an explicit [`id`](Self::id) the column is identified by its
    /// position, `column-<index>`.
    pub fn accessor_fn<F>(f: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        Self::with_accessor(Some(Accessor::Fn(Arc::new(f))))
    }

    /// Column without an accessor (actions, row numbers). Its value is always
    /// [`Value::Null`].
    pub fn display(id: impl Into<String>) -> Self {
        Self::with_accessor(None).id(id)
    }

    /// Set an explicit id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the header label.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Set the footer label.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Allow or forbid sorting by this column.
    pub fn enable_sorting(mut self, enabled: bool) -> Self {
        self.enable_sorting = enabled;
        self
    }

    /// Allow or forbid filtering on this column.
    pub fn enable_filtering(mut self, enabled: bool) -> Self {
        self.enable_filtering = enabled;
        self
    }

    /// Allow or forbid hiding this column through its visibility toggle.
    pub fn enable_hiding(mut self, enabled: bool) -> Self {
        self.enable_hiding = enabled;
        self
    }

    /// Use a custom comparator when sorting by this column.
    pub fn sorting_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Row<'_, T>, &Row<'_, T>, &str) -> Ordering + Send + Sync + 'static,
    {
        self.sorting_fn = Some(Arc::new(f));
        self
    }

    /// Use a custom predicate when filtering this column.
    pub fn filter_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Row<'_, T>, &str, &Value) -> bool + Send + Sync + 'static,
    {
        self.filter_fn = Some(Arc::new(f));
        self
    }

    /// Resolve the column's identity: explicit id, accessor key, or
    /// `column-<index>`.
    pub fn resolve_id(&self, index: usize) -> String {
        if let Some(id) = &self.id {
            return id.clone();
        }
        match &self.accessor {
            Some(Accessor::Key(key)) => key.clone(),
            _ => format!("column-{index}"),
        }
    }

    /// The header label, if set.
    pub fn header_label(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// The footer label, if set.
    pub fn footer_label(&self) -> Option<&str> {
        self.footer.as_deref()
    }
}

impl<T: Record> ColumnDef<T> {
    /// Resolve this column's value for a row.
    pub fn value(&self, row: &T) -> Value {
        self.accessor
            .as_ref()
            .map(|accessor| accessor.resolve(row))
            .unwrap_or_default()
    }
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            accessor: self.accessor.clone(),
            header: self.header.clone(),
            footer: self.footer.clone(),
            enable_sorting: self.enable_sorting,
            enable_filtering: self.enable_filtering,
            enable_hiding: self.enable_hiding,
            sorting_fn: self.sorting_fn.clone(),
            filter_fn: self.filter_fn.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("accessor", &self.accessor)
            .field("header", &self.header)
            .field("enable_sorting", &self.enable_sorting)
            .field("enable_filtering", &self.enable_filtering)
            .field("enable_hiding", &self.enable_hiding)
            .field("sorting_fn", &self.sorting_fn.is_some())
            .field("filter_fn", &self.filter_fn.is_some())
            .finish()
    }
}

/// A column with its resolved id, as held by a table.
pub(crate) struct ResolvedColumn<T> {
    pub id: String,
    pub def: ColumnDef<T>,
}

/// Resolve ids for a set of declarations, rejecting duplicates.
pub(crate) fn resolve_columns<T>(
    defs: Vec<ColumnDef<T>>,
) -> Result<Vec<ResolvedColumn<T>>, crate::TableError> {
    let mut resolved: Vec<ResolvedColumn<T>> = Vec::with_capacity(defs.len());
    for (index, def) in defs.into_iter().enumerate() {
        let id = def.resolve_id(index);
        if let Some(first) = resolved.iter().position(|c| c.id == id) {
            log::warn!("Duplicate column id '{id}' at positions {first} and {index}");
            return Err(crate::TableError::DuplicateColumnId {
                id,
                first,
                second: index,
            });
        }
        resolved.push(ResolvedColumn { id, def });
    }
    log::trace!("Resolved {} columns", resolved.len());
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    type Row = serde_json::Value;

    #[test]
    fn test_id_resolution_order() {
        let explicit: ColumnDef<Row> = ColumnDef::accessor("name").id("who");
        let keyed: ColumnDef<Row> = ColumnDef::accessor("name");
        let computed: ColumnDef<Row> = ColumnDef::accessor_fn(|_| Value::Null);

        assert_eq!(explicit.resolve_id(0), "who");
        assert_eq!(keyed.resolve_id(1), "name");
        assert_eq!(computed.resolve_id(2), "column-2");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let defs: Vec<ColumnDef<Row>> = vec![
            ColumnDef::accessor("name"),
            ColumnDef::accessor("age"),
            ColumnDef::accessor("name"),
        ];
        let err = resolve_columns(defs).err();
        assert_eq!(
            err,
            Some(crate::TableError::DuplicateColumnId {
                id: "name".into(),
                first: 0,
                second: 2,
            })
        );
    }

    #[test]
    fn test_accessor_resolution() {
        let row = serde_json::json!({"name": "Cid"});
        let keyed: ColumnDef<Row> = ColumnDef::accessor("name");
        let missing: ColumnDef<Row> = ColumnDef::accessor("email");
        let shout: ColumnDef<Row> = ColumnDef::accessor_fn(|r: &Row| {
            Value::from(r["name"].as_str().unwrap_or_default().to_uppercase())
        });
        let display: ColumnDef<Row> = ColumnDef::display("actions");

        assert_eq!(keyed.value(&row), Value::from("Cid"));
        assert_eq!(missing.value(&row), Value::Null);
        assert_eq!(shout.value(&row), Value::from("CID"));
        assert_eq!(display.value(&row), Value::Null);
    }
}
