use std::fmt;

use crate::table_state::upsert_filter;
use crate::{ColumnDef, ColumnSort, DataTable, SortDirection, Value};

/// A declared column, as seen through a table.
///
/// Column views are cheap handles; all state they read or write lives in the
/// table's slices, keyed by [`id`](Self::id).
pub struct Column<'t, T> {
    table: &'t DataTable<T>,
    position: usize,
}

impl<'t, T> Column<'t, T> {
    pub(crate) fn new(table: &'t DataTable<T>, position: usize) -> Self {
        Self { table, position }
    }

    /// The resolved column id.
    pub fn id(&self) -> &'t str {
        &self.table.resolved_columns()[self.position].id
    }

    /// The column declaration.
    pub fn def(&self) -> &'t ColumnDef<T> {
        &self.table.resolved_columns()[self.position].def
    }

    /// Position in declaration order.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Header label, falling back to the id.
    pub fn header(&self) -> &'t str {
        self.def().header_label().unwrap_or(self.id())
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Returns `true` if sorting is enabled for the table and this column.
    pub fn can_sort(&self) -> bool {
        self.table.features().sorting && self.def().enable_sorting
    }

    /// Current sort direction, or `None` when the column is not sorted.
    pub fn is_sorted(&self) -> Option<SortDirection> {
        let id = self.id();
        self.table
            .sorting_slice()
            .get()
            .iter()
            .find(|s| s.id == id)
            .map(ColumnSort::direction)
    }

    /// Position of this column among the active sort criteria.
    pub fn sort_index(&self) -> Option<usize> {
        let id = self.id();
        self.table
            .sorting_slice()
            .get()
            .iter()
            .position(|s| s.id == id)
    }

    /// Cycle unsorted → ascending → descending → unsorted, replacing any other
    /// active sort.
    ///
    /// No-op when the column cannot be sorted.
    pub fn toggle_sorting(&self) {
        self.cycle_sorting(false);
    }

    /// Like [`toggle_sorting`](Self::toggle_sorting) but keeps the other
    /// criteria; a newly sorted column is appended as the last criterion.
    pub fn toggle_sorting_multi(&self) {
        self.cycle_sorting(true);
    }

    /// A handler that toggles sorting when called, for wiring to header clicks.
    pub fn toggle_sorting_handler(&self) -> impl Fn() + use<'t, T> {
        let column = Column::new(self.table, self.position);
        move || column.toggle_sorting()
    }

    /// Remove this column from the sort criteria.
    pub fn clear_sorting(&self) {
        let id = self.id();
        self.table.sorting_slice().modify(|mut sorting| {
            sorting.retain(|s| s.id != id);
            sorting
        });
    }

    fn cycle_sorting(&self, multi: bool) {
        if !self.can_sort() {
            log::debug!("Sorting disabled for column '{}'", self.id());
            return;
        }
        let id = self.id();
        let sorting = self.table.sorting_slice().get();
        let next = match sorting.iter().find(|s| s.id == id).map(|s| s.desc) {
            None => Some(ColumnSort::asc(id)),
            Some(false) => Some(ColumnSort::desc(id)),
            Some(true) => None,
        };
        let updated = if multi {
            let mut updated = sorting;
            match (updated.iter().position(|s| s.id == id), next) {
                (Some(pos), Some(sort)) => updated[pos] = sort,
                (Some(pos), None) => {
                    updated.remove(pos);
                }
                (None, Some(sort)) => updated.push(sort),
                (None, None) => {}
            }
            updated
        } else {
            next.into_iter().collect()
        };
        log::trace!("Sorting for column '{id}' -> {updated:?}");
        self.table.sorting_slice().commit(updated);
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Returns `true` if column filters are enabled for the table and this column.
    pub fn can_filter(&self) -> bool {
        self.table.features().filtering && self.def().enable_filtering
    }

    /// The active filter value for this column.
    pub fn filter_value(&self) -> Option<Value> {
        let id = self.id();
        self.table
            .column_filters_slice()
            .get()
            .into_iter()
            .find(|f| f.id == id)
            .map(|f| f.value)
    }

    /// Set this column's filter. `None` or a blank value removes it.
    pub fn set_filter_value(&self, value: Option<Value>) {
        let id = self.id();
        self.table
            .column_filters_slice()
            .modify(|filters| upsert_filter(filters, id, value));
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    /// Returns `true` if the column may be hidden through its toggle.
    pub fn can_hide(&self) -> bool {
        self.def().enable_hiding
    }

    /// Returns `false` only if the visibility state maps this id to `false`.
    pub fn is_visible(&self) -> bool {
        self.table.is_column_visible(self.id())
    }

    /// Show or hide the column; `None` flips the current visibility.
    ///
    /// No-op when hiding is disabled for the column.
    pub fn toggle_visibility(&self, value: Option<bool>) {
        if !self.can_hide() {
            log::debug!("Hiding disabled for column '{}'", self.id());
            return;
        }
        let visible = value.unwrap_or(!self.is_visible());
        let id = self.id().to_string();
        self.table.column_visibility_slice().modify(|mut visibility| {
            visibility.insert(id, visible);
            visibility
        });
    }
}

impl<T> Clone for Column<'_, T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            position: self.position,
        }
    }
}

impl<T> fmt::Debug for Column<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id())
            .field("position", &self.position)
            .finish()
    }
}
