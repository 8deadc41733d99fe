//! Table configuration.

use std::sync::Arc;

use crate::slice::{Controlled, OnChange, Slice};
use crate::{
    ColumnDef, ColumnFiltersState, PaginationState, RowSelectionState, SortingState,
    VisibilityState,
};

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Caller-supplied row identity: `(row, index_in_data) -> id`.
pub type RowIdFn<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;

/// Ownership settings for one slice, collected by the builder.
pub(crate) struct SliceOptions<V> {
    controlled: Option<Controlled<V>>,
    initial: Option<V>,
    observer: Option<OnChange<V>>,
}

impl<V> Default for SliceOptions<V> {
    fn default() -> Self {
        Self {
            controlled: None,
            initial: None,
            observer: None,
        }
    }
}

impl<V: Clone> SliceOptions<V> {
    pub(crate) fn build(self, name: &str, default: V) -> Slice<V> {
        match self.controlled {
            Some(controlled) => {
                if self.initial.is_some() || self.observer.is_some() {
                    log::debug!("{name}: controlled slice ignores initial value and observer");
                }
                Slice::Controlled(controlled)
            }
            None => Slice::uncontrolled(self.initial.unwrap_or(default), self.observer),
        }
    }

    fn is_controlled(&self) -> bool {
        self.controlled.is_some()
    }
}

/// Feature switches, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub sorting: bool,
    pub filtering: bool,
    pub global_filter: bool,
    pub row_selection: bool,
    pub pagination: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            sorting: true,
            filtering: true,
            global_filter: true,
            row_selection: true,
            pagination: true,
        }
    }
}

/// Builder for [`DataTable`](crate::DataTable).
///
/// Each state slice is uncontrolled unless a `controlled_*` method is used.
/// Uncontrolled slices accept an `initial_*` value and an `on_*_change`
/// observer.
///
/// # Example
///
/// ```
/// use datagrid::{ColumnDef, ColumnSort, DataTable, DataTableOptions};
///
/// let rows = vec![serde_json::json!({"name": "Bob"}), serde_json::json!({"name": "Amy"})];
/// let table = DataTable::new(
///     DataTableOptions::new(rows, vec![ColumnDef::accessor("name")])
///         .page_size(25)
///         .initial_sorting(vec![ColumnSort::asc("name")]),
/// )
/// .unwrap();
///
/// assert_eq!(table.state().pagination.page_size, 25);
/// ```
pub struct DataTableOptions<T> {
    pub(crate) data: Vec<T>,
    pub(crate) columns: Vec<ColumnDef<T>>,
    pub(crate) features: Features,
    pub(crate) page_size: usize,
    pub(crate) row_id: Option<RowIdFn<T>>,
    pub(crate) sorting: SliceOptions<SortingState>,
    pub(crate) column_filters: SliceOptions<ColumnFiltersState>,
    pub(crate) global_filter: SliceOptions<String>,
    pub(crate) column_visibility: SliceOptions<VisibilityState>,
    pub(crate) row_selection: SliceOptions<RowSelectionState>,
    pub(crate) pagination: SliceOptions<PaginationState>,
}

macro_rules! slice_methods {
    ($field:ident, $ty:ty, $controlled:ident, $initial:ident, $on_change:ident) => {
        #[doc = concat!("Let the caller own the `", stringify!($field), "` slice.")]
        pub fn $controlled(mut self, controlled: Controlled<$ty>) -> Self {
            self.$field.controlled = Some(controlled);
            self
        }

        #[doc = concat!("Initial value of the table-owned `", stringify!($field), "` slice.")]
        pub fn $initial(mut self, value: $ty) -> Self {
            self.$field.initial = Some(value);
            self
        }

        #[doc = concat!("Observe writes to the table-owned `", stringify!($field), "` slice.")]
        pub fn $on_change<F>(mut self, f: F) -> Self
        where
            F: Fn($ty) + Send + Sync + 'static,
        {
            self.$field.observer = Some(Arc::new(f));
            self
        }
    };
}

impl<T> DataTableOptions<T> {
    /// Options for a table over `data` with the given column declarations.
    pub fn new(data: Vec<T>, columns: Vec<ColumnDef<T>>) -> Self {
        Self {
            data,
            columns,
            features: Features::default(),
            page_size: DEFAULT_PAGE_SIZE,
            row_id: None,
            sorting: SliceOptions::default(),
            column_filters: SliceOptions::default(),
            global_filter: SliceOptions::default(),
            column_visibility: SliceOptions::default(),
            row_selection: SliceOptions::default(),
            pagination: SliceOptions::default(),
        }
    }

    /// Enable or disable sorting (default: enabled).
    pub fn enable_sorting(mut self, enabled: bool) -> Self {
        self.features.sorting = enabled;
        self
    }

    /// Enable or disable per-column filters (default: enabled).
    ///
    /// The global filter is switched separately.
    pub fn enable_filtering(mut self, enabled: bool) -> Self {
        self.features.filtering = enabled;
        self
    }

    /// Enable or disable the global filter (default: enabled).
    pub fn enable_global_filter(mut self, enabled: bool) -> Self {
        self.features.global_filter = enabled;
        self
    }

    /// Enable or disable row-level selection toggles (default: enabled).
    pub fn enable_row_selection(mut self, enabled: bool) -> Self {
        self.features.row_selection = enabled;
        self
    }

    /// Enable or disable pagination (default: enabled).
    pub fn enable_pagination(mut self, enabled: bool) -> Self {
        self.features.pagination = enabled;
        self
    }

    /// Initial page size (default: 10). Ignored when the pagination slice is
    /// controlled or given an explicit initial value.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Derive row ids from the row instead of its position in `data`.
    pub fn row_id<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, usize) -> String + Send + Sync + 'static,
    {
        self.row_id = Some(Arc::new(f));
        self
    }

    slice_methods!(
        sorting,
        SortingState,
        controlled_sorting,
        initial_sorting,
        on_sorting_change
    );
    slice_methods!(
        column_filters,
        ColumnFiltersState,
        controlled_column_filters,
        initial_column_filters,
        on_column_filters_change
    );
    slice_methods!(
        global_filter,
        String,
        controlled_global_filter,
        initial_global_filter,
        on_global_filter_change
    );
    slice_methods!(
        column_visibility,
        VisibilityState,
        controlled_column_visibility,
        initial_column_visibility,
        on_column_visibility_change
    );
    slice_methods!(
        row_selection,
        RowSelectionState,
        controlled_row_selection,
        initial_row_selection,
        on_row_selection_change
    );
    slice_methods!(
        pagination,
        PaginationState,
        controlled_pagination,
        initial_pagination,
        on_pagination_change
    );

    /// Page size the pagination slice starts with when table-owned.
    pub(crate) fn initial_page_size(&self) -> Option<usize> {
        if self.pagination.is_controlled() {
            return None;
        }
        Some(
            self.pagination
                .initial
                .map(|p| p.page_size)
                .unwrap_or(self.page_size),
        )
    }
}
