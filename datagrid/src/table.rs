//! The table facade.

use std::fmt;
use std::ops::Range;
use std::sync::{Arc, RwLock};

use crate::column::{ResolvedColumn, resolve_columns};
use crate::model::{self, Computed, PipelineKey, paginate};
use crate::options::{DataTableOptions, Features, RowIdFn};
use crate::slice::Slice;
use crate::table_state::dedup_filters;
use crate::{
    Column, ColumnDef, ColumnFiltersState, Header, HeaderGroup, PaginationState, Record, Row,
    RowModel, RowSelectionState, SortingState, TableError, TableState, VisibilityState,
};

/// Display range of the current page.
///
/// `start_row` and `end_row` are 1-based and inclusive; both are `0` when
/// the page is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub start_row: usize,
    pub end_row: usize,
    pub total_rows: usize,
}

impl fmt::Display for PageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} to {} of {}",
            self.start_row, self.end_row, self.total_rows
        )
    }
}

/// A stateful view over a list of rows.
///
/// The table owns the rows and column declarations, and holds one
/// [`Slice`] per piece of view state. Row models are derived on read:
/// filter, then sort, then paginate. The filtered and sorted index list is
/// memoized and recomputed only when the sorting, column filter or global
/// filter state it was built from changes, or when the data or columns are
/// replaced.
///
/// Setters take `&self`. No lock is held while user callbacks run, so an
/// `on_*_change` observer or a controlled slice's `on_change` may call back
/// into the table.
///
/// # Example
///
/// ```
/// use datagrid::{ColumnDef, DataTable, DataTableOptions};
/// use serde_json::json;
///
/// let rows = vec![
///     json!({"name": "Bob", "age": 30}),
///     json!({"name": "Amy", "age": 25}),
///     json!({"name": "Cid", "age": 35}),
/// ];
/// let columns = vec![ColumnDef::accessor("name"), ColumnDef::accessor("age")];
/// let table = DataTable::new(DataTableOptions::new(rows, columns)).unwrap();
///
/// table.column("age").unwrap().toggle_sorting();
/// let names: Vec<String> = table
///     .row_model()
///     .iter()
///     .map(|row| row.value("name").unwrap().to_string())
///     .collect();
/// assert_eq!(names, ["Amy", "Bob", "Cid"]);
/// ```
pub struct DataTable<T> {
    data: Vec<T>,
    columns: Vec<ResolvedColumn<T>>,
    features: Features,
    row_id: Option<RowIdFn<T>>,
    sorting: Slice<SortingState>,
    column_filters: Slice<ColumnFiltersState>,
    global_filter: Slice<String>,
    column_visibility: Slice<VisibilityState>,
    row_selection: Slice<RowSelectionState>,
    pagination: Slice<PaginationState>,
    generation: u64,
    cache: RwLock<Option<Arc<Computed>>>,
}

impl<T> DataTable<T> {
    /// The rows, in the order they were given.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Feature switches the table was built with.
    pub fn features(&self) -> Features {
        self.features
    }

    /// Look up a column view by id.
    pub fn column(&self, id: &str) -> Option<Column<'_, T>> {
        self.columns
            .iter()
            .position(|c| c.id == id)
            .map(|position| Column::new(self, position))
    }

    /// Every column in declaration order, hidden ones included.
    pub fn all_columns(&self) -> Vec<Column<'_, T>> {
        (0..self.columns.len())
            .map(|position| Column::new(self, position))
            .collect()
    }

    /// Visible columns in declaration order.
    pub fn visible_columns(&self) -> Vec<Column<'_, T>> {
        let visibility = self.column_visibility.get();
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| visibility.get(&c.id).copied().unwrap_or(true))
            .map(|(position, _)| Column::new(self, position))
            .collect()
    }

    /// Headers for the visible columns, as a single group.
    pub fn header_groups(&self) -> Vec<HeaderGroup<'_, T>> {
        let headers = self
            .visible_columns()
            .into_iter()
            .map(|column| {
                let label = column.header();
                Header::new(column, label)
            })
            .collect();
        vec![HeaderGroup::new("header-group-0", headers)]
    }

    /// Footers for the visible columns. Columns without a footer get an
    /// empty label.
    pub fn footer_groups(&self) -> Vec<HeaderGroup<'_, T>> {
        let footers = self
            .visible_columns()
            .into_iter()
            .map(|column| {
                let label = column.def().footer_label().unwrap_or("");
                Header::new(column, label)
            })
            .collect();
        vec![HeaderGroup::new("footer-group-0", footers)]
    }

    /// Returns `true` unless the visibility state hides `column_id`.
    pub fn is_column_visible(&self, column_id: &str) -> bool {
        self.column_visibility
            .get()
            .get(column_id)
            .copied()
            .unwrap_or(true)
    }

    /// Returns `true` if the selection state marks `row_id` as selected.
    pub fn is_row_selected(&self, row_id: &str) -> bool {
        is_selected(&self.row_selection.get(), row_id)
    }

    /// Snapshot of every state slice.
    pub fn state(&self) -> TableState {
        TableState {
            sorting: self.sorting.get(),
            column_filters: self.column_filters.get(),
            global_filter: self.global_filter.get(),
            column_visibility: self.column_visibility.get(),
            row_selection: self.row_selection.get(),
            pagination: self.pagination.get(),
        }
    }

    // -------------------------------------------------------------------------
    // State writes
    // -------------------------------------------------------------------------

    /// Replace the sort criteria.
    pub fn set_sorting(&self, sorting: SortingState) {
        self.sorting.commit(sorting);
    }

    /// Clear all sort criteria.
    pub fn reset_sorting(&self) {
        self.sorting.commit(Vec::new());
    }

    /// Replace the column filters. Repeated ids collapse to the last value.
    pub fn set_column_filters(&self, filters: ColumnFiltersState) {
        self.column_filters.commit(dedup_filters(filters));
    }

    /// Clear all column filters.
    pub fn reset_column_filters(&self) {
        self.column_filters.commit(Vec::new());
    }

    /// Replace the global filter text.
    pub fn set_global_filter(&self, filter: impl Into<String>) {
        self.global_filter.commit(filter.into());
    }

    /// Replace the visibility map.
    pub fn set_column_visibility(&self, visibility: VisibilityState) {
        self.column_visibility.commit(visibility);
    }

    /// Replace the selection map.
    ///
    /// Writes even when row selection toggles are disabled.
    pub fn set_row_selection(&self, selection: RowSelectionState) {
        self.row_selection.commit(selection);
    }

    /// Deselect every row.
    pub fn reset_row_selection(&self) {
        self.row_selection.commit(RowSelectionState::new());
    }

    /// Replace the pagination state. A page size of zero is ignored.
    pub fn set_pagination(&self, pagination: PaginationState) {
        if pagination.page_size == 0 {
            log::warn!("Ignoring pagination with page size 0");
            return;
        }
        self.pagination.commit(pagination);
    }

    /// Jump to a page. Out of range pages render empty.
    pub fn set_page_index(&self, page_index: usize) {
        self.pagination.modify(|p| PaginationState { page_index, ..p });
    }

    /// Change the page size and go back to the first page.
    ///
    /// A size of zero is ignored.
    pub fn set_page_size(&self, page_size: usize) {
        if page_size == 0 {
            log::warn!("Ignoring page size 0");
            return;
        }
        self.pagination.commit(PaginationState::new(page_size));
    }

    /// Advance one page. Not bounded by the page count.
    pub fn next_page(&self) {
        self.pagination.modify(|p| PaginationState {
            page_index: p.page_index.saturating_add(1),
            ..p
        });
    }

    /// Go back one page, stopping at the first.
    pub fn previous_page(&self) {
        self.pagination.modify(|p| PaginationState {
            page_index: p.page_index.saturating_sub(1),
            ..p
        });
    }

    /// Go to the first page.
    pub fn first_page(&self) {
        self.set_page_index(0);
    }

    /// Returns `true` if the current page is after the first.
    pub fn can_previous_page(&self) -> bool {
        self.pagination.get().page_index > 0
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Replace the rows.
    ///
    /// State slices are left alone, so selection keyed by position-based ids
    /// now refers to whatever rows sit at those positions.
    pub fn set_data(&mut self, data: Vec<T>) {
        log::debug!("Replacing {} rows with {}", self.data.len(), data.len());
        self.data = data;
        self.invalidate();
    }

    /// Replace the column declarations. On error the table is unchanged.
    pub fn set_columns(&mut self, columns: Vec<ColumnDef<T>>) -> Result<(), TableError> {
        self.columns = resolve_columns(columns)?;
        self.invalidate();
        Ok(())
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        *self
            .cache
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    // -------------------------------------------------------------------------
    // Crate internals
    // -------------------------------------------------------------------------

    pub(crate) fn resolved_columns(&self) -> &[ResolvedColumn<T>] {
        &self.columns
    }

    pub(crate) fn find_column(&self, id: &str) -> Option<&ResolvedColumn<T>> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub(crate) fn row_id(&self, index: usize) -> String {
        match &self.row_id {
            Some(row_id) => row_id(&self.data[index], index),
            None => index.to_string(),
        }
    }

    pub(crate) fn row_at(&self, index: usize) -> Row<'_, T> {
        Row::new(self, index, self.row_id(index))
    }

    pub(crate) fn sorting_slice(&self) -> &Slice<SortingState> {
        &self.sorting
    }

    pub(crate) fn column_filters_slice(&self) -> &Slice<ColumnFiltersState> {
        &self.column_filters
    }

    pub(crate) fn column_visibility_slice(&self) -> &Slice<VisibilityState> {
        &self.column_visibility
    }

    pub(crate) fn row_selection_slice(&self) -> &Slice<RowSelectionState> {
        &self.row_selection
    }

    fn model(&self, indices: impl IntoIterator<Item = usize>) -> RowModel<'_, T> {
        RowModel::new(indices.into_iter().map(|index| self.row_at(index)).collect())
    }
}

impl<T: Record> DataTable<T> {
    /// Build a table.
    ///
    /// Fails if two columns resolve to the same id, or if the table-owned
    /// pagination starts with a page size of zero.
    pub fn new(options: DataTableOptions<T>) -> Result<Self, TableError> {
        if options.initial_page_size() == Some(0) {
            log::warn!("Rejecting table with page size 0");
            return Err(TableError::InvalidPageSize);
        }
        let DataTableOptions {
            data,
            columns,
            features,
            page_size,
            row_id,
            sorting,
            column_filters,
            global_filter,
            column_visibility,
            row_selection,
            pagination,
        } = options;
        let columns = resolve_columns(columns)?;

        let table = Self {
            data,
            columns,
            features,
            row_id,
            sorting: sorting.build("sorting", SortingState::new()),
            column_filters: column_filters.build("column_filters", ColumnFiltersState::new()),
            global_filter: global_filter.build("global_filter", String::new()),
            column_visibility: column_visibility.build("column_visibility", VisibilityState::new()),
            row_selection: row_selection.build("row_selection", RowSelectionState::new()),
            pagination: pagination.build("pagination", PaginationState::new(page_size)),
            generation: 0,
            cache: RwLock::new(None),
        };
        log::debug!(
            "Created table with {} rows and {} columns",
            table.data.len(),
            table.columns.len()
        );
        Ok(table)
    }

    // -------------------------------------------------------------------------
    // Row models
    // -------------------------------------------------------------------------

    /// Every row, in input order.
    pub fn core_row_model(&self) -> RowModel<'_, T> {
        self.model(0..self.data.len())
    }

    /// Filtered and sorted rows, before pagination.
    pub fn filtered_row_model(&self) -> RowModel<'_, T> {
        let computed = self.computed();
        self.model(computed.rows.iter().copied())
    }

    /// The rows of the current page; every filtered row when pagination is
    /// disabled.
    pub fn row_model(&self) -> RowModel<'_, T> {
        let computed = self.computed();
        let range = self.page_range(computed.rows.len());
        self.model(computed.rows[range].iter().copied())
    }

    /// Filtered rows that are selected, in display order.
    pub fn selected_row_model(&self) -> RowModel<'_, T> {
        let computed = self.computed();
        let selection = self.row_selection.get();
        self.model(
            computed
                .rows
                .iter()
                .copied()
                .filter(|&index| is_selected(&selection, &self.row_id(index))),
        )
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Number of pages over the filtered rows; `0` when there are none.
    ///
    /// With pagination disabled every row is on one page, so this is at
    /// most `1`.
    pub fn page_count(&self) -> usize {
        let total = self.computed().rows.len();
        if !self.features.pagination {
            return usize::from(total > 0);
        }
        paginate::page_count(total, self.pagination.get().page_size)
    }

    /// Returns `true` if a page follows the current one.
    pub fn can_next_page(&self) -> bool {
        self.pagination.get().page_index.saturating_add(1) < self.page_count()
    }

    /// Go to the last page, or the first if there are no rows.
    pub fn last_page(&self) {
        self.set_page_index(self.page_count().saturating_sub(1));
    }

    /// Display range of the current page.
    pub fn page_info(&self) -> PageInfo {
        let total_rows = self.computed().rows.len();
        let range = self.page_range(total_rows);
        if range.is_empty() {
            return PageInfo {
                start_row: 0,
                end_row: 0,
                total_rows,
            };
        }
        PageInfo {
            start_row: range.start + 1,
            end_row: range.end,
            total_rows,
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Returns `true` if there is at least one filtered row and all of them
    /// are selected.
    pub fn is_all_rows_selected(&self) -> bool {
        let computed = self.computed();
        let selection = self.row_selection.get();
        !computed.rows.is_empty()
            && computed
                .rows
                .iter()
                .all(|&index| is_selected(&selection, &self.row_id(index)))
    }

    /// Returns `true` if some, but not all, filtered rows are selected.
    pub fn is_some_rows_selected(&self) -> bool {
        let computed = self.computed();
        let selection = self.row_selection.get();
        let selected = computed
            .rows
            .iter()
            .filter(|&&index| is_selected(&selection, &self.row_id(index)))
            .count();
        selected > 0 && selected < computed.rows.len()
    }

    /// Select or deselect every filtered row; `None` selects all unless all
    /// are already selected.
    ///
    /// Rows outside the filter keep their selection. No-op when row
    /// selection is disabled.
    pub fn toggle_all_rows_selected(&self, value: Option<bool>) {
        if !self.features.row_selection {
            log::debug!("Row selection disabled, ignoring toggle of all rows");
            return;
        }
        let selected = value.unwrap_or_else(|| !self.is_all_rows_selected());
        let ids: Vec<String> = self
            .computed()
            .rows
            .iter()
            .map(|&index| self.row_id(index))
            .collect();
        self.row_selection.modify(|mut selection| {
            for id in ids {
                if selected {
                    selection.insert(id, true);
                } else {
                    selection.remove(&id);
                }
            }
            selection
        });
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    fn pipeline_key(&self) -> PipelineKey {
        let features = self.features;
        PipelineKey {
            sorting: if features.sorting {
                self.sorting.get()
            } else {
                SortingState::new()
            },
            column_filters: if features.filtering {
                self.column_filters.get()
            } else {
                ColumnFiltersState::new()
            },
            global_filter: if features.global_filter {
                self.global_filter.get()
            } else {
                String::new()
            },
        }
    }

    /// Filtered and sorted indices for the current state.
    ///
    /// The cache is checked against freshly read state on every call, so
    /// controlled slices changed behind the table's back are picked up.
    fn computed(&self) -> Arc<Computed> {
        let key = self.pipeline_key();
        {
            let cache = self
                .cache
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(hit) = cache
                .as_ref()
                .filter(|c| c.generation == self.generation && c.key == key)
            {
                return Arc::clone(hit);
            }
        }

        // User functions run here; the cache lock must not be held.
        let rows = model::run(self, &key);
        let computed = Arc::new(Computed {
            key,
            generation: self.generation,
            rows,
        });
        *self
            .cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Arc::clone(&computed));
        computed
    }

    fn page_range(&self, total: usize) -> Range<usize> {
        if !self.features.pagination {
            return 0..total;
        }
        paginate::window(total, self.pagination.get())
    }
}

fn is_selected(selection: &RowSelectionState, id: &str) -> bool {
    selection.get(id).copied().unwrap_or(false)
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.data.len())
            .field("columns", &self.columns.len())
            .field("features", &self.features)
            .field("state", &self.state())
            .finish()
    }
}
