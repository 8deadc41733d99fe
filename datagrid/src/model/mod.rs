//! The row pipeline: filter, then sort, then paginate.
//!
//! Filtering and sorting produce lists of indices into the table's data;
//! pagination is a window over the sorted list. Row views are only built
//! when the caller asks for a row model.

pub(crate) mod filter;
pub(crate) mod paginate;
pub(crate) mod sort;

use crate::{ColumnFiltersState, DataTable, Record, SortingState};

/// The state a filtered and sorted row list was derived from.
///
/// Disabled features are folded in before the key is built, so a table with
/// sorting disabled always has an empty `sorting` here.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PipelineKey {
    pub sorting: SortingState,
    pub column_filters: ColumnFiltersState,
    pub global_filter: String,
}

/// Memoized pipeline output.
#[derive(Debug)]
pub(crate) struct Computed {
    pub key: PipelineKey,
    /// Input generation (bumped when data or columns are replaced).
    pub generation: u64,
    /// Indices into the table data, filtered and in display order.
    pub rows: Vec<usize>,
}

/// Run the filter and sort stages for `key`.
pub(crate) fn run<T: Record>(table: &DataTable<T>, key: &PipelineKey) -> Vec<usize> {
    let filtered = filter::apply(table, &key.global_filter, &key.column_filters);
    log::trace!(
        "Filter stage kept {} of {} rows",
        filtered.len(),
        table.data().len()
    );
    sort::apply(table, filtered, &key.sorting)
}
