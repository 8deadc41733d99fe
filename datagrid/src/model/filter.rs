use crate::column::ResolvedColumn;
use crate::filter_fns::contains_ignore_case;
use crate::{ColumnFilter, DataTable, Record, Value};

/// Filter stage.
///
/// A row passes when it matches the global filter (if non-empty) in any
/// filterable column, and then satisfies every column filter. Column
/// filters naming unknown or non-filterable columns are skipped. The output
/// keeps input order.
pub(crate) fn apply<T: Record>(
    table: &DataTable<T>,
    global_filter: &str,
    column_filters: &[ColumnFilter],
) -> Vec<usize> {
    let data = table.data();
    let needle = global_filter.to_lowercase();
    let active = active_filters(table, column_filters);

    if needle.is_empty() && active.is_empty() {
        return (0..data.len()).collect();
    }

    let searchable: Vec<&ResolvedColumn<T>> = table
        .resolved_columns()
        .iter()
        .filter(|c| c.def.enable_filtering)
        .collect();

    (0..data.len())
        .filter(|&index| {
            let row = &data[index];
            if !needle.is_empty() {
                let hit = searchable
                    .iter()
                    .any(|c| c.def.value(row).to_string().to_lowercase().contains(&needle));
                if !hit {
                    return false;
                }
            }
            active.iter().all(|&(column, value)| match &column.def.filter_fn {
                Some(filter_fn) => filter_fn(&table.row_at(index), &column.id, value),
                None => contains_ignore_case(&column.def.value(row), value),
            })
        })
        .collect()
}

fn active_filters<'a, T>(
    table: &'a DataTable<T>,
    column_filters: &'a [ColumnFilter],
) -> Vec<(&'a ResolvedColumn<T>, &'a Value)> {
    column_filters
        .iter()
        .filter_map(|filter| match table.find_column(&filter.id) {
            Some(column) if column.def.enable_filtering => Some((column, &filter.value)),
            Some(_) => {
                log::debug!("Ignoring filter on non-filterable column '{}'", filter.id);
                None
            }
            None => {
                log::debug!("Ignoring filter on unknown column '{}'", filter.id);
                None
            }
        })
        .collect()
}
