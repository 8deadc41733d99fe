use std::cmp::Ordering;

use crate::column::ResolvedColumn;
use crate::{ColumnSort, DataTable, Record, Row, Value};

/// Sort stage.
///
/// Criteria apply in order; the first non-equal comparison wins. Columns
/// with a custom sorting function use it, the rest compare resolved values
/// with [`Value::compare`]. The sort is stable, so rows that tie on every
/// criterion keep their filtered order. Unknown or non-sortable column ids
/// are skipped.
pub(crate) fn apply<T: Record>(
    table: &DataTable<T>,
    rows: Vec<usize>,
    sorting: &[ColumnSort],
) -> Vec<usize> {
    let criteria: Vec<(&ResolvedColumn<T>, bool)> = sorting
        .iter()
        .filter_map(|sort| match table.find_column(&sort.id) {
            Some(column) if column.def.enable_sorting => Some((column, sort.desc)),
            Some(_) => {
                log::debug!("Ignoring sort on non-sortable column '{}'", sort.id);
                None
            }
            None => {
                log::debug!("Ignoring sort on unknown column '{}'", sort.id);
                None
            }
        })
        .collect();

    if criteria.is_empty() || rows.len() < 2 {
        return rows;
    }

    // Resolve each plain criterion once per row instead of once per comparison.
    let keys: Vec<Vec<Value>> = rows
        .iter()
        .map(|&index| {
            criteria
                .iter()
                .map(|(column, _)| match column.def.sorting_fn {
                    Some(_) => Value::Null,
                    None => column.def.value(&table.data()[index]),
                })
                .collect()
        })
        .collect();

    let views: Vec<Row<'_, T>> = if criteria.iter().any(|(c, _)| c.def.sorting_fn.is_some()) {
        rows.iter().map(|&index| table.row_at(index)).collect()
    } else {
        Vec::new()
    };

    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        for (k, (column, desc)) in criteria.iter().enumerate() {
            let ordering = match &column.def.sorting_fn {
                Some(sorting_fn) => sorting_fn(&views[a], &views[b], &column.id),
                None => keys[a][k].compare(&keys[b][k]),
            };
            let ordering = if *desc { ordering.reverse() } else { ordering };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });

    order.into_iter().map(|position| rows[position]).collect()
}
