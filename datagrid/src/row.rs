//! Row, cell and row model views.

use std::fmt;

use crate::{Column, DataTable, Record, Value};

/// One row of the caller's data, as seen through a table.
///
/// `index` is the row's position in the data handed to the table and does
/// not change when rows are filtered or sorted. `id` is `index` as a string
/// unless the table was configured with a custom
/// [`row_id`](crate::DataTableOptions::row_id).
pub struct Row<'t, T> {
    table: &'t DataTable<T>,
    index: usize,
    id: String,
}

impl<'t, T> Row<'t, T> {
    pub(crate) fn new(table: &'t DataTable<T>, index: usize, id: String) -> Self {
        Self { table, index, id }
    }

    /// The row id, the key of the row selection state.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Position of the row in the table's data.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The caller's row.
    pub fn original(&self) -> &'t T {
        &self.table.data()[self.index]
    }

    /// Returns `true` if the row id is selected.
    pub fn is_selected(&self) -> bool {
        self.table.is_row_selected(&self.id)
    }

    /// Returns `true` if row-level selection toggles are enabled.
    pub fn can_select(&self) -> bool {
        self.table.features().row_selection
    }
}

impl<'t, T: Record> Row<'t, T> {
    /// Resolve the value of column `column_id` for this row.
    ///
    /// Returns `None` for an unknown column id.
    pub fn value(&self, column_id: &str) -> Option<Value> {
        self.table
            .find_column(column_id)
            .map(|column| column.def.value(self.original()))
    }

    /// Select or deselect the row; `None` flips the current selection.
    ///
    /// No-op when row selection is disabled.
    pub fn toggle_selected(&self, value: Option<bool>) {
        if !self.can_select() {
            log::debug!("Row selection disabled, ignoring toggle of row '{}'", self.id);
            return;
        }
        let selected = value.unwrap_or(!self.is_selected());
        let id = self.id.clone();
        self.table.row_selection_slice().modify(|mut selection| {
            if selected {
                selection.insert(id, true);
            } else {
                selection.remove(&id);
            }
            selection
        });
    }

    /// One cell per visible column, in declaration order.
    pub fn visible_cells(&self) -> Vec<Cell<'t, T>> {
        self.table
            .visible_columns()
            .into_iter()
            .map(|column| Cell::new(self.clone(), column))
            .collect()
    }

    /// One cell per column, hidden ones included.
    pub fn all_cells(&self) -> Vec<Cell<'t, T>> {
        self.table
            .all_columns()
            .into_iter()
            .map(|column| Cell::new(self.clone(), column))
            .collect()
    }
}

impl<T> Clone for Row<'_, T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            index: self.index,
            id: self.id.clone(),
        }
    }
}

impl<T> fmt::Debug for Row<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("id", &self.id)
            .field("index", &self.index)
            .finish()
    }
}

/// The join of a row and a column.
pub struct Cell<'t, T> {
    row: Row<'t, T>,
    column: Column<'t, T>,
}

impl<'t, T> Cell<'t, T> {
    fn new(row: Row<'t, T>, column: Column<'t, T>) -> Self {
        Self { row, column }
    }

    /// `"<row id>-<column id>"`.
    pub fn id(&self) -> String {
        format!("{}-{}", self.row.id(), self.column.id())
    }

    /// The cell's row.
    pub fn row(&self) -> &Row<'t, T> {
        &self.row
    }

    /// The cell's column.
    pub fn column(&self) -> &Column<'t, T> {
        &self.column
    }
}

impl<T: Record> Cell<'_, T> {
    /// Resolve the value by running the column accessor on the row.
    pub fn value(&self) -> Value {
        self.column.def().value(self.row.original())
    }
}

impl<T> fmt::Debug for Cell<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell").field("id", &self.id()).finish()
    }
}

/// An ordered list of rows.
pub struct RowModel<'t, T> {
    rows: Vec<Row<'t, T>>,
}

impl<'t, T> RowModel<'t, T> {
    pub(crate) fn new(rows: Vec<Row<'t, T>>) -> Self {
        Self { rows }
    }

    /// The rows.
    pub fn rows(&self) -> &[Row<'t, T>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows.
    pub fn iter(&self) -> std::slice::Iter<'_, Row<'t, T>> {
        self.rows.iter()
    }

    /// Find a row by id.
    pub fn row_by_id(&self, id: &str) -> Option<&Row<'t, T>> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Row ids in order.
    pub fn ids(&self) -> Vec<&str> {
        self.rows.iter().map(Row::id).collect()
    }
}

impl<'t, T> IntoIterator for RowModel<'t, T> {
    type Item = Row<'t, T>;
    type IntoIter = std::vec::IntoIter<Row<'t, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, 't, T> IntoIterator for &'a RowModel<'t, T> {
    type Item = &'a Row<'t, T>;
    type IntoIter = std::slice::Iter<'a, Row<'t, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<T> fmt::Debug for RowModel<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.rows).finish()
    }
}
