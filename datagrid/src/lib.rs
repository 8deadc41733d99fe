//! Stateful table engine: sorting, filtering, pagination, row selection and
//! column visibility over an in-memory list of rows.
//!
//! A [`DataTable`] is built from rows, [`ColumnDef`]s and a
//! [`DataTableOptions`] builder. Each piece of view state (sorting, column
//! filters, global filter, column visibility, row selection, pagination) is
//! a [`Slice`] that is either owned by the table or controlled by the
//! caller. Row models are derived on read: filter, then sort, then
//! paginate.
//!
//! Nothing here renders anything; the caller draws headers and cells from
//! [`DataTable::header_groups`] and [`DataTable::row_model`].

extern crate self as datagrid;

mod column;
mod error;
mod model;
mod options;
mod record;
mod row;
mod slice;
mod state;
mod table;
mod table_state;
mod value;

pub mod filter_fns;
pub mod sorting_fns;

pub use column::{Accessor, AccessorFn, Column, ColumnDef, FilterFn, Header, HeaderGroup, SortingFn};
pub use datagrid_derive::Record;
pub use error::TableError;
pub use options::{DEFAULT_PAGE_SIZE, DataTableOptions, Features, RowIdFn};
pub use record::Record;
pub use row::{Cell, Row, RowModel};
pub use slice::{Controlled, OnChange, ReadFn, Slice};
pub use state::State;
pub use table::{DataTable, PageInfo};
pub use table_state::{
    ColumnFilter, ColumnFiltersState, ColumnSort, PaginationState, RowSelectionState,
    SortDirection, SortingState, TableState, VisibilityState,
};
pub use value::Value;

/// Common imports.
pub mod prelude {
    pub use crate::{
        ColumnDef, ColumnFilter, ColumnSort, Controlled, DataTable, DataTableOptions, Record,
        SortDirection, State, TableState, Value,
    };
}
