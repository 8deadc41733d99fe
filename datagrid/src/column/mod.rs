//! Column declarations and the views a table hands out over them.

mod def;
mod header;
mod view;

pub use def::{Accessor, AccessorFn, ColumnDef, FilterFn, SortingFn};
pub(crate) use def::{ResolvedColumn, resolve_columns};
pub use header::{Header, HeaderGroup};
pub use view::Column;
