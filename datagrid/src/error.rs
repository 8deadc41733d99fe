//! Error types

/// Error returned when a table cannot be built from its inputs.
///
/// Only construction and column replacement can fail. Every runtime
/// operation (sorting, filtering, paging, selection) degrades to a no-op
/// instead of returning an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Two column declarations resolved to the same id.
    #[error("duplicate column id '{id}' (columns {first} and {second})")]
    DuplicateColumnId {
        id: String,
        first: usize,
        second: usize,
    },

    /// A page size of zero was configured.
    #[error("page size must be greater than zero")]
    InvalidPageSize,
}
