use std::fmt;

use crate::Column;

/// One header (or footer) cell.
///
/// Groups are flat, so every header spans one column and none is a
/// placeholder.
pub struct Header<'t, T> {
    column: Column<'t, T>,
    label: &'t str,
}

impl<'t, T> Header<'t, T> {
    pub(crate) fn new(column: Column<'t, T>, label: &'t str) -> Self {
        Self { column, label }
    }

    /// Same as the column id.
    pub fn id(&self) -> &'t str {
        self.column.id()
    }

    /// The column under this header.
    pub fn column(&self) -> &Column<'t, T> {
        &self.column
    }

    /// Text to render, falling back to the column id.
    pub fn label(&self) -> &'t str {
        self.label
    }
}

impl<T> fmt::Debug for Header<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header")
            .field("id", &self.id())
            .field("label", &self.label)
            .finish()
    }
}

/// A row of headers.
pub struct HeaderGroup<'t, T> {
    id: String,
    headers: Vec<Header<'t, T>>,
}

impl<'t, T> HeaderGroup<'t, T> {
    pub(crate) fn new(id: impl Into<String>, headers: Vec<Header<'t, T>>) -> Self {
        Self {
            id: id.into(),
            headers,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Headers for the visible columns, in declaration order.
    pub fn headers(&self) -> &[Header<'t, T>] {
        &self.headers
    }
}

impl<T> fmt::Debug for HeaderGroup<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderGroup")
            .field("id", &self.id)
            .field("headers", &self.headers)
            .finish()
    }
}
