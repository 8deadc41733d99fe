use std::ops::Range;

use crate::PaginationState;

/// Range of the sorted rows covered by the current page.
///
/// Out of range pages, and a page size of zero, yield an empty range.
pub(crate) fn window(total: usize, pagination: PaginationState) -> Range<usize> {
    let start = pagination
        .page_index
        .saturating_mul(pagination.page_size)
        .min(total);
    let end = start.saturating_add(pagination.page_size).min(total);
    start..end
}

/// Number of pages needed for `total` rows. Zero rows means zero pages.
pub(crate) fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
