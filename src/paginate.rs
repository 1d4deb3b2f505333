//! Client-side page arithmetic over an in-memory list. Pages are 1-based and
//! never wrap.

use std::ops::Range;

pub const PAGE_SIZE: usize = 10;

/// Index range shown on `page`: `[(page-1)*size, min(page*size, len))`.
/// Pages past the end yield an empty range at `len`.
pub fn page_range(len: usize, page: usize, size: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(size)
        .min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}

pub fn page_slice<T>(items: &[T], page: usize, size: usize) -> &[T] {
    &items[page_range(items.len(), page, size)]
}

pub fn has_prev(page: usize) -> bool {
    page > 1
}

pub fn has_next(len: usize, page: usize, size: usize) -> bool {
    page.saturating_mul(size) < len
}

/// Number of pages needed for `len` items. An empty list still has page 1.
pub fn page_count(len: usize, size: usize) -> usize {
    if size == 0 {
        return 1;
    }
    len.div_ceil(size).max(1)
}
