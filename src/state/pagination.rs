//! Fixed-size page slicing and the prev/numbered/next control model.
//!
//! Interactive navigation outside `[1, total_pages]` is rejected by
//! [`check_page`]; rendering goes through [`clamp_page`] so stale page numbers
//! (e.g. after a reload shrank the set) still produce a valid page.

#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("page {requested} is out of range (1-{total_pages})")]
    OutOfRange { requested: usize, total_pages: usize },
}

/// One slice of a filtered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub total_pages: usize,
}

/// `max(1, ceil(len / page_size))`.
#[must_use]
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Accept `page` only if it is a real page.
///
/// # Errors
///
/// Returns [`PageError::OutOfRange`] for 0 or anything past `total_pages`.
pub fn check_page(page: usize, total_pages: usize) -> Result<usize, PageError> {
    if page == 0 || page > total_pages.max(1) {
        return Err(PageError::OutOfRange { requested: page, total_pages: total_pages.max(1) });
    }
    Ok(page)
}

/// Slice `items` for 1-based `page`; bounds past the end yield an empty page.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: NonZeroUsize) -> Page<'_, T> {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    Page { items: &items[start..end], number: page, total_pages: total_pages(items.len(), page_size) }
}

// =============================================================================
// CONTROLS
// =============================================================================

/// One numbered page control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub number: usize,
    pub current: bool,
}

/// Prev / 1..N / Next control state for a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub current: usize,
    pub total_pages: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub pages: Vec<PageButton>,
}

#[must_use]
pub fn controls(current: usize, total_pages: usize) -> PaginationControls {
    let total_pages = total_pages.max(1);
    let current = clamp_page(current, total_pages);
    PaginationControls {
        current,
        total_pages,
        prev_enabled: current > 1,
        next_enabled: current < total_pages,
        pages: (1..=total_pages)
            .map(|number| PageButton { number, current: number == current })
            .collect(),
    }
}
