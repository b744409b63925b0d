//! The record browser: fetched set, filtered view and current page.
//!
//! The filtered view is stored as ascending indices into the fetched set, so
//! it is a subsequence by construction and is recomputed synchronously
//! whenever the set, the criteria or the page size changes.

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

use std::num::NonZeroUsize;

use tracing::debug;

use crate::net::types::Record;
use crate::state::filter::{FilterCriteria, matching_indices};
use crate::state::pagination::{self, PageError};

#[derive(Clone, Debug)]
pub struct RecordBrowser {
    records: Vec<Record>,
    criteria: FilterCriteria,
    filtered: Vec<usize>,
    current_page: usize,
    page_size: NonZeroUsize,
}

impl RecordBrowser {
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            records: Vec::new(),
            criteria: FilterCriteria::new(),
            filtered: Vec::new(),
            current_page: 1,
            page_size,
        }
    }

    /// Swap in a freshly fetched set: criteria cleared, back to page 1.
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
        self.criteria.clear();
        self.current_page = 1;
        self.recompute();
        debug!(records = self.records.len(), "browser: record set replaced");
    }

    /// Apply new criteria and return to page 1.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.current_page = 1;
        self.recompute();
    }

    pub fn clear_criteria(&mut self) {
        self.set_criteria(FilterCriteria::new());
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page_size = page_size;
        self.recompute();
    }

    /// Jump to `page`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] and keeps the current page when
    /// `page` is not in `[1, total_pages]`.
    pub fn go_to(&mut self, page: usize) -> Result<usize, PageError> {
        let page = pagination::check_page(page, self.total_pages())?;
        self.current_page = page;
        Ok(page)
    }

    /// Advance one page.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] on the last page.
    pub fn next(&mut self) -> Result<usize, PageError> {
        self.go_to(self.current_page().saturating_add(1))
    }

    /// Go back one page.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] on the first page.
    pub fn prev(&mut self) -> Result<usize, PageError> {
        self.go_to(self.current_page().saturating_sub(1))
    }

    /// Current page, clamped to the filtered set.
    #[must_use]
    pub fn current_page(&self) -> usize {
        pagination::clamp_page(self.current_page, self.total_pages())
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered.len(), self.page_size)
    }

    #[must_use]
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Every fetched record, unfiltered.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The filtered view, in fetch order.
    pub fn filtered(&self) -> impl Iterator<Item = &Record> {
        self.filtered.iter().map(|&index| &self.records[index])
    }

    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Records on the current (clamped) page.
    #[must_use]
    pub fn page_items(&self) -> Vec<&Record> {
        let page = pagination::paginate(&self.filtered, self.current_page(), self.page_size);
        page.items.iter().map(|&index| &self.records[index]).collect()
    }

    /// First fetched record whose `id_field` equals `id`.
    #[must_use]
    pub fn find(&self, id_field: &str, id: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.value(id_field) == id)
    }

    fn recompute(&mut self) {
        self.filtered = matching_indices(&self.records, &self.criteria);
    }
}
