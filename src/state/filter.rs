//! Case-insensitive substring filtering over a fetched record set.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use std::collections::BTreeMap;

use crate::net::types::Record;

/// Field name -> substring query. Empty queries match everything.
///
/// Queries are trimmed and case-folded on insert, so matching only folds the
/// record side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    terms: BTreeMap<String, String>,
}

impl FilterCriteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: &str, query: &str) -> Self {
        self.set(field, query);
        self
    }

    /// Set or replace one criterion. A blank query removes it.
    pub fn set(&mut self, field: &str, query: &str) {
        let folded = query.trim().to_lowercase();
        if folded.is_empty() {
            self.terms.remove(field);
        } else {
            self.terms.insert(field.to_owned(), folded);
        }
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// True iff every criterion is a substring of the record's field value.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.terms
            .iter()
            .all(|(field, query)| record.value(field).to_lowercase().contains(query.as_str()))
    }
}

/// Records matching `criteria`, in their original order.
#[must_use]
pub fn filter<'a>(records: &'a [Record], criteria: &FilterCriteria) -> Vec<&'a Record> {
    records.iter().filter(|record| criteria.matches(record)).collect()
}

/// Positions of matching records, ascending.
#[must_use]
pub fn matching_indices(records: &[Record], criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.is_empty() {
        return (0..records.len()).collect();
    }
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| criteria.matches(record))
        .map(|(index, _)| index)
        .collect()
}
