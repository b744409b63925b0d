//! Edit-form draft and row selection.
//!
//! STATE MACHINE
//! =============
//! `Empty -> Selected` on [`Draft::select`], back to `Empty` on
//! [`Draft::clear`] (which pages also call after a successful create, update
//! or delete). `selected_id` is `None` exactly when the draft is `Empty`.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ActionError;
use crate::net::types::Record;
use crate::state::schema::RecordSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftStatus {
    Empty,
    Selected,
}

/// Mutable copy of the form fields plus the selected row's identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    fields: BTreeMap<String, String>,
    selected_id: Option<String>,
    defaults: &'static [(&'static str, &'static str)],
}

impl Draft {
    /// An empty draft seeded with `defaults`.
    #[must_use]
    pub fn new(defaults: &'static [(&'static str, &'static str)]) -> Self {
        let mut draft = Self { fields: BTreeMap::new(), selected_id: None, defaults };
        draft.clear();
        draft
    }

    #[must_use]
    pub fn for_schema(schema: &RecordSchema) -> Self {
        Self::new(schema.defaults)
    }

    #[must_use]
    pub fn status(&self) -> DraftStatus {
        if self.selected_id.is_some() { DraftStatus::Selected } else { DraftStatus::Empty }
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Copy a row's editable fields and identifier into the draft.
    ///
    /// # Errors
    ///
    /// Returns a validation error (leaving the draft untouched) if the row has
    /// no identifier, since it could never be updated or deleted.
    pub fn select(&mut self, record: &Record, schema: &RecordSchema) -> Result<(), ActionError> {
        let id = record.value(schema.id_field()).trim();
        if id.is_empty() {
            return Err(ActionError::validation(format!(
                "{} has no {} and cannot be edited.",
                schema.kind.noun(),
                schema.id_field()
            )));
        }

        self.fields.clear();
        for field in schema.editable {
            let value = record.value(field);
            let value = match schema.default_for(field) {
                Some(default) if value.trim().is_empty() => default,
                _ => value,
            };
            self.fields.insert((*field).to_owned(), value.to_owned());
        }
        self.selected_id = Some(id.to_owned());
        debug!(kind = ?schema.kind, id, "draft: selected");
        Ok(())
    }

    /// Reset every field to its default and deselect.
    pub fn clear(&mut self) {
        self.fields.clear();
        for (field, value) in self.defaults {
            self.fields.insert((*field).to_owned(), (*value).to_owned());
        }
        self.selected_id = None;
    }

    pub fn set(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_owned(), value.to_owned());
    }

    /// Current value of a field, `""` when never set.
    #[must_use]
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map_or("", String::as_str)
    }

    /// Trimmed values for `fields`, as a record ready to send.
    #[must_use]
    pub fn values(&self, fields: &[&str]) -> Record {
        Record::from_pairs(fields.iter().map(|field| (*field, self.get(field).trim())))
    }

    /// Ensure every field in `required` has a non-blank value.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::Validation(message)` if any is blank.
    pub fn require_fields(&self, required: &[&str], message: &str) -> Result<(), ActionError> {
        if required.iter().any(|field| self.get(field).trim().is_empty()) {
            return Err(ActionError::validation(message));
        }
        Ok(())
    }

    /// The selected identifier, or a validation error carrying `message`.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::Validation(message)` when nothing is selected.
    pub fn require_selection(&self, message: &str) -> Result<&str, ActionError> {
        self.selected_id.as_deref().ok_or_else(|| ActionError::validation(message))
    }
}
