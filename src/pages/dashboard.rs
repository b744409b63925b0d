//! Employee and manager dashboards.
//!
//! ARCHITECTURE
//! ============
//! A [`RecordPanel`] is one table plus its edit form: a [`RecordBrowser`], a
//! [`Draft`] and the [`RecordSchema`] that says which fields, columns and
//! rules apply. The employee dashboard owns one lead panel; the manager
//! dashboard adds an employee panel and the assignee options derived from it.
//!
//! Every operation takes `&mut self`, so a dashboard runs one action at a time
//! and only suspends while a request is in flight. Failed actions leave the
//! record set, criteria and draft exactly as they were.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::num::NonZeroUsize;

use tracing::{debug, info, warn};

use super::{GuardError, Route, require_session};
use crate::error::{ActionError, REQUEST_FAILED_MESSAGE};
use crate::net::api::{CrmApi, Transport};
use crate::net::types::{Record, Role};
use crate::state::browser::RecordBrowser;
use crate::state::draft::Draft;
use crate::state::filter::FilterCriteria;
use crate::state::schema::{RecordKind, RecordSchema};
use crate::state::session::{Session, SessionStore};
use crate::state::view::{TableView, render_table};

const ASSIGNEE_FIELD: &str = "AssignedTo";

// =============================================================================
// CONFIRMATION
// =============================================================================

/// Yes/no prompt shown before a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[must_use]
pub fn delete_prompt(kind: RecordKind) -> String {
    format!("Are you sure you want to delete this {}?", kind.noun().to_lowercase())
}

// =============================================================================
// ASSIGNEES
// =============================================================================

/// One choice for a lead's `AssignedTo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeOption {
    /// Employee email, stored on the lead.
    pub value: String,
    /// Display name, `FullName` falling back to `Name`.
    pub label: String,
}

/// Options derived from the employee list, skipping rows without an email.
#[must_use]
pub fn assignee_options(employees: &[Record]) -> Vec<AssigneeOption> {
    employees
        .iter()
        .filter(|employee| !employee.value("Email").trim().is_empty())
        .map(|employee| {
            let value = employee.value("Email").trim().to_owned();
            let label = match employee.value("FullName").trim() {
                "" => value.clone(),
                name => name.to_owned(),
            };
            AssigneeOption { value, label }
        })
        .collect()
}

// =============================================================================
// RECORD PANEL
// =============================================================================

/// One table and its edit form.
#[derive(Debug, Clone)]
pub struct RecordPanel {
    schema: RecordSchema,
    browser: RecordBrowser,
    draft: Draft,
}

impl RecordPanel {
    #[must_use]
    pub fn new(schema: RecordSchema, page_size: NonZeroUsize) -> Self {
        let draft = Draft::for_schema(&schema);
        Self { schema, browser: RecordBrowser::new(page_size), draft }
    }

    #[must_use]
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    #[must_use]
    pub fn kind(&self) -> RecordKind {
        self.schema.kind
    }

    #[must_use]
    pub fn browser(&self) -> &RecordBrowser {
        &self.browser
    }

    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Type into a form field. Fields outside the schema are rejected.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a field the form does not have.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), ActionError> {
        if !self.schema.is_editable(field) {
            return Err(ActionError::validation(format!(
                "{field} is not a {} form field.",
                self.schema.kind.noun().to_lowercase()
            )));
        }
        self.draft.set(field, value);
        Ok(())
    }

    #[must_use]
    pub fn view(&self) -> TableView {
        render_table(&self.browser, &self.schema)
    }

    /// Fetch the full record set for `session` and replace the current one.
    ///
    /// # Errors
    ///
    /// Returns the backend message or a network error; the previous record
    /// set is kept.
    pub async fn load<T: Transport>(&mut self, api: &CrmApi<T>, session: &Session) -> Result<usize, ActionError> {
        let records = api
            .list(self.schema.kind, &session.email, session.role)
            .await
            .map_err(|e| ActionError::from_api(e, REQUEST_FAILED_MESSAGE))?;
        let count = records.len();
        self.browser.replace(records);
        info!(kind = %self.schema.kind, records = count, "panel: loaded");
        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns a validation error when `page` is out of range.
    pub fn go_to_page(&mut self, page: usize) -> Result<usize, ActionError> {
        self.browser.go_to(page).map_err(|e| ActionError::validation(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns a validation error on the last page.
    pub fn next_page(&mut self) -> Result<usize, ActionError> {
        self.browser.next().map_err(|e| ActionError::validation(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns a validation error on the first page.
    pub fn prev_page(&mut self) -> Result<usize, ActionError> {
        self.browser.prev().map_err(|e| ActionError::validation(e.to_string()))
    }

    // -------------------------------------------------------------------------
    // Selection and search
    // -------------------------------------------------------------------------

    /// Select the `row`th record (1-based) of the current page.
    ///
    /// # Errors
    ///
    /// Returns a validation error if there is no such row or it has no
    /// identifier.
    pub fn select_row(&mut self, row: usize) -> Result<(), ActionError> {
        let items = self.browser.page_items();
        let record = row
            .checked_sub(1)
            .and_then(|index| items.get(index))
            .ok_or_else(|| ActionError::validation(format!("There is no row {row} on this page.")))?;
        self.draft.select(record, &self.schema)
    }

    /// Select the fetched record with identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no fetched record has that identifier.
    pub fn select_id(&mut self, id: &str) -> Result<(), ActionError> {
        let record = self
            .browser
            .find(self.schema.id_field(), id.trim())
            .ok_or_else(|| ActionError::validation(format!("{} not found.", self.schema.kind.noun())))?;
        self.draft.select(record, &self.schema)
    }

    /// Filter the table by the draft's searchable fields. Every non-blank
    /// value is a criterion, including a field still at its default.
    ///
    /// A single match is also selected into the form. When nothing matches,
    /// the table is left as it was.
    ///
    /// # Errors
    ///
    /// Returns "Lead not found." / "Employee not found." when nothing matches.
    pub fn search(&mut self) -> Result<usize, ActionError> {
        let mut criteria = FilterCriteria::new();
        for field in self.schema.searchable {
            criteria.set(field, self.draft.get(field));
        }

        let matched = self.browser.records().iter().filter(|record| criteria.matches(record)).count();
        if matched == 0 {
            return Err(ActionError::validation(format!("{} not found.", self.schema.kind.noun())));
        }

        self.browser.set_criteria(criteria);
        if matched == 1 {
            let only = self.browser.filtered().next().cloned();
            if let Some(record) = only {
                if let Err(e) = self.draft.select(&record, &self.schema) {
                    debug!(error = %e, "panel: single match is not selectable");
                }
            }
        }
        debug!(kind = %self.schema.kind, matched, "panel: search applied");
        Ok(matched)
    }

    /// Reset the form, drop the search and return to page 1.
    pub fn clear(&mut self) {
        self.draft.clear();
        self.browser.clear_criteria();
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Send the draft as a new record, then clear and reload.
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing required fields or an unknown
    /// assignee, or the backend/network error from the create.
    pub async fn submit_create<T: Transport>(
        &mut self,
        api: &CrmApi<T>,
        session: &Session,
        assignees: &[AssigneeOption],
    ) -> Result<String, ActionError> {
        self.draft.require_fields(self.schema.required, self.schema.required_message)?;

        let mut record = self.draft.values(self.schema.editable);
        if let Some(owner) = self.schema.owner_field {
            record.insert(owner, session.email.as_str());
        }
        for (field, value) in self.schema.create_extras {
            record.insert(*field, *value);
        }
        self.check_assignee(&record, assignees)?;

        api.create(self.schema.kind, &record)
            .await
            .map_err(|e| ActionError::from_api(e, REQUEST_FAILED_MESSAGE))?;
        info!(kind = %self.schema.kind, "panel: created");
        Ok(self.finish(api, session, "added").await)
    }

    /// Send the draft over the selected record, then clear and reload.
    ///
    /// # Errors
    ///
    /// Returns a validation error when nothing is selected or the assignee is
    /// unknown, or the backend/network error from the update.
    pub async fn submit_update<T: Transport>(
        &mut self,
        api: &CrmApi<T>,
        session: &Session,
        assignees: &[AssigneeOption],
    ) -> Result<String, ActionError> {
        let id = self
            .draft
            .require_selection(&format!("Select {} to update.", self.schema.kind.with_article()))?
            .to_owned();

        let record = self.draft.values(self.schema.editable);
        self.check_assignee(&record, assignees)?;

        api.update(self.schema.kind, &id, &record)
            .await
            .map_err(|e| ActionError::from_api(e, REQUEST_FAILED_MESSAGE))?;
        info!(kind = %self.schema.kind, %id, "panel: updated");
        Ok(self.finish(api, session, "updated").await)
    }

    /// Delete the selected record after confirmation.
    ///
    /// Returns `Ok(None)` when the user declines.
    ///
    /// # Errors
    ///
    /// Returns a validation error when nothing is selected, or the
    /// backend/network error from the delete.
    pub async fn submit_delete<T: Transport>(
        &mut self,
        api: &CrmApi<T>,
        session: &Session,
        confirm: &mut dyn Confirm,
    ) -> Result<Option<String>, ActionError> {
        let id = self
            .draft
            .require_selection(&format!("Select {} to delete.", self.schema.kind.with_article()))?
            .to_owned();

        if !confirm.confirm(&delete_prompt(self.schema.kind)) {
            debug!(kind = %self.schema.kind, %id, "panel: delete declined");
            return Ok(None);
        }

        api.delete(self.schema.kind, &id)
            .await
            .map_err(|e| ActionError::from_api(e, REQUEST_FAILED_MESSAGE))?;
        info!(kind = %self.schema.kind, %id, "panel: deleted");
        Ok(Some(self.finish(api, session, "deleted").await))
    }

    /// Clear the form and reload after a successful mutation.
    ///
    /// A failed reload keeps the stale table; the mutation itself succeeded.
    async fn finish<T: Transport>(&mut self, api: &CrmApi<T>, session: &Session, verb: &str) -> String {
        self.draft.clear();
        if let Err(e) = self.load(api, session).await {
            warn!(kind = %self.schema.kind, error = %e, "panel: reload after {verb} failed");
        }
        format!("{} {verb} successfully.", self.schema.kind.noun())
    }

    fn check_assignee(&self, record: &Record, assignees: &[AssigneeOption]) -> Result<(), ActionError> {
        if self.schema.kind != RecordKind::Lead || self.schema.role != Role::Manager {
            return Ok(());
        }
        let assigned = record.value(ASSIGNEE_FIELD);
        if assigned.is_empty() || assignees.iter().any(|option| option.value == assigned) {
            return Ok(());
        }
        Err(ActionError::validation(format!("{assigned} is not an employee that leads can be assigned to.")))
    }
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// A signed-in dashboard: the lead panel, plus the employee panel for managers.
#[derive(Debug, Clone)]
pub struct Dashboard {
    session: Session,
    route: Route,
    leads: RecordPanel,
    employees: Option<RecordPanel>,
    assignees: Vec<AssigneeOption>,
}

impl Dashboard {
    /// Open the dashboard `route` for the stored session.
    ///
    /// A manager opening the employee dashboard gets the employee view.
    ///
    /// # Errors
    ///
    /// Returns a [`GuardError`] if the session is missing or the role is wrong.
    pub fn open(store: &dyn SessionStore, route: Route, page_size: NonZeroUsize) -> Result<Self, GuardError> {
        let session = require_session(store, route)?;
        let view_role = if route == Route::ManagerDashboard { Role::Manager } else { Role::Employee };
        Ok(Self::for_session(session, view_role, page_size))
    }

    /// Build the panels `view_role` sees, without consulting a store.
    #[must_use]
    pub fn for_session(session: Session, view_role: Role, page_size: NonZeroUsize) -> Self {
        let employees = (view_role == Role::Manager).then(|| RecordPanel::new(RecordSchema::employees(), page_size));
        Self {
            session,
            route: Route::landing(view_role),
            leads: RecordPanel::new(RecordSchema::leads(view_role), page_size),
            employees,
            assignees: Vec::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub fn assignees(&self) -> &[AssigneeOption] {
        &self.assignees
    }

    /// Record kinds this dashboard manages, in display order.
    #[must_use]
    pub fn kinds(&self) -> Vec<RecordKind> {
        let mut kinds = vec![RecordKind::Lead];
        if self.employees.is_some() {
            kinds.push(RecordKind::Employee);
        }
        kinds
    }

    #[must_use]
    pub fn panel(&self, kind: RecordKind) -> Option<&RecordPanel> {
        match kind {
            RecordKind::Lead => Some(&self.leads),
            RecordKind::Employee => self.employees.as_ref(),
        }
    }

    /// # Errors
    ///
    /// Returns a validation error if this dashboard has no `kind` panel.
    pub fn panel_mut(&mut self, kind: RecordKind) -> Result<&mut RecordPanel, ActionError> {
        match kind {
            RecordKind::Lead => Ok(&mut self.leads),
            RecordKind::Employee => self.employees.as_mut().ok_or_else(|| missing_panel(kind)),
        }
    }

    /// Load everything: employees (and assignee options) first, then leads.
    ///
    /// Both loads are attempted; the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the first backend or network error.
    pub async fn init<T: Transport>(&mut self, api: &CrmApi<T>) -> Result<(), ActionError> {
        let employees = if self.employees.is_some() { self.reload(api, RecordKind::Employee).await } else { Ok(0) };
        let leads = self.reload(api, RecordKind::Lead).await;
        employees.and(leads).map(|_| ())
    }

    /// Re-fetch one panel. Employee reloads rebuild the assignee options.
    ///
    /// # Errors
    ///
    /// Returns the backend or network error; prior state is kept.
    pub async fn reload<T: Transport>(&mut self, api: &CrmApi<T>, kind: RecordKind) -> Result<usize, ActionError> {
        let (panel, session, _) = self.split(kind)?;
        let count = panel.load(api, session).await?;
        self.refresh_assignees(kind);
        Ok(count)
    }

    /// # Errors
    ///
    /// See [`RecordPanel::submit_create`].
    pub async fn create<T: Transport>(&mut self, api: &CrmApi<T>, kind: RecordKind) -> Result<String, ActionError> {
        let (panel, session, assignees) = self.split(kind)?;
        let notice = panel.submit_create(api, session, assignees).await?;
        self.refresh_assignees(kind);
        Ok(notice)
    }

    /// # Errors
    ///
    /// See [`RecordPanel::submit_update`].
    pub async fn update<T: Transport>(&mut self, api: &CrmApi<T>, kind: RecordKind) -> Result<String, ActionError> {
        let (panel, session, assignees) = self.split(kind)?;
        let notice = panel.submit_update(api, session, assignees).await?;
        self.refresh_assignees(kind);
        Ok(notice)
    }

    /// # Errors
    ///
    /// See [`RecordPanel::submit_delete`].
    pub async fn delete<T: Transport>(
        &mut self,
        api: &CrmApi<T>,
        kind: RecordKind,
        confirm: &mut dyn Confirm,
    ) -> Result<Option<String>, ActionError> {
        let (panel, session, _) = self.split(kind)?;
        let notice = panel.submit_delete(api, session, confirm).await?;
        self.refresh_assignees(kind);
        Ok(notice)
    }

    fn split(&mut self, kind: RecordKind) -> Result<(&mut RecordPanel, &Session, &[AssigneeOption]), ActionError> {
        let panel = match kind {
            RecordKind::Lead => &mut self.leads,
            RecordKind::Employee => self.employees.as_mut().ok_or_else(|| missing_panel(kind))?,
        };
        Ok((panel, &self.session, &self.assignees))
    }

    fn refresh_assignees(&mut self, kind: RecordKind) {
        if kind != RecordKind::Employee {
            return;
        }
        if let Some(panel) = &self.employees {
            self.assignees = assignee_options(panel.browser().records());
            debug!(options = self.assignees.len(), "dashboard: assignees rebuilt");
        }
    }
}

fn missing_panel(kind: RecordKind) -> ActionError {
    ActionError::validation(format!("The {} panel is only available on the manager dashboard.", kind.noun().to_lowercase()))
}
