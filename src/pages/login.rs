//! Login page: email + password against the selected role tab.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use tracing::info;

use super::Route;
use crate::error::ActionError;
use crate::net::api::{CrmApi, Transport};
use crate::net::types::Role;
use crate::state::session::{Session, SessionStore};

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Please enter both email and password.";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials.";
pub const ACCESS_GRANTED_MESSAGE: &str = "Access granted. Redirecting...";

/// A completed sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub session: Session,
    pub route: Route,
    pub message: &'static str,
}

/// Trim both fields and require each to be non-empty.
///
/// # Errors
///
/// Returns [`MISSING_CREDENTIALS_MESSAGE`] if either is blank.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    let password = password.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_CREDENTIALS_MESSAGE);
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Sign in, persist the identity and pick the landing dashboard.
///
/// The dashboard follows the role the backend returns, not the tab the user
/// picked; the tab is only sent as a hint. Without a returned role the user
/// lands on the employee dashboard.
///
/// # Errors
///
/// Returns a validation error for blank input, the backend message (or
/// [`INVALID_CREDENTIALS_MESSAGE`]) on rejection, a network error, or a
/// storage error if the session cannot be saved.
pub async fn login<T: Transport>(
    api: &CrmApi<T>,
    store: &dyn SessionStore,
    email: &str,
    password: &str,
    role: Role,
) -> Result<LoginOutcome, ActionError> {
    let (email, password) = validate_login_input(email, password).map_err(ActionError::validation)?;

    let response = api
        .login(&email, &password, role)
        .await
        .map_err(|e| ActionError::from_api(e, INVALID_CREDENTIALS_MESSAGE))?;

    let session = Session {
        email: response.email.filter(|e| !e.trim().is_empty()).unwrap_or(email),
        full_name: response.full_name.unwrap_or_default(),
        role: response.role.as_deref().map_or(Role::Employee, Role::from_backend),
        phone: response.phone.unwrap_or_default(),
    };
    store.save(&session).map_err(|e| ActionError::Storage(e.to_string()))?;

    let route = Route::landing(session.role);
    info!(email = %session.email, role = %session.role, "login: signed in");
    Ok(LoginOutcome { session, route, message: ACCESS_GRANTED_MESSAGE })
}
