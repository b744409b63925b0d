//! Forgot-access page: ask a manager to reset a password.

#[cfg(test)]
#[path = "forgot_access_test.rs"]
mod forgot_access_test;

use tracing::info;

use crate::error::ActionError;
use crate::net::api::{CrmApi, Transport};

pub const MISSING_EMAIL_MESSAGE: &str = "Please enter the email you use to log in.";
pub const RESET_SENT_MESSAGE: &str = "Your reset request has been sent to your manager.";
pub const UNKNOWN_EMAIL_MESSAGE: &str = "We could not find that email. Please check and try again.";
pub const RESET_NETWORK_MESSAGE: &str = "Network error. Please try again in a moment.";

/// # Errors
///
/// Returns [`MISSING_EMAIL_MESSAGE`] for a blank email.
pub fn validate_reset_email(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err(MISSING_EMAIL_MESSAGE);
    }
    Ok(email.to_owned())
}

/// Send the reset request and return the notice to show.
///
/// # Errors
///
/// Returns a validation error for a blank email, the backend message (or
/// [`UNKNOWN_EMAIL_MESSAGE`]) on rejection, or [`RESET_NETWORK_MESSAGE`].
pub async fn request_reset<T: Transport>(api: &CrmApi<T>, email: &str) -> Result<String, ActionError> {
    let email = validate_reset_email(email).map_err(ActionError::validation)?;
    let message = api
        .request_password_reset(&email)
        .await
        .map_err(|e| ActionError::from_api_with(e, UNKNOWN_EMAIL_MESSAGE, RESET_NETWORK_MESSAGE))?;
    info!(%email, "forgot-access: reset requested");
    Ok(message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| RESET_SENT_MESSAGE.to_owned()))
}
