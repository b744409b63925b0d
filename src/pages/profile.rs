//! Profile section: show and edit the signed-in identity, change password,
//! log out.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use tracing::info;

use crate::error::{ActionError, REQUEST_FAILED_MESSAGE};
use crate::net::api::{CrmApi, Transport};
use crate::state::session::{Session, SessionStore};

pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully";
pub const PASSWORD_UPDATED_MESSAGE: &str = "Password updated successfully";

/// What the profile form shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&Session> for ProfileView {
    fn from(session: &Session) -> Self {
        Self {
            name: session.full_name.clone(),
            email: session.email.clone(),
            phone: session.phone.clone(),
        }
    }
}

/// Save name and phone, then mirror them into the stored session.
///
/// The email is the account key and cannot change here.
///
/// # Errors
///
/// Returns the backend or network error (session untouched), or a storage
/// error if the updated session cannot be saved.
pub async fn save_profile<T: Transport>(
    api: &CrmApi<T>,
    store: &dyn SessionStore,
    session: &mut Session,
    name: &str,
    phone: &str,
) -> Result<&'static str, ActionError> {
    let name = name.trim();
    let phone = phone.trim();
    api.update_employee_profile(&session.email, name, phone)
        .await
        .map_err(|e| ActionError::from_api(e, REQUEST_FAILED_MESSAGE))?;

    session.full_name = name.to_owned();
    session.phone = phone.to_owned();
    store.save(session).map_err(|e| ActionError::Storage(e.to_string()))?;
    info!(email = %session.email, "profile: updated");
    Ok(PROFILE_UPDATED_MESSAGE)
}

/// Change the password. A blank entry means the prompt was cancelled and
/// yields `Ok(None)` without a request.
///
/// # Errors
///
/// Returns the backend or network error.
pub async fn change_password<T: Transport>(
    api: &CrmApi<T>,
    session: &Session,
    new_password: &str,
) -> Result<Option<&'static str>, ActionError> {
    let new_password = new_password.trim();
    if new_password.is_empty() {
        return Ok(None);
    }
    api.change_password(&session.email, new_password)
        .await
        .map_err(|e| ActionError::from_api(e, REQUEST_FAILED_MESSAGE))?;
    info!(email = %session.email, "profile: password changed");
    Ok(Some(PASSWORD_UPDATED_MESSAGE))
}

/// Forget the stored session.
///
/// # Errors
///
/// Returns a storage error if the session cannot be removed.
pub fn logout(store: &dyn SessionStore) -> Result<(), ActionError> {
    store.clear().map_err(|e| ActionError::Storage(e.to_string()))?;
    info!("profile: logged out");
    Ok(())
}
