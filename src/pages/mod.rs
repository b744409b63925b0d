//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration over `state` and `net`. Pages
//! return outcomes and view models; the terminal adapter in `cli` decides how
//! to show them.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod dashboard;
pub mod forgot_access;
pub mod login;
pub mod profile;

use std::fmt;

use crate::net::types::Role;
use crate::state::session::{Session, SessionError, SessionStore};

/// Screens the client can land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    EmployeeDashboard,
    ManagerDashboard,
}

impl Route {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::EmployeeDashboard => "Employee dashboard",
            Self::ManagerDashboard => "Manager dashboard",
        }
    }

    /// Dashboard a role lands on after login.
    #[must_use]
    pub fn landing(role: Role) -> Self {
        match role {
            Role::Manager => Self::ManagerDashboard,
            Role::Employee => Self::EmployeeDashboard,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Why a protected route refused to open. Every variant redirects to login.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("not signed in; run `leadhq login` first")]
    NoSession,
    #[error("the {0} requires a manager account")]
    WrongRole(Route),
    #[error(transparent)]
    Store(#[from] SessionError),
}

/// Load the session a protected route needs.
///
/// The employee dashboard needs an email and role; the manager dashboard
/// needs the manager role. Public routes only require a readable store.
///
/// # Errors
///
/// Returns [`GuardError`] when the session is missing, incomplete, of the
/// wrong role, or unreadable.
pub fn require_session(store: &dyn SessionStore, route: Route) -> Result<Session, GuardError> {
    let session = store.load()?.ok_or(GuardError::NoSession)?;
    if session.email.trim().is_empty() {
        return Err(GuardError::NoSession);
    }
    if route == Route::ManagerDashboard && session.role != Role::Manager {
        return Err(GuardError::WrongRole(route));
    }
    Ok(session)
}
