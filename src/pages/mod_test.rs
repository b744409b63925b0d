use super::*;
use crate::state::session::MemorySessionStore;

fn session(role: Role) -> Session {
    Session {
        email: "someone@x.io".to_owned(),
        full_name: "Someone".to_owned(),
        role,
        phone: String::new(),
    }
}

#[test]
fn landing_route_follows_role() {
    assert_eq!(Route::landing(Role::Manager), Route::ManagerDashboard);
    assert_eq!(Route::landing(Role::Employee), Route::EmployeeDashboard);
}

#[test]
fn missing_session_redirects_to_login() {
    let err = require_session(&MemorySessionStore::new(), Route::EmployeeDashboard).unwrap_err();
    assert!(matches!(err, GuardError::NoSession));
    assert!(err.to_string().contains("leadhq login"));
}

#[test]
fn blank_email_counts_as_signed_out() {
    let mut blank = session(Role::Employee);
    blank.email = "  ".to_owned();
    let store = MemorySessionStore::with_session(blank);
    assert!(matches!(require_session(&store, Route::EmployeeDashboard), Err(GuardError::NoSession)));
}

#[test]
fn employee_cannot_open_manager_dashboard() {
    let store = MemorySessionStore::with_session(session(Role::Employee));
    let err = require_session(&store, Route::ManagerDashboard).unwrap_err();
    assert!(matches!(err, GuardError::WrongRole(Route::ManagerDashboard)));
    assert_eq!(err.to_string(), "the Manager dashboard requires a manager account");
}

#[test]
fn manager_can_open_both_dashboards() {
    let store = MemorySessionStore::with_session(session(Role::Manager));
    assert!(require_session(&store, Route::ManagerDashboard).is_ok());
    assert!(require_session(&store, Route::EmployeeDashboard).is_ok());
}
