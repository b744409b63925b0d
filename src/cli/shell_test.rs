use std::io::Cursor;
use std::num::NonZeroUsize;

use serde_json::json;

use super::*;
use crate::net::test_helpers::MockTransport;
use crate::net::types::{Action, Role};
use crate::state::session::Session;

fn dashboard(role: Role) -> Dashboard {
    let session = Session {
        email: "me@x.io".to_owned(),
        full_name: "Me".to_owned(),
        role,
        phone: String::new(),
    };
    Dashboard::for_session(session, role, NonZeroUsize::new(10).unwrap())
}

fn twelve_leads() -> serde_json::Value {
    let leads: Vec<_> = (1..=12)
        .map(|i| json!({ "LeadID": format!("L{i}"), "FullName": format!("Lead {i}"), "Status": "New" }))
        .collect();
    json!({ "success": true, "leads": leads })
}

async fn script(dashboard: &mut Dashboard, api: &CrmApi<MockTransport>, lines: &str) -> String {
    let mut out = Vec::new();
    let mut input = Cursor::new(lines.as_bytes().to_vec());
    run_shell(dashboard, api, &mut out, &mut input).await.unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================
// parse_shell_command
// =============================================================

#[test]
fn parses_words_and_aliases() {
    assert_eq!(parse_shell_command("  "), Ok(ShellCommand::Empty));
    assert_eq!(parse_shell_command("?"), Ok(ShellCommand::Help));
    assert_eq!(parse_shell_command("LIST"), Ok(ShellCommand::Show));
    assert_eq!(parse_shell_command("n"), Ok(ShellCommand::Next));
    assert_eq!(parse_shell_command("exit"), Ok(ShellCommand::Quit));
    assert_eq!(parse_shell_command("employees"), Ok(ShellCommand::Switch(RecordKind::Employee)));
    assert_eq!(parse_shell_command("page 3"), Ok(ShellCommand::Page(3)));
    assert_eq!(parse_shell_command("pick L-7"), Ok(ShellCommand::Pick("L-7".to_owned())));
}

#[test]
fn set_keeps_spaces_in_value() {
    assert_eq!(
        parse_shell_command("set FullName Ada  Lovelace"),
        Ok(ShellCommand::Set { field: "FullName".to_owned(), value: "Ada  Lovelace".to_owned() })
    );
    assert_eq!(
        parse_shell_command("set Phone"),
        Ok(ShellCommand::Set { field: "Phone".to_owned(), value: String::new() })
    );
}

#[test]
fn bad_arguments_return_usage() {
    assert_eq!(parse_shell_command("page"), Err("usage: page N".to_owned()));
    assert_eq!(parse_shell_command("select two"), Err("usage: select N".to_owned()));
    assert_eq!(parse_shell_command("pick"), Err("usage: pick ID".to_owned()));
    assert_eq!(parse_shell_command("set"), Err("usage: set FIELD VALUE".to_owned()));
    assert_eq!(parse_shell_command("frobnicate"), Err("unknown command `frobnicate`; type `help`".to_owned()));
}

// =============================================================
// ask_yes_no
// =============================================================

#[test]
fn yes_no_accepts_only_yes() {
    for (answer, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("\n", false), ("", false)] {
        let mut out = Vec::new();
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        assert_eq!(ask_yes_no(&mut out, &mut input, "Sure?"), expected, "answer {answer:?}");
        assert_eq!(String::from_utf8(out).unwrap(), "Sure? [y/N] ");
    }
}

// =============================================================
// run_shell
// =============================================================

#[tokio::test]
async fn pages_and_selects_rows() {
    let api = CrmApi::new(MockTransport::new());
    api.transport().reply(twelve_leads());
    let mut dashboard = dashboard(Role::Employee);

    let out = script(&mut dashboard, &api, "next\nselect 1\nquit\n").await;

    assert!(out.starts_with("Employee dashboard for Me (me@x.io)\n"));
    assert!(out.contains("L11"));
    assert!(out.contains("editing LeadID L11\n"));
    assert!(out.contains("  FullName: Lead 11\n"));
    assert_eq!(dashboard.panel(RecordKind::Lead).unwrap().draft().selected_id(), Some("L11"));
}

#[tokio::test]
async fn errors_are_printed_and_the_loop_continues() {
    let api = CrmApi::new(MockTransport::new());
    api.transport().reply(twelve_leads());
    let mut dashboard = dashboard(Role::Employee);

    let out = script(&mut dashboard, &api, "employees\nupdate\nbogus\nprev\n").await;

    assert!(out.contains("error: The employee panel is only available on the manager dashboard.\n"));
    assert!(out.contains("error: Select a lead to update.\n"));
    assert!(out.contains("unknown command `bogus`; type `help`\n"));
    assert_eq!(api.transport().actions(), [Action::GetLeads]);
}

#[tokio::test]
async fn delete_asks_before_sending() {
    let api = CrmApi::new(MockTransport::new());
    api.transport().reply(twelve_leads());
    let mut dashboard = dashboard(Role::Employee);

    let out = script(&mut dashboard, &api, "pick L3\ndelete\nn\ndelete\ny\nq\n").await;

    assert!(out.contains("Are you sure you want to delete this lead? [y/N] "));
    assert!(out.contains("Lead deleted successfully.\n"));
    assert_eq!(api.transport().actions(), [Action::GetLeads, Action::DeleteLead, Action::GetLeads]);
}

#[tokio::test]
async fn manager_switches_to_employees() {
    let api = CrmApi::new(MockTransport::new());
    api.transport()
        .reply(json!({ "success": true, "employees": [{ "Id": "E1", "FullName": "Eve", "Email": "eve@x.io" }] }))
        .reply(json!({ "success": true, "leads": [] }));
    let mut dashboard = dashboard(Role::Manager);

    let out = script(&mut dashboard, &api, "assignees\nemployees\n").await;

    assert!(out.starts_with("Manager dashboard for Me (me@x.io)\n"));
    assert!(out.contains("No leads to show.\n"));
    assert!(out.contains("  Eve <eve@x.io>\n"));
    assert!(out.contains("employees> "));
    assert!(out.contains("E1"));
}
