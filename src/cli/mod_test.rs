use std::io::Cursor;

use serde_json::json;

use super::*;
use crate::net::test_helpers::MockTransport;
use crate::net::types::Action;
use crate::state::session::{MemorySessionStore, Session};

const ENDPOINT: &str = "https://crm.test/exec";

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["leadhq", "--api-url", ENDPOINT, "--page-size", "10", "--session-file", "/tmp/leadhq-cli-test.json"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn config() -> Config {
    Config::new(ENDPOINT, 10, Some(PathBuf::from("/tmp/leadhq-cli-test.json"))).unwrap()
}

fn signed_in(role: Role) -> MemorySessionStore {
    MemorySessionStore::with_session(Session {
        email: "me@x.io".to_owned(),
        full_name: "Me".to_owned(),
        role,
        phone: String::new(),
    })
}

async fn exec(
    api: &CrmApi<MockTransport>,
    store: &dyn SessionStore,
    args: &[&str],
    stdin: &str,
) -> (Result<(), CliError>, String) {
    let mut out = Vec::new();
    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let result = execute(&config(), api, store, parse(args).command, &mut out, &mut input).await;
    (result, String::from_utf8(out).unwrap())
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn cli_parses_list_with_search_terms() {
    let cli = parse(&["leads", "list", "--page", "2", "--search", "Status=new", "--search", "Source=web"]);
    assert_eq!(
        cli.command,
        Command::Leads(RecordCommand {
            command: RecordSubcommand::List {
                page: 2,
                search: vec!["Status=new".to_owned(), "Source=web".to_owned()],
            }
        })
    );
}

#[test]
fn cli_login_role_defaults_to_employee() {
    let cli = parse(&["login", "--email", "a@b.c", "--password", "pw"]);
    assert!(matches!(cli.command, Command::Login { role: Role::Employee, .. }));

    let cli = parse(&["login", "--email", "a@b.c", "--password", "pw", "--role", "manager"]);
    assert!(matches!(cli.command, Command::Login { role: Role::Manager, .. }));
}

#[test]
fn cli_rejects_zero_page_size() {
    let result = Cli::try_parse_from(["leadhq", "--api-url", ENDPOINT, "--page-size", "0", "whoami"]);
    assert!(result.is_err());
}

#[test]
fn cli_config_uses_flags() {
    let cli = parse(&["whoami"]);
    let config = cli.config().unwrap();
    assert_eq!(config.api_url, ENDPOINT);
    assert_eq!(config.session_file, PathBuf::from("/tmp/leadhq-cli-test.json"));
}

#[test]
fn parse_field_splits_on_first_equals() {
    assert_eq!(parse_field("Notes=a=b").unwrap(), ("Notes".to_owned(), "a=b".to_owned()));
    assert_eq!(parse_field("Phone=").unwrap(), ("Phone".to_owned(), String::new()));
    assert!(matches!(parse_field("novalue"), Err(CliError::InvalidField(_))));
    assert!(matches!(parse_field("=x"), Err(CliError::InvalidField(_))));
}

// =============================================================
// Commands
// =============================================================

#[tokio::test]
async fn login_reports_access_and_route() {
    let api = CrmApi::new(MockTransport::new());
    api.transport().reply(json!({ "success": true, "email": "mia@x.io", "fullName": "Mia", "role": "manager" }));
    let store = MemorySessionStore::new();

    let (result, out) = exec(&api, &store, &["login", "--email", "mia@x.io", "--password", "pw"], "").await;
    result.unwrap();
    assert!(out.starts_with("Access granted. Redirecting...\n"));
    assert!(out.contains("Manager dashboard"));
    assert_eq!(store.load().unwrap().map(|s| s.role), Some(Role::Manager));
}

#[tokio::test]
async fn whoami_without_session() {
    let api = CrmApi::new(MockTransport::new());
    let (result, out) = exec(&api, &MemorySessionStore::new(), &["whoami"], "").await;
    result.unwrap();
    assert_eq!(out, "Not signed in.\n");
}

#[tokio::test]
async fn leads_list_renders_requested_page() {
    let api = CrmApi::new(MockTransport::new());
    let leads: Vec<_> = (1..=12).map(|i| json!({ "LeadID": format!("L{i}"), "FullName": format!("Lead {i}") })).collect();
    api.transport().reply(json!({ "success": true, "leads": leads }));

    let (result, out) = exec(&api, &signed_in(Role::Employee), &["leads", "list", "--page", "2"], "").await;
    result.unwrap();
    assert!(out.contains("L11"));
    assert!(!out.contains("L10 "));
    assert!(out.contains("< 1 [2]"));
}

#[tokio::test]
async fn leads_list_out_of_range_page_is_an_error() {
    let api = CrmApi::new(MockTransport::new());
    let (result, _) = exec(&api, &signed_in(Role::Employee), &["leads", "list", "--page", "4"], "").await;
    assert!(matches!(result, Err(CliError::Action(ActionError::Validation(_)))));
}

#[tokio::test]
async fn employees_require_manager() {
    let api = CrmApi::new(MockTransport::new());
    let (result, _) = exec(&api, &signed_in(Role::Employee), &["employees", "list"], "").await;
    assert!(matches!(result, Err(CliError::Guard(GuardError::WrongRole(_)))));
    assert_eq!(api.transport().request_count(), 0);
}

#[tokio::test]
async fn leads_add_sends_fields() {
    let api = CrmApi::new(MockTransport::new());
    let (result, out) = exec(
        &api,
        &signed_in(Role::Employee),
        &["leads", "add", "-f", "FullName=Ada", "-f", "Email=ada@x.io"],
        "",
    )
    .await;
    result.unwrap();
    assert_eq!(out, "Lead added successfully.\n");
    assert_eq!(api.transport().actions(), [Action::GetLeads, Action::AddLead, Action::GetLeads]);
}

#[tokio::test]
async fn delete_prompts_and_honours_no() {
    let api = CrmApi::new(MockTransport::new());
    api.transport().reply(json!({ "success": true, "leads": [{ "LeadID": "L1", "FullName": "Ada" }] }));

    let (result, out) = exec(&api, &signed_in(Role::Employee), &["leads", "delete", "L1"], "n\n").await;
    result.unwrap();
    assert!(out.starts_with("Are you sure you want to delete this lead? [y/N] "));
    assert!(out.ends_with("Delete cancelled.\n"));
    assert_eq!(api.transport().actions(), [Action::GetLeads]);
}

#[tokio::test]
async fn delete_with_yes_skips_prompt() {
    let api = CrmApi::new(MockTransport::new());
    api.transport().reply(json!({ "success": true, "leads": [{ "LeadID": "L1", "FullName": "Ada" }] }));

    let (result, out) = exec(&api, &signed_in(Role::Employee), &["leads", "delete", "L1", "--yes"], "").await;
    result.unwrap();
    assert_eq!(out, "Lead deleted successfully.\n");
    assert_eq!(api.transport().actions(), [Action::GetLeads, Action::DeleteLead, Action::GetLeads]);
}

#[tokio::test]
async fn password_prompt_blank_cancels() {
    let api = CrmApi::new(MockTransport::new());
    let (result, out) = exec(&api, &signed_in(Role::Employee), &["profile", "password"], "\n").await;
    result.unwrap();
    assert_eq!(out, "New password: Password change cancelled.\n");
    assert_eq!(api.transport().request_count(), 0);
}

#[tokio::test]
async fn logout_clears_session() {
    let api = CrmApi::new(MockTransport::new());
    let store = signed_in(Role::Manager);
    let (result, out) = exec(&api, &store, &["logout"], "").await;
    result.unwrap();
    assert_eq!(out, "Signed out.\n");
    assert_eq!(store.load().unwrap(), None);
}
