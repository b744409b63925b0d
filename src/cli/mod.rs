//! Terminal adapter: `clap` commands bound to pages.
//!
//! ARCHITECTURE
//! ============
//! [`Cli`] resolves a [`Config`] (flags, then env vars, then defaults), and
//! [`execute`] runs one command against any [`Transport`] and
//! [`SessionStore`], writing to a caller-supplied output. `main` passes the
//! real HTTP transport, the session file and stdio.

pub mod render;
pub mod shell;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{self, Config, ConfigError, DEFAULT_PAGE_SIZE};
use crate::error::ActionError;
use crate::net::api::{CrmApi, HttpTransport, Transport};
use crate::net::types::{ApiError, Role};
use crate::pages::dashboard::Dashboard;
use crate::pages::profile::ProfileView;
use crate::pages::{GuardError, Route, forgot_access, login, profile, require_session};
use crate::state::schema::RecordKind;
use crate::state::session::{FileSessionStore, SessionStore};
use render::{render_profile, render_table};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Guard(#[from] GuardError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("invalid field `{0}` (expected FIELD=VALUE)")]
    InvalidField(String),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "leadhq", about = "Lead and employee records from the HQ CRM endpoint")]
pub struct Cli {
    /// Script endpoint every action is posted to.
    #[arg(long, env = config::API_URL_VAR)]
    pub api_url: Option<String>,

    /// Rows per table page.
    #[arg(long, env = config::PAGE_SIZE_VAR, default_value_t = DEFAULT_PAGE_SIZE, value_parser = config::parse_page_size)]
    pub page_size: usize,

    /// Where the signed-in identity is kept between invocations.
    #[arg(long, env = config::SESSION_FILE_VAR)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the endpoint is missing or invalid.
    pub fn config(&self) -> Result<Config, ConfigError> {
        Config::new(self.api_url.as_deref().unwrap_or_default(), self.page_size, self.session_file.clone())
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in and remember the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LEADHQ_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value_t = Role::Employee)]
        role: Role,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in profile.
    Whoami,
    /// Ask a manager to reset your password.
    ForgotAccess {
        #[arg(long)]
        email: String,
    },
    /// Manage leads.
    Leads(RecordCommand),
    /// Manage employees (manager only).
    Employees(RecordCommand),
    /// View or edit your profile.
    Profile(ProfileCommand),
    /// Interactive dashboard.
    Shell,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RecordCommand {
    #[command(subcommand)]
    pub command: RecordSubcommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RecordSubcommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// FIELD=VALUE substring filter; repeat to narrow.
        #[arg(long = "search", value_name = "FIELD=VALUE")]
        search: Vec<String>,
    },
    Add {
        #[arg(long = "field", short = 'f', value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    Update {
        id: String,
        #[arg(long = "field", short = 'f', value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ProfileSubcommand {
    Show,
    Save {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    Password {
        /// Prompted for when omitted; a blank answer cancels.
        #[arg(long, env = "LEADHQ_NEW_PASSWORD", hide_env_values = true)]
        new_password: Option<String>,
    },
}

/// Parse the command line, build the real transport and store, and run.
///
/// # Errors
///
/// Returns a [`CliError`] for bad configuration, guard failures, action
/// failures, or terminal I/O errors.
pub async fn run(cli: Cli, out: &mut dyn Write, input: &mut dyn BufRead) -> Result<(), CliError> {
    let config = cli.config()?;
    let api = CrmApi::new(HttpTransport::new(&config.api_url)?);
    let store = FileSessionStore::new(config.session_file.clone());
    execute(&config, &api, &store, cli.command, out, input).await
}

/// Run one command.
///
/// # Errors
///
/// See [`run`].
pub async fn execute<T: Transport>(
    config: &Config,
    api: &CrmApi<T>,
    store: &dyn SessionStore,
    command: Command,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<(), CliError> {
    match command {
        Command::Login { email, password, role } => {
            let outcome = login::login(api, store, &email, &password, role).await?;
            writeln!(out, "{}", outcome.message)?;
            writeln!(out, "Signed in as {} ({}). Next: {}.", outcome.session.full_name, outcome.session.role, outcome.route)?;
        }
        Command::Logout => {
            profile::logout(store)?;
            writeln!(out, "Signed out.")?;
        }
        Command::Whoami => match store.load().map_err(GuardError::from)? {
            Some(session) => {
                write!(out, "{}", render_profile(&ProfileView::from(&session)))?;
                writeln!(out, "Role:  {}", session.role)?;
            }
            None => writeln!(out, "Not signed in.")?,
        },
        Command::ForgotAccess { email } => {
            let notice = forgot_access::request_reset(api, &email).await?;
            writeln!(out, "{notice}")?;
        }
        Command::Leads(records) => run_records(config, api, store, RecordKind::Lead, records.command, out, input).await?,
        Command::Employees(records) => {
            run_records(config, api, store, RecordKind::Employee, records.command, out, input).await?;
        }
        Command::Profile(profile) => run_profile(api, store, profile.command, out, input).await?,
        Command::Shell => {
            let mut dashboard = open_dashboard(config, store, RecordKind::Lead)?;
            shell::run_shell(&mut dashboard, api, out, input).await?;
        }
    }
    Ok(())
}

/// The dashboard that manages `kind` for the stored session.
///
/// Leads open on the session role's own dashboard; employees need the
/// manager dashboard.
///
/// # Errors
///
/// Returns a [`GuardError`] if the session is missing or lacks the role.
pub fn open_dashboard(config: &Config, store: &dyn SessionStore, kind: RecordKind) -> Result<Dashboard, GuardError> {
    let route = match kind {
        RecordKind::Employee => Route::ManagerDashboard,
        RecordKind::Lead => Route::landing(require_session(store, Route::EmployeeDashboard)?.role),
    };
    Dashboard::open(store, route, config.page_size)
}

/// Split `FIELD=VALUE`.
///
/// # Errors
///
/// Returns [`CliError::InvalidField`] when there is no `=` or no field name.
pub fn parse_field(raw: &str) -> Result<(String, String), CliError> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok((field.trim().to_owned(), value.to_owned())),
        _ => Err(CliError::InvalidField(raw.to_owned())),
    }
}

async fn run_records<T: Transport>(
    config: &Config,
    api: &CrmApi<T>,
    store: &dyn SessionStore,
    kind: RecordKind,
    command: RecordSubcommand,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<(), CliError> {
    let mut dashboard = open_dashboard(config, store, kind)?;

    match command {
        RecordSubcommand::List { page, search } => {
            dashboard.reload(api, kind).await?;
            let panel = dashboard.panel_mut(kind)?;
            if !search.is_empty() {
                for raw in &search {
                    let (field, value) = parse_field(raw)?;
                    panel.set_field(&field, &value)?;
                }
                panel.search()?;
            }
            panel.go_to_page(page)?;
            write!(out, "{}", render_table(&panel.view(), kind))?;
        }
        RecordSubcommand::Add { fields } => {
            dashboard.init(api).await?;
            fill(&mut dashboard, kind, &fields)?;
            let notice = dashboard.create(api, kind).await?;
            writeln!(out, "{notice}")?;
        }
        RecordSubcommand::Update { id, fields } => {
            dashboard.init(api).await?;
            dashboard.panel_mut(kind)?.select_id(&id)?;
            fill(&mut dashboard, kind, &fields)?;
            let notice = dashboard.update(api, kind).await?;
            writeln!(out, "{notice}")?;
        }
        RecordSubcommand::Delete { id, yes } => {
            dashboard.reload(api, kind).await?;
            dashboard.panel_mut(kind)?.select_id(&id)?;
            let mut confirm = |prompt: &str| yes || shell::ask_yes_no(&mut *out, &mut *input, prompt);
            let outcome = dashboard.delete(api, kind, &mut confirm).await?;
            match outcome {
                Some(notice) => writeln!(out, "{notice}")?,
                None => writeln!(out, "Delete cancelled.")?,
            }
        }
    }
    Ok(())
}

fn fill(dashboard: &mut Dashboard, kind: RecordKind, fields: &[String]) -> Result<(), CliError> {
    let panel = dashboard.panel_mut(kind)?;
    for raw in fields {
        let (field, value) = parse_field(raw)?;
        panel.set_field(&field, &value)?;
    }
    Ok(())
}

async fn run_profile<T: Transport>(
    api: &CrmApi<T>,
    store: &dyn SessionStore,
    command: ProfileSubcommand,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<(), CliError> {
    let mut session = require_session(store, Route::EmployeeDashboard)?;

    match command {
        ProfileSubcommand::Show => write!(out, "{}", render_profile(&ProfileView::from(&session)))?,
        ProfileSubcommand::Save { name, phone } => {
            let name = name.unwrap_or_else(|| session.full_name.clone());
            let phone = phone.unwrap_or_else(|| session.phone.clone());
            let notice = profile::save_profile(api, store, &mut session, &name, &phone).await?;
            writeln!(out, "{notice}")?;
        }
        ProfileSubcommand::Password { new_password } => {
            let new_password = match new_password {
                Some(password) => password,
                None => {
                    write!(out, "New password: ")?;
                    out.flush()?;
                    let mut line = String::new();
                    input.read_line(&mut line)?;
                    line
                }
            };
            match profile::change_password(api, &session, &new_password).await? {
                Some(notice) => writeln!(out, "{notice}")?,
                None => writeln!(out, "Password change cancelled.")?,
            }
        }
    }
    Ok(())
}
