//! Interactive line-oriented dashboard.
//!
//! One command per line drives the same [`Dashboard`] the one-shot
//! subcommands use. Action errors are printed and the loop continues; only
//! I/O failures end the session.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use std::io::{BufRead, Write};

use tracing::debug;

use super::CliError;
use super::render::{render_assignees, render_profile, render_table};
use crate::error::ActionError;
use crate::net::api::{CrmApi, Transport};
use crate::pages::dashboard::{Dashboard, RecordPanel};
use crate::pages::profile::ProfileView;
use crate::state::schema::RecordKind;

pub const HELP: &str = "\
commands:
  leads | employees     switch table
  show                  redraw the current page
  page N | next | prev  move between pages
  select N              load row N of this page into the form
  pick ID               load the record with this id into the form
  set FIELD VALUE       type into a form field
  form                  show the form
  search | clear        filter by the form / reset form and filter
  add | update | delete send the form
  reload                fetch the table again
  assignees             list employees leads can be assigned to
  whoami                show the signed-in profile
  help | quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    Help,
    Switch(RecordKind),
    Show,
    Page(usize),
    Next,
    Prev,
    Select(usize),
    Pick(String),
    Set { field: String, value: String },
    Form,
    Search,
    Clear,
    Add,
    Update,
    Delete,
    Reload,
    Assignees,
    WhoAmI,
    Quit,
}

/// Parse one input line.
///
/// # Errors
///
/// Returns a usage message for unknown commands or bad arguments.
pub fn parse_shell_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "help" | "?" => ShellCommand::Help,
        "leads" => ShellCommand::Switch(RecordKind::Lead),
        "employees" => ShellCommand::Switch(RecordKind::Employee),
        "show" | "list" => ShellCommand::Show,
        "page" => ShellCommand::Page(parse_number(rest, "usage: page N")?),
        "next" | "n" => ShellCommand::Next,
        "prev" | "p" => ShellCommand::Prev,
        "select" => ShellCommand::Select(parse_number(rest, "usage: select N")?),
        "pick" if !rest.is_empty() => ShellCommand::Pick(rest.to_owned()),
        "pick" => return Err("usage: pick ID".to_owned()),
        "set" if !rest.is_empty() => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            ShellCommand::Set { field: field.to_owned(), value: value.trim().to_owned() }
        }
        "set" => return Err("usage: set FIELD VALUE".to_owned()),
        "form" => ShellCommand::Form,
        "search" => ShellCommand::Search,
        "clear" => ShellCommand::Clear,
        "add" => ShellCommand::Add,
        "update" => ShellCommand::Update,
        "delete" => ShellCommand::Delete,
        "reload" => ShellCommand::Reload,
        "assignees" => ShellCommand::Assignees,
        "whoami" | "profile" => ShellCommand::WhoAmI,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(command)
}

fn parse_number(raw: &str, usage: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(number) => Ok(number),
        Err(_) => Err(usage.to_owned()),
    }
}

/// Ask a yes/no question on `out`, reading the answer from `input`.
/// Anything but `y`/`yes`, including a read failure, is a no.
pub fn ask_yes_no(out: &mut dyn Write, input: &mut dyn BufRead, prompt: &str) -> bool {
    if write!(out, "{prompt} [y/N] ").and_then(|()| out.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            debug!(error = %e, "shell: confirmation read failed");
            false
        }
    }
}

/// Run the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the terminal cannot be read or written.
pub async fn run_shell<T: Transport>(
    dashboard: &mut Dashboard,
    api: &CrmApi<T>,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<(), CliError> {
    writeln!(out, "{} for {} ({})", dashboard.route(), dashboard.session().full_name, dashboard.session().email)?;
    if let Err(e) = dashboard.init(api).await {
        writeln!(out, "error: {e}")?;
    }
    let mut active = RecordKind::Lead;
    show(dashboard, active, out)?;

    loop {
        write!(out, "{active}> ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        let command = match parse_shell_command(&line) {
            Ok(command) => command,
            Err(usage) => {
                writeln!(out, "{usage}")?;
                continue;
            }
        };
        if command == ShellCommand::Quit {
            return Ok(());
        }
        step(dashboard, api, &mut active, command, out, input).await?;
    }
}

async fn step<T: Transport>(
    dashboard: &mut Dashboard,
    api: &CrmApi<T>,
    active: &mut RecordKind,
    command: ShellCommand,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<(), CliError> {
    let kind = *active;
    let shows_form = matches!(command, ShellCommand::Select(_) | ShellCommand::Pick(_));
    let result = match command {
        ShellCommand::Empty | ShellCommand::Quit => return Ok(()),
        ShellCommand::Help => {
            write!(out, "{HELP}")?;
            return Ok(());
        }
        ShellCommand::Switch(next) => match dashboard.panel_mut(next).map(|_| ()) {
            Ok(()) => {
                *active = next;
                return show(dashboard, next, out);
            }
            Err(e) => Err(e),
        },
        ShellCommand::Show => return show(dashboard, kind, out),
        ShellCommand::Form => return show_form(dashboard, kind, out),
        ShellCommand::Assignees => {
            write!(out, "{}", render_assignees(dashboard.assignees()))?;
            return Ok(());
        }
        ShellCommand::WhoAmI => {
            write!(out, "{}", render_profile(&ProfileView::from(dashboard.session())))?;
            return Ok(());
        }
        ShellCommand::Page(page) => navigate(dashboard, kind, |panel| panel.go_to_page(page)),
        ShellCommand::Next => navigate(dashboard, kind, RecordPanel::next_page),
        ShellCommand::Prev => navigate(dashboard, kind, RecordPanel::prev_page),
        ShellCommand::Select(row) => dashboard
            .panel_mut(kind)
            .and_then(|panel| panel.select_row(row))
            .map(|()| None),
        ShellCommand::Pick(id) => dashboard
            .panel_mut(kind)
            .and_then(|panel| panel.select_id(&id))
            .map(|()| None),
        ShellCommand::Set { field, value } => {
            let result = dashboard.panel_mut(kind).and_then(|panel| panel.set_field(&field, &value));
            if let Err(e) = result {
                writeln!(out, "error: {e}")?;
            }
            return Ok(());
        }
        ShellCommand::Search => dashboard
            .panel_mut(kind)
            .and_then(RecordPanel::search)
            .map(|matched| Some(format!("{matched} match(es)."))),
        ShellCommand::Clear => dashboard.panel_mut(kind).map(|panel| {
            panel.clear();
            None
        }),
        ShellCommand::Add => dashboard.create(api, kind).await.map(Some),
        ShellCommand::Update => dashboard.update(api, kind).await.map(Some),
        ShellCommand::Delete => {
            let mut confirm = |prompt: &str| ask_yes_no(&mut *out, &mut *input, prompt);
            dashboard.delete(api, kind, &mut confirm).await
        }
        ShellCommand::Reload => dashboard
            .reload(api, kind)
            .await
            .map(|count| Some(format!("Loaded {count} {kind}."))),
    };

    match result {
        Ok(notice) => {
            if let Some(notice) = notice {
                writeln!(out, "{notice}")?;
            }
            if shows_form { show_form(dashboard, kind, out) } else { show(dashboard, kind, out) }
        }
        Err(e) => {
            writeln!(out, "error: {e}")?;
            Ok(())
        }
    }
}

fn navigate(
    dashboard: &mut Dashboard,
    kind: RecordKind,
    go: impl FnOnce(&mut RecordPanel) -> Result<usize, ActionError>,
) -> Result<Option<String>, ActionError> {
    dashboard.panel_mut(kind).and_then(go).map(|_| None)
}

fn show(dashboard: &Dashboard, kind: RecordKind, out: &mut dyn Write) -> Result<(), CliError> {
    if let Some(panel) = dashboard.panel(kind) {
        write!(out, "{}", render_table(&panel.view(), kind))?;
    }
    Ok(())
}

fn show_form(dashboard: &Dashboard, kind: RecordKind, out: &mut dyn Write) -> Result<(), CliError> {
    let Some(panel) = dashboard.panel(kind) else {
        return Ok(());
    };
    match panel.draft().selected_id() {
        Some(id) => writeln!(out, "editing {} {id}", panel.schema().id_field())?,
        None => writeln!(out, "new {}", kind.noun().to_lowercase())?,
    }
    for field in panel.schema().editable {
        writeln!(out, "  {field}: {}", panel.draft().get(field))?;
    }
    Ok(())
}
