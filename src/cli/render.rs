//! Plain-text rendering of page view models.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::pages::dashboard::AssigneeOption;
use crate::pages::profile::ProfileView;
use crate::state::pagination::PaginationControls;
use crate::state::schema::RecordKind;
use crate::state::view::TableView;

const COLUMN_GAP: &str = "  ";

/// Render a table page with a row-number column and pagination footer.
#[must_use]
pub fn render_table(view: &TableView, kind: RecordKind) -> String {
    if view.is_empty() {
        return format!("No {kind} to show.\n");
    }

    let mut header = vec!["#".to_owned(), kind.id_field().to_owned()];
    header.extend(view.headers.iter().map(|h| (*h).to_owned()));

    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let mut cells = vec![(index + 1).to_string(), row.id.clone().unwrap_or_else(|| "-".to_owned())];
            cells.extend(row.cells.iter().cloned());
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.push_str(&render_controls(&view.controls));
    let filtered = if view.matched_records == view.total_records {
        String::new()
    } else {
        format!(" of {}", view.total_records)
    };
    out.push_str(&format!("  ({}{filtered} {kind})\n", view.matched_records));
    out
}

/// `< 1 [2] 3 >`, with an arrow blanked when that direction is disabled.
#[must_use]
pub fn render_controls(controls: &PaginationControls) -> String {
    let prev = if controls.prev_enabled { "<" } else { " " };
    let next = if controls.next_enabled { ">" } else { " " };
    let pages: Vec<String> = controls
        .pages
        .iter()
        .map(|page| if page.current { format!("[{}]", page.number) } else { page.number.to_string() })
        .collect();
    format!("{prev} {} {next}", pages.join(" "))
}

#[must_use]
pub fn render_profile(profile: &ProfileView) -> String {
    format!("Name:  {}\nEmail: {}\nPhone: {}\n", profile.name, profile.email, profile.phone)
}

#[must_use]
pub fn render_assignees(options: &[AssigneeOption]) -> String {
    options.iter().map(|option| format!("  {} <{}>\n", option.label, option.value)).collect()
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join(COLUMN_GAP).trim_end());
    out.push('\n');
}
