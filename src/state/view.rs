//! Pure projection of a browser onto table rows and page controls.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::state::browser::RecordBrowser;
use crate::state::pagination::{self, PaginationControls};
use crate::state::schema::RecordSchema;

/// One rendered row. `id` is `None` for rows that cannot be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: Option<String>,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub rows: Vec<RowView>,
    pub controls: PaginationControls,
    pub total_records: usize,
    pub matched_records: usize,
}

impl TableView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render the current page. Missing fields render as empty cells.
#[must_use]
pub fn render_table(browser: &RecordBrowser, schema: &RecordSchema) -> TableView {
    let id_field = schema.id_field();
    let rows = browser
        .page_items()
        .into_iter()
        .map(|record| {
            let id = record.value(id_field).trim();
            RowView {
                id: (!id.is_empty()).then(|| id.to_owned()),
                cells: schema
                    .columns
                    .iter()
                    .map(|column| record.value(column.field).to_owned())
                    .collect(),
            }
        })
        .collect();

    TableView {
        headers: schema.columns.iter().map(|column| column.header).collect(),
        rows,
        controls: pagination::controls(browser.current_page(), browser.total_pages()),
        total_records: browser.records().len(),
        matched_records: browser.filtered_len(),
    }
}
