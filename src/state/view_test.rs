use std::num::NonZeroUsize;

use super::*;
use crate::net::types::{Record, Role};
use crate::state::filter::FilterCriteria;
use crate::state::schema::RecordKind;

fn browser_with(records: Vec<Record>, page_size: usize) -> RecordBrowser {
    let mut browser = RecordBrowser::new(NonZeroUsize::new(page_size).unwrap());
    browser.replace(records);
    browser
}

#[test]
fn empty_browser_renders_no_rows_and_one_page() {
    let schema = RecordSchema::for_role(RecordKind::Lead, Role::Employee).unwrap();
    let view = render_table(&browser_with(Vec::new(), 10), &schema);

    assert!(view.is_empty());
    assert_eq!(view.headers, ["Full Name", "Email", "Phone", "Source", "Status"]);
    assert_eq!(view.controls.total_pages, 1);
    assert!(!view.controls.prev_enabled);
    assert!(!view.controls.next_enabled);
}

#[test]
fn missing_fields_render_as_empty_cells() {
    let schema = RecordSchema::for_role(RecordKind::Lead, Role::Manager).unwrap();
    let record = Record::from_pairs([("LeadID", "L1"), ("FullName", "Ada")]);
    let view = render_table(&browser_with(vec![record], 10), &schema);

    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].id.as_deref(), Some("L1"));
    assert_eq!(view.rows[0].cells, ["Ada", "", "", "", "", ""]);
}

#[test]
fn rows_without_identifier_are_not_selectable() {
    let schema = RecordSchema::for_role(RecordKind::Employee, Role::Manager).unwrap();
    let record = Record::from_pairs([("Name", "Linus"), ("Email", "l@x.io")]);
    let view = render_table(&browser_with(vec![record], 10), &schema);

    assert_eq!(view.rows[0].id, None);
    assert_eq!(view.rows[0].cells[0], "Linus");
}

#[test]
fn counts_reflect_filter_and_controls_reflect_page() {
    let schema = RecordSchema::for_role(RecordKind::Lead, Role::Employee).unwrap();
    let records = (1..=23)
        .map(|i| {
            let source = if i <= 12 { "Web" } else { "Referral" };
            Record::from_pairs([("LeadID", format!("L{i}")), ("Source", source.to_owned())])
        })
        .collect();
    let mut browser = browser_with(records, 10);
    browser.go_to(2).unwrap();

    let view = render_table(&browser, &schema);
    assert_eq!(view.rows.len(), 10);
    assert_eq!(view.controls.current, 2);
    assert!(view.controls.prev_enabled && view.controls.next_enabled);

    browser.set_criteria(FilterCriteria::new().with("Source", "web"));
    let view = render_table(&browser, &schema);
    assert_eq!(view.total_records, 23);
    assert_eq!(view.matched_records, 12);
    assert_eq!(view.controls.total_pages, 2);
    assert_eq!(view.controls.current, 1);
}
