use super::*;

#[test]
fn employees_have_no_employee_panel() {
    assert!(RecordSchema::for_role(RecordKind::Employee, Role::Employee).is_none());
    assert!(RecordSchema::for_role(RecordKind::Employee, Role::Manager).is_some());
}

#[test]
fn employee_lead_schema_stamps_owner_and_hides_assignee() {
    let schema = RecordSchema::for_role(RecordKind::Lead, Role::Employee).unwrap();
    assert_eq!(schema.owner_field, Some("AssignedTo"));
    assert!(!schema.is_editable("AssignedTo"));
    assert!(schema.columns.iter().all(|c| c.field != "AssignedTo"));
    assert_eq!(schema.default_for("Status"), Some("New"));
    assert_eq!(schema.create_extras, &[("Notes", "")]);
}

#[test]
fn manager_lead_schema_edits_assignee_but_does_not_search_it() {
    let schema = RecordSchema::for_role(RecordKind::Lead, Role::Manager).unwrap();
    assert!(schema.is_editable("AssignedTo"));
    assert!(!schema.searchable.contains(&"AssignedTo"));
    assert_eq!(schema.columns.last().map(|c| c.header), Some("Assigned To"));
    assert_eq!(schema.owner_field, None);
}

#[test]
fn required_fields_and_messages_per_kind() {
    let lead = RecordSchema::for_role(RecordKind::Lead, Role::Manager).unwrap();
    assert_eq!(lead.required, &["FullName", "Email"]);
    assert_eq!(lead.required_message, "FullName and Email are required.");

    let employee = RecordSchema::for_role(RecordKind::Employee, Role::Manager).unwrap();
    assert_eq!(employee.required, &["FullName", "Email", "Role"]);
    assert_eq!(employee.required_message, "Full Name, Email, and Role are required.");
}

#[test]
fn infallible_constructors_match_role_lookup() {
    assert_eq!(RecordSchema::for_role(RecordKind::Lead, Role::Manager), Some(RecordSchema::leads(Role::Manager)));
    assert_eq!(RecordSchema::for_role(RecordKind::Employee, Role::Manager), Some(RecordSchema::employees()));
}

#[test]
fn id_fields_and_nouns() {
    assert_eq!(RecordKind::Lead.id_field(), "LeadID");
    assert_eq!(RecordKind::Employee.id_field(), "Id");
    assert_eq!(RecordKind::Lead.noun(), "Lead");
    assert_eq!(RecordKind::Employee.with_article(), "an employee");
    assert_eq!(RecordKind::Employee.to_string(), "employees");
}
