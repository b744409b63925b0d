//! Role-aware record schemas.
//!
//! DESIGN
//! ======
//! Lead and employee panels differ only in which fields they show, edit,
//! search and require, and in which actions the role may perform. One
//! [`RecordSchema`] per (kind, role) pair parameterizes a single panel
//! implementation instead of one copy per dashboard.

#[cfg(test)]
#[path = "schema_test.rs"]
mod schema_test;

use std::fmt;

use crate::net::types::Role;

/// Which sheet a panel manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Lead,
    Employee,
}

impl RecordKind {
    /// Field carrying the row identifier.
    #[must_use]
    pub fn id_field(self) -> &'static str {
        match self {
            Self::Lead => "LeadID",
            Self::Employee => "Id",
        }
    }

    /// Capitalized noun used in notices ("Lead added successfully.").
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Employee => "Employee",
        }
    }

    /// Lowercase noun with article ("a lead", "an employee").
    #[must_use]
    pub fn with_article(self) -> &'static str {
        match self {
            Self::Lead => "a lead",
            Self::Employee => "an employee",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lead => f.write_str("leads"),
            Self::Employee => f.write_str("employees"),
        }
    }
}

/// A table column: record field plus header label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub field: &'static str,
    pub header: &'static str,
}

/// Everything that distinguishes one panel from another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordSchema {
    pub kind: RecordKind,
    pub role: Role,
    pub columns: &'static [Column],
    /// Draft fields, in form order.
    pub editable: &'static [&'static str],
    /// Draft fields used as search criteria.
    pub searchable: &'static [&'static str],
    /// Fields that must be non-blank before a create is sent.
    pub required: &'static [&'static str],
    pub required_message: &'static str,
    /// Values a cleared draft starts with.
    pub defaults: &'static [(&'static str, &'static str)],
    /// When set, creates are assigned to the signed-in user via this field.
    pub owner_field: Option<&'static str>,
    /// Constant fields added to every create.
    pub create_extras: &'static [(&'static str, &'static str)],
}

const LEAD_COLUMNS: &[Column] = &[
    Column { field: "FullName", header: "Full Name" },
    Column { field: "Email", header: "Email" },
    Column { field: "Phone", header: "Phone" },
    Column { field: "Source", header: "Source" },
    Column { field: "Status", header: "Status" },
];

const MANAGER_LEAD_COLUMNS: &[Column] = &[
    Column { field: "FullName", header: "Full Name" },
    Column { field: "Email", header: "Email" },
    Column { field: "Phone", header: "Phone" },
    Column { field: "Source", header: "Source" },
    Column { field: "Status", header: "Status" },
    Column { field: "AssignedTo", header: "Assigned To" },
];

const EMPLOYEE_COLUMNS: &[Column] = &[
    Column { field: "FullName", header: "Full Name" },
    Column { field: "Email", header: "Email" },
    Column { field: "Role", header: "Role" },
    Column { field: "Status", header: "Status" },
];

const LEAD_FIELDS: &[&str] = &["FullName", "Email", "Phone", "Source", "Status"];
const MANAGER_LEAD_FIELDS: &[&str] = &["FullName", "Email", "Phone", "Source", "Status", "AssignedTo"];
const EMPLOYEE_FIELDS: &[&str] = &["FullName", "Email", "Role", "Status"];

pub const LEAD_REQUIRED_MESSAGE: &str = "FullName and Email are required.";
pub const EMPLOYEE_REQUIRED_MESSAGE: &str = "Full Name, Email, and Role are required.";

impl RecordSchema {
    /// Schema for `kind` as seen by `role`, or `None` if the role has no such panel.
    #[must_use]
    pub fn for_role(kind: RecordKind, role: Role) -> Option<Self> {
        match (kind, role) {
            (RecordKind::Lead, role) => Some(Self::leads(role)),
            (RecordKind::Employee, Role::Manager) => Some(Self::employees()),
            (RecordKind::Employee, Role::Employee) => None,
        }
    }

    /// Lead panel. Employees see their own leads and own every lead they add;
    /// managers see all leads and pick the assignee.
    #[must_use]
    pub fn leads(role: Role) -> Self {
        match role {
            Role::Employee => Self {
                kind: RecordKind::Lead,
                role,
                columns: LEAD_COLUMNS,
                editable: LEAD_FIELDS,
                searchable: LEAD_FIELDS,
                required: &["FullName", "Email"],
                required_message: LEAD_REQUIRED_MESSAGE,
                defaults: &[("Status", "New")],
                owner_field: Some("AssignedTo"),
                create_extras: &[("Notes", "")],
            },
            Role::Manager => Self {
                kind: RecordKind::Lead,
                role,
                columns: MANAGER_LEAD_COLUMNS,
                editable: MANAGER_LEAD_FIELDS,
                searchable: LEAD_FIELDS,
                required: &["FullName", "Email"],
                required_message: LEAD_REQUIRED_MESSAGE,
                defaults: &[],
                owner_field: None,
                create_extras: &[],
            },
        }
    }

    /// Employee panel, manager only.
    #[must_use]
    pub fn employees() -> Self {
        Self {
            kind: RecordKind::Employee,
            role: Role::Manager,
            columns: EMPLOYEE_COLUMNS,
            editable: EMPLOYEE_FIELDS,
            searchable: EMPLOYEE_FIELDS,
            required: &["FullName", "Email", "Role"],
            required_message: EMPLOYEE_REQUIRED_MESSAGE,
            defaults: &[],
            owner_field: None,
            create_extras: &[],
        }
    }

    #[must_use]
    pub fn id_field(&self) -> &'static str {
        self.kind.id_field()
    }

    #[must_use]
    pub fn is_editable(&self, field: &str) -> bool {
        self.editable.contains(&field)
    }

    #[must_use]
    pub fn default_for(&self, field: &str) -> Option<&'static str> {
        self.defaults.iter().find(|(name, _)| *name == field).map(|(_, value)| *value)
    }
}
