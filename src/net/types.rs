//! Wire DTOs for the CRM script endpoint.
//!
//! DESIGN
//! ======
//! The backend is a spreadsheet-backed script, so cell values arrive as a mix
//! of strings, numbers, booleans and nulls. Everything is normalized to
//! strings at this boundary; `null` cells are treated as absent fields.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("unexpected HTTP status {status}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON envelope.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The backend answered `success: false`.
    #[error("backend rejected request: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),
}

// =============================================================================
// ROLE
// =============================================================================

/// Access tier controlling which dashboards and actions are available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Employee,
    Manager,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
        }
    }

    /// Interpret a role string returned by the backend.
    ///
    /// Anything other than `manager` lands on the employee tier, matching the
    /// dashboard routing rule.
    #[must_use]
    pub fn from_backend(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("manager") {
            Self::Manager
        } else {
            Self::Employee
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employee" => Ok(Self::Employee),
            "manager" => Ok(Self::Manager),
            other => Err(format!("unknown role '{other}' (expected 'employee' or 'manager')")),
        }
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// One row of a lead or employee sheet.
///
/// Fields are optional; [`Record::value`] renders absent fields as `""`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(field, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { fields: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Raw field lookup, `None` when the field is absent.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Display value for a field.
    ///
    /// Older employee rows carry `Name` instead of `FullName`; an empty
    /// `FullName` falls back to it.
    #[must_use]
    pub fn value(&self, field: &str) -> &str {
        let direct = self.get(field).unwrap_or("");
        if field == "FullName" && direct.trim().is_empty() {
            return self.get("Name").unwrap_or("");
        }
        direct
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let fields = raw
            .into_iter()
            .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key, v)))
            .collect();
        Ok(Self { fields })
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other @ (Value::Array(_) | Value::Object(_)) => Some(other.to_string()),
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// Action names understood by the script endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Login,
    GetLeads,
    GetEmployees,
    AddLead,
    UpdateLead,
    DeleteLead,
    AddEmployee,
    UpdateEmployee,
    DeleteEmployee,
    UpdateEmployeeProfile,
    ChangePassword,
    RequestPasswordReset,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::GetLeads => "getLeads",
            Self::GetEmployees => "getEmployees",
            Self::AddLead => "addLead",
            Self::UpdateLead => "updateLead",
            Self::DeleteLead => "deleteLead",
            Self::AddEmployee => "addEmployee",
            Self::UpdateEmployee => "updateEmployee",
            Self::DeleteEmployee => "deleteEmployee",
            Self::UpdateEmployeeProfile => "updateEmployeeProfile",
            Self::ChangePassword => "changePassword",
            Self::RequestPasswordReset => "requestPasswordReset",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request envelope: `{"action": ..., ...params}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ApiRequest {
    pub action: Action,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(action: Action) -> Self {
        Self { action, params: Map::new() }
    }

    /// Add one top-level parameter.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_owned(), value.into());
        self
    }

    /// Merge every field of a record as top-level parameters.
    #[must_use]
    pub fn with_fields(mut self, record: &Record) -> Self {
        for (key, value) in record.fields() {
            self.params.insert(key.to_owned(), Value::String(value.to_owned()));
        }
        self
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Response envelope shared by every action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "deserialize_optional_scalar")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_record_list")]
    pub leads: Option<Vec<Record>>,
    #[serde(default, deserialize_with = "deserialize_record_list")]
    pub employees: Option<Vec<Record>>,
    #[serde(default, deserialize_with = "deserialize_record_list")]
    pub data: Option<Vec<Record>>,
    #[serde(default, deserialize_with = "deserialize_optional_scalar")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_scalar")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_scalar")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_scalar")]
    pub phone: Option<String>,
}

impl ApiResponse {
    /// Lead rows, from `leads` or the generic `data` slot.
    #[must_use]
    pub fn into_leads(self) -> Vec<Record> {
        self.leads.or(self.data).unwrap_or_default()
    }

    /// Employee rows, from `employees` or the generic `data` slot.
    #[must_use]
    pub fn into_employees(self) -> Vec<Record> {
        self.employees.or(self.data).unwrap_or_default()
    }
}

fn deserialize_optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_to_string))
}

/// Absent or `null` stays `None`; any non-array value is an empty set.
fn deserialize_record_list<'de, D>(deserializer: D) -> Result<Option<Vec<Record>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => {
            let mut records = Vec::with_capacity(items.len());
            for item in items {
                if !item.is_object() {
                    continue;
                }
                let record = serde_json::from_value::<Record>(item).map_err(D::Error::custom)?;
                records.push(record);
            }
            Ok(Some(records))
        }
        Some(_) => Ok(Some(Vec::new())),
    }
}
