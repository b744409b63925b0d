//! Client for the CRM script endpoint.
//!
//! DESIGN
//! ======
//! Every action is a POST of one JSON envelope to a single URL. The
//! [`Transport`] trait is the only I/O seam: [`HttpTransport`] speaks HTTP via
//! `reqwest`, tests swap in a recording mock. [`CrmApi`] builds the envelopes
//! and turns `success: false` into [`ApiError::Rejected`].
//!
//! No client-side timeouts are configured; transport defaults apply.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::types::{Action, ApiError, ApiRequest, ApiResponse, Record, Role};
use crate::state::schema::RecordKind;

// =============================================================================
// TRANSPORT
// =============================================================================

/// Sends one request envelope and decodes the response envelope.
#[async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails in transit, the endpoint
    /// answers with a non-success status, or the body is not a response
    /// envelope. `success: false` is *not* an error at this layer.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the TLS backend cannot be
    /// initialized.
    pub fn new(endpoint: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint: endpoint.to_owned() })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), body: text });
        }

        parse_response(&text)
    }
}

/// Decode a response body.
///
/// # Errors
///
/// Returns [`ApiError::Parse`] if the body is not a JSON object envelope.
pub fn parse_response(body: &str) -> Result<ApiResponse, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

// =============================================================================
// API
// =============================================================================

/// Typed actions over a [`Transport`].
pub struct CrmApi<T> {
    transport: T,
}

impl<T: Transport> CrmApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let action = request.action;
        info!(%action, "api: request");
        let response = self.transport.send(&request).await.inspect_err(|e| {
            warn!(%action, error = %e, "api: transport failed");
        })?;
        if !response.success {
            debug!(%action, message = ?response.message, "api: rejected");
            return Err(ApiError::Rejected(response.message));
        }
        Ok(response)
    }

    // -------------------------------------------------------------------------
    // Auth
    // -------------------------------------------------------------------------

    /// Authenticate. The response carries `email`, `fullName`, `role`, `phone`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] for bad credentials, or a transport error.
    pub async fn login(&self, email: &str, password: &str, role: Role) -> Result<ApiResponse, ApiError> {
        self.call(
            ApiRequest::new(Action::Login)
                .with("email", email)
                .with("password", password)
                .with("role", role.as_str()),
        )
        .await
    }

    /// Ask for a manager-approved reset. Returns the backend's message, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] for unknown emails, or a transport error.
    pub async fn request_password_reset(&self, email: &str) -> Result<Option<String>, ApiError> {
        let response = self.call(ApiRequest::new(Action::RequestPasswordReset).with("email", email)).await?;
        Ok(response.message)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn update_employee_profile(&self, email: &str, name: &str, phone: &str) -> Result<(), ApiError> {
        self.call(
            ApiRequest::new(Action::UpdateEmployeeProfile)
                .with("email", email)
                .with("name", name)
                .with("phone", phone),
        )
        .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn change_password(&self, email: &str, new_password: &str) -> Result<(), ApiError> {
        self.call(
            ApiRequest::new(Action::ChangePassword)
                .with("email", email)
                .with("newPassword", new_password),
        )
        .await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Leads
    // -------------------------------------------------------------------------

    /// Leads visible to `email` acting as `role`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn get_leads(&self, email: &str, role: Role) -> Result<Vec<Record>, ApiError> {
        let response = self
            .call(ApiRequest::new(Action::GetLeads).with("email", email).with("role", role.as_str()))
            .await?;
        let leads = response.into_leads();
        debug!(records = leads.len(), "api: leads fetched");
        Ok(leads)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn add_lead(&self, lead: &Record) -> Result<ApiResponse, ApiError> {
        self.call(ApiRequest::new(Action::AddLead).with("leadData", record_value(lead)))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn update_lead(&self, lead_id: &str, lead: &Record) -> Result<ApiResponse, ApiError> {
        self.call(
            ApiRequest::new(Action::UpdateLead)
                .with("leadId", lead_id)
                .with("leadData", record_value(lead)),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn delete_lead(&self, lead_id: &str) -> Result<ApiResponse, ApiError> {
        self.call(ApiRequest::new(Action::DeleteLead).with("leadId", lead_id)).await
    }

    // -------------------------------------------------------------------------
    // Employees
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn get_employees(&self) -> Result<Vec<Record>, ApiError> {
        let employees = self.call(ApiRequest::new(Action::GetEmployees)).await?.into_employees();
        debug!(records = employees.len(), "api: employees fetched");
        Ok(employees)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn add_employee(&self, employee: &Record) -> Result<ApiResponse, ApiError> {
        self.call(ApiRequest::new(Action::AddEmployee).with_fields(employee)).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn update_employee(&self, id: &str, employee: &Record) -> Result<ApiResponse, ApiError> {
        self.call(ApiRequest::new(Action::UpdateEmployee).with_fields(employee).with("Id", id))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn delete_employee(&self, id: &str) -> Result<ApiResponse, ApiError> {
        self.call(ApiRequest::new(Action::DeleteEmployee).with("Id", id)).await
    }

    // -------------------------------------------------------------------------
    // Kind dispatch
    // -------------------------------------------------------------------------

    /// Fetch a record set. Leads are scoped by `email`/`role`; employees ignore them.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn list(&self, kind: RecordKind, email: &str, role: Role) -> Result<Vec<Record>, ApiError> {
        match kind {
            RecordKind::Lead => self.get_leads(email, role).await,
            RecordKind::Employee => self.get_employees().await,
        }
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn create(&self, kind: RecordKind, record: &Record) -> Result<ApiResponse, ApiError> {
        match kind {
            RecordKind::Lead => self.add_lead(record).await,
            RecordKind::Employee => self.add_employee(record).await,
        }
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn update(&self, kind: RecordKind, id: &str, record: &Record) -> Result<ApiResponse, ApiError> {
        match kind {
            RecordKind::Lead => self.update_lead(id, record).await,
            RecordKind::Employee => self.update_employee(id, record).await,
        }
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] or a transport error.
    pub async fn delete(&self, kind: RecordKind, id: &str) -> Result<ApiResponse, ApiError> {
        match kind {
            RecordKind::Lead => self.delete_lead(id).await,
            RecordKind::Employee => self.delete_employee(id).await,
        }
    }
}

fn record_value(record: &Record) -> Value {
    Value::Object(
        record
            .fields()
            .map(|(key, value)| (key.to_owned(), Value::String(value.to_owned())))
            .collect(),
    )
}
