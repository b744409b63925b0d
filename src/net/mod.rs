//! Networking modules for the CRM script endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the transport seam and typed action helpers, `types` defines the
//! request/response schema shared by every action.

pub mod api;
pub mod types;

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::sync::{Mutex, PoisonError};

    use serde_json::json;

    use super::api::Transport;
    use super::types::{Action, ApiError, ApiRequest, ApiResponse};

    /// Transport that records every request and replays queued replies.
    ///
    /// With the queue empty it answers `{"success": true}`.
    #[derive(Default)]
    pub struct MockTransport {
        requests: Mutex<Vec<ApiRequest>>,
        replies: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    }

    impl MockTransport {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a successful reply built from JSON.
        pub fn reply(&self, body: serde_json::Value) -> &Self {
            let response = serde_json::from_value(body).unwrap_or_default();
            self.replies.lock().unwrap_or_else(PoisonError::into_inner).push_back(Ok(response));
            self
        }

        /// Queue `{"success": false, "message": ...}`.
        pub fn reject(&self, message: &str) -> &Self {
            self.reply(json!({ "success": false, "message": message }))
        }

        /// Queue a transport failure.
        pub fn fail(&self) -> &Self {
            self.replies
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(Err(ApiError::Request("connection refused".to_owned())));
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        pub fn actions(&self) -> Vec<Action> {
            self.requests().iter().map(|request| request.action).collect()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
        }
    }

    #[async_trait::async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
            self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request.clone());
            let next = self.replies.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
            next.unwrap_or_else(|| Ok(ApiResponse { success: true, ..ApiResponse::default() }))
        }
    }
}
