//! User-facing error taxonomy for dashboard actions.
//!
//! Every variant is terminal for the action that produced it: the prior state
//! is left intact and the message is shown to the user verbatim.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::net::types::ApiError;

/// Message shown for any transport-level failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Fallback when the backend rejects a request without a message.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Input was rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The backend answered `success: false`.
    #[error("{0}")]
    Backend(String),

    /// The request failed in transit or the response was unreadable.
    #[error("{0}")]
    Network(String),

    /// The local session store could not be read or written.
    #[error("session storage failed: {0}")]
    Storage(String),
}

impl ActionError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Classify an API failure, using `fallback` when the backend rejected the
    /// request without saying why.
    #[must_use]
    pub fn from_api(err: ApiError, fallback: &str) -> Self {
        Self::from_api_with(err, fallback, NETWORK_ERROR_MESSAGE)
    }

    /// Like [`ActionError::from_api`] with a page-specific network message.
    #[must_use]
    pub fn from_api_with(err: ApiError, fallback: &str, network_message: &str) -> Self {
        match err {
            ApiError::Rejected(message) => {
                let message = message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_owned());
                Self::Backend(message)
            }
            _ => Self::Network(network_message.to_owned()),
        }
    }
}

impl From<ApiError> for ActionError {
    fn from(err: ApiError) -> Self {
        Self::from_api(err, REQUEST_FAILED_MESSAGE)
    }
}
