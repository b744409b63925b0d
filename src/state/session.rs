//! Signed-in identity and where it is kept.
//!
//! SYSTEM CONTEXT
//! ==============
//! Dashboards refuse to open without a session; login writes one, logout
//! removes it. The store is ephemeral: the CLI keeps it in the
//! OS temp directory and never refreshes it from the backend.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::net::types::Role;

/// Authenticated identity as returned by `login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistence seam for the signed-in identity.
pub trait SessionStore {
    /// The stored session, `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load(&self) -> Result<Option<Session>, SessionError>;

    /// Replace the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Forget the stored session. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be removed.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Session held for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RefCell<Option<Session>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self { inner: RefCell::new(Some(session)) }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.inner.borrow().clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.inner.borrow_mut() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.inner.borrow_mut() = None;
        Ok(())
    }
}

/// Session serialized as JSON in a single file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let body = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, body)?;
        debug!(path = %self.path.display(), email = %session.email, "session: saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session: cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
