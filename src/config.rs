//! Client configuration.
//!
//! Values arrive through `clap` flags with `LEADHQ_*` environment fallbacks;
//! [`Config::new`] validates them once before anything touches the network.

use std::num::NonZeroUsize;
use std::path::PathBuf;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const SESSION_FILE_NAME: &str = "leadhq-session.json";

pub const API_URL_VAR: &str = "LEADHQ_API_URL";
pub const PAGE_SIZE_VAR: &str = "LEADHQ_PAGE_SIZE";
pub const SESSION_FILE_VAR: &str = "LEADHQ_SESSION_FILE";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting: env var {0} not set")]
    Missing(&'static str),
    #[error("invalid API URL '{0}' (expected http:// or https://)")]
    InvalidApiUrl(String),
    #[error("invalid page size '{0}' (expected a positive integer)")]
    InvalidPageSize(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Script endpoint every action is posted to.
    pub api_url: String,
    /// Rows per table page.
    pub page_size: NonZeroUsize,
    /// Where the signed-in identity is kept between invocations.
    pub session_file: PathBuf,
}

impl Config {
    /// Build a validated config from already-collected values.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not http(s) or the page size is zero.
    pub fn new(api_url: &str, page_size: usize, session_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let api_url = api_url.trim();
        if api_url.is_empty() {
            return Err(ConfigError::Missing(API_URL_VAR));
        }
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(api_url.to_owned()));
        }
        let page_size = NonZeroUsize::new(page_size).ok_or_else(|| ConfigError::InvalidPageSize(page_size.to_string()))?;

        Ok(Self {
            api_url: api_url.to_owned(),
            page_size,
            session_file: session_file.unwrap_or_else(default_session_file),
        })
    }
}

/// Parse a page size, rejecting zero and non-numeric input.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPageSize`] for anything but a positive integer.
pub fn parse_page_size(raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidPageSize(raw.to_owned())),
    }
}

#[must_use]
pub fn default_session_file() -> PathBuf {
    std::env::temp_dir().join(SESSION_FILE_NAME)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
