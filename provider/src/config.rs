//! Provider configuration.

use std::time::Duration;

use crate::error::{ApiError, Result};

/// Environment variable consulted for the server URL.
pub const URL_ENV: &str = "HTTP_SERVER_URL";
pub const DEFAULT_URL: &str = "http://localhost:9999";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL of the article server, without the API path.
    pub url: String,

    /// Upper bound on a single request, connect through body.
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(ApiError::Config("API URL is required".to_string()));
        }
        Ok(Self {
            url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Read the URL from `HTTP_SERVER_URL`, falling back to the default.
    pub fn from_env() -> Result<Self> {
        Self::new(std::env::var(URL_ENV).unwrap_or_else(|_| DEFAULT_URL.to_string()))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
