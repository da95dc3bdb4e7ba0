//! Client runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the loader, client and controller. Nothing in this crate reads environment
//! variables; the binary turns them into a [`ClientConfig`] with the `*_from_env_value`
//! helpers below.

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_POLICIES_PATH, DEFAULT_SCHEMA_PATH, HEALTH_PATH, VALIDATE_PATH,
};
use crate::{SourceCheckError, SourceCheckResult};
use std::time::Duration;

/// Client configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_url: String,
    request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new `ClientConfig` for the service at `api_url`.
    ///
    /// The URL must use `http` or `https` and is stored without a trailing slash.
    pub fn new(api_url: impl AsRef<str>) -> SourceCheckResult<Self> {
        let api_url = api_url.as_ref().trim().trim_end_matches('/');

        if api_url.is_empty() {
            return Err(SourceCheckError::InvalidInput(
                "api_url cannot be empty".into(),
            ));
        }

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(SourceCheckError::InvalidInput(format!(
                "api_url must start with http:// or https:// (got {api_url})"
            )));
        }

        Ok(Self {
            api_url: api_url.to_string(),
            request_timeout: None,
        })
    }

    /// Bound every request by `timeout`. `None` leaves requests without a deadline.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn schema_url(&self) -> String {
        self.url_for(DEFAULT_SCHEMA_PATH)
    }

    pub fn policies_url(&self) -> String {
        self.url_for(DEFAULT_POLICIES_PATH)
    }

    pub fn validate_url(&self) -> String {
        self.url_for(VALIDATE_PATH)
    }

    pub fn health_url(&self) -> String {
        self.url_for(HEALTH_PATH)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Build the HTTP client shared by the loader and the validation client.
    pub fn build_http_client(&self) -> SourceCheckResult<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(SourceCheckError::HttpClient)
    }
}

/// Resolve the API base URL from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_API_URL`].
pub fn api_url_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.into())
}

/// Parse a request timeout in whole seconds from an optional string value.
///
/// `None`, empty and `0` all mean no deadline.
pub fn request_timeout_from_env_value(
    value: Option<String>,
) -> SourceCheckResult<Option<Duration>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(value) = value else {
        return Ok(None);
    };

    let secs: u64 = value.parse().map_err(|_| {
        SourceCheckError::InvalidInput(format!(
            "request timeout must be a whole number of seconds (got {value})"
        ))
    })?;

    Ok((secs > 0).then_some(Duration::from_secs(secs)))
}
