//! Validation service client.
//!
//! One call, one request: nothing here retries, queues or cancels. A non-success status is
//! turned into [`SourceCheckError::Service`] carrying the service's `detail` message when it
//! sent one, or a generic message otherwise.

use crate::constants::{HEALTH_FAILED_MESSAGE, VALIDATION_FAILED_MESSAGE};
use crate::{ClientConfig, SourceCheckError, SourceCheckResult};
use serde_json::Value;
use sourcecheck_types::{ErrorBody, HealthRes, ValidationRequest, ValidationResult};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct ValidationClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl ValidationClient {
    /// Creates a client with its own HTTP connection pool.
    pub fn new(config: Arc<ClientConfig>) -> SourceCheckResult<Self> {
        let http = config.build_http_client()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Creates a client that shares an existing HTTP connection pool.
    pub fn with_http_client(config: Arc<ClientConfig>, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submit a validation request.
    ///
    /// # Errors
    /// - [`SourceCheckError::Transport`] if the request could not be sent.
    /// - [`SourceCheckError::Service`] if the service answered with a non-success status.
    /// - [`SourceCheckError::Decode`] if a success response was not JSON.
    pub async fn validate(
        &self,
        request: &ValidationRequest<'_>,
    ) -> SourceCheckResult<ValidationResult> {
        let url = self.config.validate_url();
        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(SourceCheckError::Transport)?;

        if !response.status().is_success() {
            return Err(service_error(response, VALIDATION_FAILED_MESSAGE).await);
        }

        let document: Value = response.json().await.map_err(SourceCheckError::Decode)?;
        Ok(ValidationResult::new(document))
    }

    /// Query the service's health endpoint.
    pub async fn health(&self) -> SourceCheckResult<HealthRes> {
        let url = self.config.health_url();
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(SourceCheckError::Transport)?;

        if !response.status().is_success() {
            return Err(service_error(response, HEALTH_FAILED_MESSAGE).await);
        }

        response.json().await.map_err(SourceCheckError::Decode)
    }
}

/// Build the error for a non-success response, preferring the body's `detail` message.
async fn service_error(response: reqwest::Response, fallback: &str) -> SourceCheckError {
    let status = response.status();
    let detail = match response.text().await {
        Ok(text) => serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message()),
        Err(e) => {
            tracing::debug!("failed to read error body: {}", e);
            None
        }
    };

    SourceCheckError::Service {
        status,
        message: detail.unwrap_or_else(|| fallback.to_string()),
    }
}
