//! Default configuration documents.
//!
//! At startup the schema and policies defaults are fetched concurrently. A failed fetch is
//! logged and leaves its field unset; it never reaches the user-visible error. The two fetches
//! are independent, so one can succeed while the other fails.

use crate::{ClientConfig, SourceCheckError, SourceCheckResult};
use std::sync::Arc;

/// Default documents as fetched. `None` means the fetch failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultDocuments {
    pub schema: Option<String>,
    pub policies: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ConfigLoader {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl ConfigLoader {
    pub fn new(config: Arc<ClientConfig>) -> SourceCheckResult<Self> {
        let http = config.build_http_client()?;
        Ok(Self::with_http_client(config, http))
    }

    pub fn with_http_client(config: Arc<ClientConfig>, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    /// Fetch both default documents. Never fails and never retries.
    pub async fn load(&self) -> DefaultDocuments {
        let schema_url = self.config.schema_url();
        let policies_url = self.config.policies_url();

        let (schema, policies) =
            tokio::join!(self.fetch_text(&schema_url), self.fetch_text(&policies_url));

        DefaultDocuments {
            schema: loaded_or_logged("schema", schema),
            policies: loaded_or_logged("policies", policies),
        }
    }

    /// Fetch one document as text. Any status outside 2xx is a failure.
    pub async fn fetch_text(&self, url: &str) -> SourceCheckResult<String> {
        let fetch_error = |source| SourceCheckError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(fetch_error)?;

        response.text().await.map_err(fetch_error)
    }
}

fn loaded_or_logged(name: &str, fetched: SourceCheckResult<String>) -> Option<String> {
    match fetched {
        Ok(text) => {
            tracing::info!("loaded default {} ({} bytes)", name, text.len());
            Some(text)
        }
        Err(e) => {
            tracing::warn!("Failed to load default {}: {}", name, e);
            None
        }
    }
}
