//! # SourceCheck Types
//!
//! Documents exchanged with the SourceCheck validation service.
//!
//! The service owns the shape of its responses, so [`ValidationResult`] is kept as an opaque
//! JSON document with read-only accessors for the handful of fields the client renders.
//! Requests are serialised from borrowed data and never retained.

mod result;

pub use result::{ClaimView, ValidationResult};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Claims as they are sent to the service.
///
/// Serialises untagged: a structured document goes on the wire verbatim, plain text goes as
/// `{ "body": "<text>" }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClaimsPayload {
    /// A JSON document typed into the claims field.
    Structured(Value),
    /// Free text that did not parse as JSON.
    Body { body: String },
}

/// Body of `POST /api/v1/validate`.
#[derive(Debug, Serialize)]
pub struct ValidationRequest<'a> {
    pub source_text: &'a str,
    pub claims: &'a ClaimsPayload,
    pub schema: &'a Value,
    pub policies: &'a Value,
}

/// Error document returned alongside a non-success status.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Human-readable message carried in `detail`, if any.
    ///
    /// Empty strings, `false`, `0` and `null` count as absent. Non-string details (the service
    /// reports request-shape problems as a list) are rendered as compact JSON.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRes {
    pub status: String,
    pub version: String,
    #[serde(default)]
    pub models_loaded: bool,
}

impl HealthRes {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
