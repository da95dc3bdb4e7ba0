//! Constants used throughout the SourceCheck core crate.
//!
//! Service paths live here so the loader, client and tests agree on them.

/// Base URL of the validation service when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Path of the default extraction schema document.
pub const DEFAULT_SCHEMA_PATH: &str = "/static/defaults/schema.yaml";

/// Path of the default scoring policies document.
pub const DEFAULT_POLICIES_PATH: &str = "/static/defaults/policies.yaml";

/// Path of the validation endpoint.
pub const VALIDATE_PATH: &str = "/api/v1/validate";

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/health";

/// Message used when a failed validation response carries no `detail`.
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// Message used when a failed health response carries no `detail`.
pub const HEALTH_FAILED_MESSAGE: &str = "Health check failed";

/// Lowest score rendered as `high`.
pub const HIGH_SCORE_THRESHOLD: f64 = 0.7;

/// Lowest score rendered as `medium`.
pub const MEDIUM_SCORE_THRESHOLD: f64 = 0.4;
