//! # SourceCheck Core
//!
//! Client-side orchestration for the SourceCheck validation service.
//!
//! This crate contains:
//! - Fetching the default schema and policies documents ([`ConfigLoader`])
//! - Normalising free-form claims input into a request payload ([`normalize_claims`])
//! - Issuing validation and health calls ([`ValidationClient`])
//! - Classifying claim scores for display ([`classify`])
//! - The controller that owns user-visible state ([`AppController`])
//!
//! **No presentation concerns**: argument handling, rendering and terminal I/O belong in the
//! `sourcecheck` binary.

pub mod claims;
pub mod client;
pub mod config;
pub mod constants;
pub mod controller;
pub mod documents;
pub mod error;
pub mod loader;
pub mod score;

#[cfg(test)]
pub(crate) mod testing;

pub use claims::normalize_claims;
pub use client::ValidationClient;
pub use config::ClientConfig;
pub use controller::{AppController, AppState, Phase, PreparedRequest, Submission};
pub use error::{SourceCheckError, SourceCheckResult};
pub use loader::{ConfigLoader, DefaultDocuments};
pub use score::{classify, classify_value, ScoreBucket};

pub use sourcecheck_types as types;
