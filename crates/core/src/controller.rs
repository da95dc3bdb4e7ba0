//! Application controller.
//!
//! [`AppController`] is the only writer of [`AppState`]. It sequences the loader, the claims
//! normaliser and the validation client on user actions, and moves the state machine
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Success ──submit──▶ Loading …
//!                     └────err──▶ Error   ──submit──▶ Loading …
//! ```
//!
//! `Idle` is only the initial phase. A finished submission leaves its outcome in place until
//! the next one starts. Submitting while `Loading` is rejected with
//! [`SourceCheckError::SubmissionInFlight`] and leaves the state untouched.
//!
//! Dropping a [`Submission`] without completing it (for example when `submit()` is cancelled
//! by a timeout) releases the in-flight guard. The phase stays `Loading` until the next
//! submission starts.

use crate::claims::normalize_claims;
use crate::documents::{parse_policies, parse_schema};
use crate::{
    ClientConfig, ConfigLoader, DefaultDocuments, SourceCheckError, SourceCheckResult,
    ValidationClient,
};
use serde_json::Value;
use sourcecheck_types::{ClaimsPayload, ValidationRequest, ValidationResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Outcome of the most recent submission.
///
/// Results and error are variants of one enum, so both can never be present at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success(ValidationResult),
    Error(String),
}

/// User-visible state: the four editable text fields plus the submission phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    source_text: String,
    claims_input: String,
    schema_text: String,
    policies_text: String,
    phase: Phase,
}

impl AppState {
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn claims_input(&self) -> &str {
        &self.claims_input
    }

    pub fn schema_text(&self) -> &str {
        &self.schema_text
    }

    pub fn policies_text(&self) -> &str {
        &self.policies_text
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn results(&self) -> Option<&ValidationResult> {
        match &self.phase {
            Phase::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Snapshot of the inputs taken when a submission starts.
///
/// Edits made while the request is in flight do not affect it. The ticket must be handed back
/// to [`AppController::complete_submission`]; dropping it instead releases the in-flight guard.
#[derive(Debug)]
pub struct Submission {
    id: u64,
    in_flight: InFlight,
    source_text: String,
    claims_input: String,
    schema_text: String,
    policies_text: String,
}

impl Drop for Submission {
    fn drop(&mut self) {
        let mut slot = lock(&self.in_flight);
        if *slot == Some(self.id) {
            tracing::warn!("submission {} abandoned before completion", self.id);
            *slot = None;
        }
    }
}

/// Id of the submission currently in flight, shared with its ticket.
type InFlight = Arc<Mutex<Option<u64>>>;

fn lock(in_flight: &InFlight) -> MutexGuard<'_, Option<u64>> {
    in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Submission {
    /// Parse the schema and policies and normalise the claims.
    ///
    /// # Errors
    /// Returns `SchemaParse` or `PoliciesParse` for malformed documents. Claims never fail.
    pub fn prepare(&self) -> SourceCheckResult<PreparedRequest> {
        let schema = parse_schema(&self.schema_text)?;
        let policies = parse_policies(&self.policies_text)?;
        let claims = normalize_claims(&self.claims_input);

        Ok(PreparedRequest {
            source_text: self.source_text.clone(),
            claims,
            schema,
            policies,
        })
    }
}

/// Fully parsed request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub source_text: String,
    pub claims: ClaimsPayload,
    pub schema: Value,
    pub policies: Value,
}

impl PreparedRequest {
    pub fn as_request(&self) -> ValidationRequest<'_> {
        ValidationRequest {
            source_text: &self.source_text,
            claims: &self.claims,
            schema: &self.schema,
            policies: &self.policies,
        }
    }
}

pub struct AppController {
    state: AppState,
    client: ValidationClient,
    loader: ConfigLoader,
    next_submission: u64,
    in_flight: InFlight,
}

impl AppController {
    pub fn new(client: ValidationClient, loader: ConfigLoader) -> Self {
        Self {
            state: AppState::default(),
            client,
            loader,
            next_submission: 0,
            in_flight: InFlight::default(),
        }
    }

    /// Build a controller whose loader and client share one HTTP connection pool.
    pub fn from_config(config: Arc<ClientConfig>) -> SourceCheckResult<Self> {
        let http = config.build_http_client()?;
        Ok(Self::new(
            ValidationClient::with_http_client(config.clone(), http.clone()),
            ConfigLoader::with_http_client(config, http),
        ))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn client(&self) -> &ValidationClient {
        &self.client
    }

    /// Fetch the default schema and policies and fill in whichever arrived.
    ///
    /// Failures are logged by the loader and never surface in the state.
    pub async fn load_defaults(&mut self) {
        let defaults = self.loader.load().await;
        self.apply_defaults(defaults);
    }

    pub fn apply_defaults(&mut self, defaults: DefaultDocuments) {
        if let Some(schema) = defaults.schema {
            self.state.schema_text = schema;
        }
        if let Some(policies) = defaults.policies {
            self.state.policies_text = policies;
        }
    }

    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.state.source_text = text.into();
    }

    pub fn set_claims_input(&mut self, text: impl Into<String>) {
        self.state.claims_input = text.into();
    }

    pub fn set_schema_text(&mut self, text: impl Into<String>) {
        self.state.schema_text = text.into();
    }

    pub fn set_policies_text(&mut self, text: impl Into<String>) {
        self.state.policies_text = text.into();
    }

    /// Enter `Loading` and snapshot the inputs.
    ///
    /// # Errors
    /// Returns [`SourceCheckError::SubmissionInFlight`] while a previous submission is pending.
    pub fn begin_submission(&mut self) -> SourceCheckResult<Submission> {
        let mut slot = lock(&self.in_flight);
        if let Some(id) = *slot {
            tracing::warn!("submission {} still in flight, rejecting new submission", id);
            return Err(SourceCheckError::SubmissionInFlight);
        }

        let id = self.next_submission;
        self.next_submission += 1;
        *slot = Some(id);
        drop(slot);
        self.state.phase = Phase::Loading;

        Ok(Submission {
            id,
            in_flight: self.in_flight.clone(),
            source_text: self.state.source_text.clone(),
            claims_input: self.state.claims_input.clone(),
            schema_text: self.state.schema_text.clone(),
            policies_text: self.state.policies_text.clone(),
        })
    }

    /// Record the outcome of `submission` and leave `Loading`.
    ///
    /// Returns `false`, changing nothing, if `submission` is not the one in flight.
    pub fn complete_submission(
        &mut self,
        submission: Submission,
        outcome: SourceCheckResult<ValidationResult>,
    ) -> bool {
        {
            let mut slot = lock(&self.in_flight);
            if *slot != Some(submission.id) {
                tracing::warn!("ignoring outcome of stale submission {}", submission.id);
                return false;
            }
            *slot = None;
        }

        self.state.phase = match outcome {
            Ok(result) => {
                tracing::info!("submission {} validated", submission.id);
                Phase::Success(result)
            }
            Err(e) => {
                tracing::error!("Validation error: {}", e);
                Phase::Error(e.to_string())
            }
        };
        true
    }

    /// Run one submission end to end and return the resulting phase.
    ///
    /// Schema, policies and transport failures end in [`Phase::Error`] rather than `Err`;
    /// the only `Err` is [`SourceCheckError::SubmissionInFlight`].
    pub async fn submit(&mut self) -> SourceCheckResult<&Phase> {
        let submission = self.begin_submission()?;

        let outcome = match submission.prepare() {
            Ok(prepared) => self.client.validate(&prepared.as_request()).await,
            Err(e) => Err(e),
        };

        self.complete_submission(submission, outcome);
        Ok(self.state.phase())
    }
}
