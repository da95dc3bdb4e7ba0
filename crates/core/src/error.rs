use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum SourceCheckError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to parse schema: {0}")]
    SchemaParse(serde_yaml::Error),
    #[error("failed to parse policies: {0}")]
    PoliciesParse(serde_yaml::Error),
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
    #[error("request failed: {0}")]
    Transport(reqwest::Error),
    /// Non-success status from the service. Displays as the extracted message only.
    #[error("{message}")]
    Service { status: StatusCode, message: String },
    #[error("failed to decode response: {0}")]
    Decode(reqwest::Error),
    #[error("a validation request is already in flight")]
    SubmissionInFlight,
}

pub type SourceCheckResult<T> = std::result::Result<T, SourceCheckError>;
