//! Error types for the preference-driven operations.
//!
//! Declined or cancelled elicitation and failed outbound calls are not
//! errors: they come back as status-tagged values. These variants cover
//! faults that stop an operation from producing any response at all.

use haven_core::HavenError;

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("Invalid preferences: {0}")]
    InvalidPreferences(String),
    #[error("Elicitation failed: {0}")]
    Elicitation(String),
    #[error("HTTP client error: {0}")]
    HttpClient(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<AdvisorError> for HavenError {
    fn from(err: AdvisorError) -> Self {
        match err {
            AdvisorError::InvalidPreferences(msg) => HavenError::Validation(msg),
            other => HavenError::Api(other.to_string()),
        }
    }
}
