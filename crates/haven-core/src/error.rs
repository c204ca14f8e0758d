use thiserror::Error;

/// Top-level error type for the Haven system.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for HavenError` where a conversion is needed, so
/// that the `?` operator works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HavenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for HavenError {
    fn from(err: toml::de::Error) -> Self {
        HavenError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for HavenError {
    fn from(err: toml::ser::Error) -> Self {
        HavenError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for HavenError {
    fn from(err: serde_json::Error) -> Self {
        HavenError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Haven operations.
pub type Result<T> = std::result::Result<T, HavenError>;
