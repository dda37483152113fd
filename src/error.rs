/// Unified error types for the metadata publisher
use thiserror::Error;

/// Main error type for publication and registration
#[derive(Error, Debug)]
pub enum PublishError {
    /// Document cannot be canonically encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Content store upload failed
    #[error("Content store unavailable: {0}")]
    StoreUnavailable(String),

    /// External registration call failed or timed out
    #[error("Registration failed: {0}")]
    RegistrationFailed(String),

    /// Invalid configuration or input
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PublishError {
    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            PublishError::Serialization(_) => "serialization",
            PublishError::StoreUnavailable(_) => "store_unavailable",
            PublishError::RegistrationFailed(_) => "registration_failed",
            PublishError::Validation(_) => "validation",
            PublishError::Io(_) => "io",
        }
    }
}

impl From<serde_json::Error> for PublishError {
    fn from(e: serde_json::Error) -> Self {
        PublishError::Serialization(e.to_string())
    }
}

/// Result type alias for publisher operations
pub type PublishResult<T> = Result<T, PublishError>;
