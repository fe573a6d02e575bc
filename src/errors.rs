use thiserror::Error;

use crate::core::validation::ValidationErrors;

/// Error type shared by the tracker model, services, and storage backends.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Stored data uses schema version {found}, newest supported is {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },
}

pub type Result<T> = std::result::Result<T, TrackerError>;

impl From<ValidationErrors> for TrackerError {
    fn from(errors: ValidationErrors) -> Self {
        TrackerError::Validation(errors)
    }
}
