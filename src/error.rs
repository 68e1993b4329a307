//! Error types for the shopintent crate

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum IntentError {
    /// Dataset file is missing or not parseable as delimited tabular data
    #[error("Data error: {0}")]
    DataError(String),

    /// A required column or feature key is absent
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// The model artifact does not exist at the given path
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    /// The model artifact exists but cannot be read back
    #[error("Artifact corrupt: {0}")]
    ArtifactCorrupt(String),

    /// Predict was called before fit
    #[error("Model is not fitted")]
    ModelNotFitted,

    /// Matrix dimensions do not line up
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    /// Invalid input or configuration
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Serialization failure
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, IntentError>;

impl From<polars::prelude::PolarsError> for IntentError {
    fn from(e: polars::prelude::PolarsError) -> Self {
        IntentError::DataError(e.to_string())
    }
}

impl From<std::io::Error> for IntentError {
    fn from(e: std::io::Error) -> Self {
        IntentError::DataError(e.to_string())
    }
}

impl From<serde_json::Error> for IntentError {
    fn from(e: serde_json::Error) -> Self {
        IntentError::SerializationError(e.to_string())
    }
}
