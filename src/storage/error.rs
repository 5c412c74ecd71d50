use thiserror::Error;

/// Errors raised by object-store backends
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Write rejected: {0}")]
    WriteRejected(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl StoreError {
    /// Check if the error means the object simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
