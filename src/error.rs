use crate::storage::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Dependency unavailable: {kind} '{name}': {reason}")]
    DependencyUnavailable {
        kind: &'static str,
        name: String,
        reason: String,
    },

    #[error("Identity provider '{0}' is not ready: status exposes no endpoint")]
    IdentityProviderNotReady(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl AppError {
    /// Wrap a failed read of a dependent cluster, secret or member list
    pub fn dependency(kind: &'static str, name: impl Into<String>, err: StoreError) -> Self {
        AppError::DependencyUnavailable {
            kind,
            name: name.into(),
            reason: err.to_string(),
        }
    }

    /// Errors that abort a pass because external state is not there yet.
    /// The next reconciliation trigger is expected to succeed once it is.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::DependencyUnavailable { .. } | AppError::IdentityProviderNotReady(_)
        )
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::PersistenceFailure(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::SerializationError(format!("YAML error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
