use std::borrow::Cow;

use thiserror::Error;

/// Top-level error type returned by Yatzia stores and the engagement
/// coordinator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Validation failed for one or more fields.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// Target entity was missing when the operation required it.
    #[error("entity not found")]
    NotFound { entity_id: Option<String> },

    /// The backend could not serve the request right now; the caller may
    /// re-issue the same operation.
    #[error("transient conflict: {message}")]
    TransientConflict { message: String },

    /// Invalid input supplied to a store operation (bad cursor, empty id).
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// Underlying Redis command failed.
    #[error("redis error: {0}")]
    Redis(redis::RedisError),

    /// Anything that does not fit the taxonomy above.
    #[error("{message}")]
    Other { message: Cow<'static, str> },
}

impl StoreError {
    pub fn not_found(entity_id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity_id: Some(entity_id.into()),
        }
    }

    pub fn other(message: impl Into<Cow<'static, str>>) -> Self {
        StoreError::Other {
            message: message.into(),
        }
    }

    /// True when re-issuing the same operation is a reasonable response.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::TransientConflict { .. })
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        use redis::ErrorKind;
        match err.kind() {
            ErrorKind::TryAgain | ErrorKind::BusyLoadingError | ErrorKind::MasterDown => {
                StoreError::TransientConflict {
                    message: err.to_string(),
                }
            }
            ErrorKind::IoError if err.is_connection_dropped() => StoreError::TransientConflict {
                message: err.to_string(),
            },
            _ => StoreError::Redis(err),
        }
    }
}

/// Collection of validation issues encountered while preparing a mutation.
#[derive(Debug, Error)]
#[error("validation errors: {issues:?}")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Detailed validation failure for a single field or logical path.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias for validation outcomes.
pub type ValidationResult<T> = Result<T, ValidationError>;
