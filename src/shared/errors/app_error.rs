use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Duplicate filename: a batch named '{0}' already exists")]
    DuplicateFilename(String),

    #[error("Invalid transition from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Status mismatch: expected '{expected}', found '{actual}'")]
    StatusMismatch { expected: String, actual: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Enrichment endpoint responded with HTTP {code}: {body}")]
    NonSuccessResponse { code: u16, body: String },

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Coarse classification used by callers to decide how to react to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Input violates an invariant. Retrying the same request cannot succeed.
    Validation,
    /// Entity is not in the required state. Re-read, then retry.
    Precondition,
    /// The enrichment call failed. Status was left untouched.
    ExternalDependency,
    NotFound,
    Storage,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::DuplicateFilename(_)
            | AppError::InvalidTransition { .. }
            | AppError::ValidationError(_)
            | AppError::ConfirmationRequired(_)
            | AppError::ConfigurationError(_) => ErrorCategory::Validation,
            AppError::PreconditionFailed(_) | AppError::StatusMismatch { .. } => {
                ErrorCategory::Precondition
            }
            AppError::TransportError(_) | AppError::NonSuccessResponse { .. } => {
                ErrorCategory::ExternalDependency
            }
            AppError::NotFound(_) => ErrorCategory::NotFound,
            AppError::DatabaseError(_) | AppError::SerializationError(_) => ErrorCategory::Storage,
        }
    }

    /// Whether a caller-driven retry can make progress after re-reading state.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Precondition | ErrorCategory::ExternalDependency
        )
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => {
                AppError::NotFound("Record not found in database".to_string())
            }
            _ => AppError::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        AppError::DatabaseError(format!("Database pool error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::TransportError("Request to enrichment endpoint timed out".to_string())
        } else if err.is_connect() {
            AppError::TransportError("Failed to connect to enrichment endpoint".to_string())
        } else if let Some(status) = err.status() {
            AppError::NonSuccessResponse {
                code: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            AppError::TransportError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
