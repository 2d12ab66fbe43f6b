//! Event Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Event-specific result type alias
pub type EventResult<T> = Result<T, EventError>;

/// Event-specific error variants
#[derive(Debug, Error)]
pub enum EventError {
    /// Target record does not exist (or the id is not even well-formed)
    #[error("Hackathon not found")]
    NotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EventError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            EventError::NotFound => ErrorKind::NotFound,
            EventError::Database(_) | EventError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError, genericizing server-side detail
    pub fn to_app_error(&self) -> AppError {
        match self {
            EventError::Database(_) | EventError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            EventError::Database(e) => {
                tracing::error!(error = %e, "Event database error");
            }
            EventError::Internal(msg) => {
                tracing::error!(message = %msg, "Event internal error");
            }
            EventError::NotFound => {
                tracing::debug!("Hackathon not found");
            }
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
