use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use server::queue_manager::{QueueError, TOKEN_NOT_FOUND};
use std::fmt::Display;

/// Application-wide error types for the walk-in HTTP service.
///
/// # Error Categories
///
/// - [`AppError::Queue`] - Failures reported by the queue manager, including
///   unknown tokens on status lookups
/// - [`AppError::Config`] - Configuration loading and validation errors
/// - [`AppError::Io`] - Listener binding and other socket failures
///
/// Only `Queue` errors reach HTTP clients. Unknown tokens become 404 with the
/// fixed `Token not found` detail; everything else is a 500. Queue failures
/// are already logged by the queue manager, so responses are built silently.
#[derive(Debug)]
pub enum AppError {
    Queue(QueueError),
    Config(String),
    Io(std::io::Error),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Queue(err) => write!(f, "Queue Error: {err}"),
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Io(err) => write!(f, "I/O Error: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Queue(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Config(_) => None,
        }
    }
}

impl From<QueueError> for AppError {
    fn from(err: QueueError) -> Self {
        AppError::Queue(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Queue(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `detail` field of the response body
    pub fn detail(&self) -> String {
        match self {
            AppError::Queue(err) if err.is_not_found() => TOKEN_NOT_FOUND.to_string(),
            AppError::Queue(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(serde_json::json!({ "detail": self.detail() }))).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
