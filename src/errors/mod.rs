//! Error handling module for the BeautyConnect backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::StoreError;

/// Longest diagnostic carried by a server-error response.
pub const MAX_DIAGNOSTIC_CHARS: usize = 200;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
    pub const STORE_WRITE_ERROR: &str = "STORE_WRITE_ERROR";
    pub const STORE_READ_ERROR: &str = "STORE_READ_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Request shape or constraint violation, raised before any store call
    InvalidInput { field: String, message: String },
    /// Document store failure
    Store(StoreError),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Build an `InvalidInput` error for the given field.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput { .. } => codes::INVALID_INPUT,
            AppError::Store(StoreError::Unavailable(_)) => codes::STORE_UNAVAILABLE,
            AppError::Store(StoreError::Write(_)) => codes::STORE_WRITE_ERROR,
            AppError::Store(StoreError::Read(_)) => codes::STORE_READ_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message. Server-side diagnostics are truncated.
    pub fn message(&self) -> String {
        match self {
            AppError::InvalidInput { message, .. } => message.clone(),
            AppError::Store(err) => truncate(&err.to_string(), MAX_DIAGNOSTIC_CHARS),
            AppError::Internal(msg) => truncate(msg, MAX_DIAGNOSTIC_CHARS),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Store error: {:?}", err);
        AppError::Store(err)
    }
}

/// Turn a handler panic into an `InternalError` response.
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let details = match error {
            AppError::InvalidInput { field, .. } => Some(serde_json::json!({ "field": field })),
            _ => None,
        };

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_422_with_field() {
        let err = AppError::invalid("email", "value is not a valid email address");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), codes::INVALID_INPUT);

        let body = ErrorResponse::new(&err);
        assert!(!body.success);
        assert_eq!(body.error.details.unwrap()["field"], "email");
    }

    #[test]
    fn test_store_errors_are_server_errors() {
        let unavailable = AppError::from(StoreError::Unavailable("no connection".into()));
        assert_eq!(unavailable.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(unavailable.error_code(), codes::STORE_UNAVAILABLE);

        let write = AppError::from(StoreError::Write("disk full".into()));
        assert_eq!(write.error_code(), codes::STORE_WRITE_ERROR);
    }

    #[test]
    fn test_server_messages_are_truncated() {
        let err = AppError::Internal("ж".repeat(500));
        let message = err.message();
        assert_eq!(message.chars().count(), MAX_DIAGNOSTIC_CHARS + 1);
        assert!(message.ends_with('…'));
    }

    #[test]
    fn test_panic_becomes_internal_error() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_truncate_leaves_short_text_alone() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }
}
