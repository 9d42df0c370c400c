//! Relay error types with HTTP status code mapping.
//!
//! [`ChatError`] is the central error type for the relay. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "unknown participant: alice"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Relay error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Code | Variant            | HTTP Status             |
/// |------|--------------------|-------------------------|
/// | 1001 | InvalidInput       | 400 Bad Request         |
/// | 2001 | UnknownParticipant | 404 Not Found           |
/// | 2002 | Departed           | 410 Gone                |
/// | 2003 | TimedOut           | 504 Gateway Timeout     |
/// | 3000 | Internal           | 500 Internal Server Error |
///
/// `TimedOut` is a routine long-poll outcome; callers retry immediately.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// A required field was missing or empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The participant has no active session.
    #[error("unknown participant: {0}")]
    UnknownParticipant(String),

    /// The participant left while a receive was pending.
    #[error("participant departed: {0}")]
    Departed(String),

    /// No message arrived within the poll window.
    #[error("timed out waiting for a message")]
    TimedOut,

    /// Internal relay failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidInput(_) => 1001,
            Self::UnknownParticipant(_) => 2001,
            Self::Departed(_) => 2002,
            Self::TimedOut => 2003,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::UnknownParticipant(_) => StatusCode::NOT_FOUND,
            Self::Departed(_) => StatusCode::GONE,
            Self::TimedOut => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
