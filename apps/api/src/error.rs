//! # HTTP Error Type
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Handler → RegistryService → Result<T, RegistryError>                  │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │  ApiError::from(RegistryError)                                         │
//! │  ├── ValidationFailed   → 400 VALIDATION_ERROR (+ violations)          │
//! │  ├── CodeNotFound       → 404 NOT_FOUND                                │
//! │  ├── CountryNotFound    → 404 NOT_FOUND                                │
//! │  ├── CodeAlreadyExists  → 409 CONFLICT                                 │
//! │  ├── Timeout            → 504 TIMEOUT                                  │
//! │  └── Store(_)           → 500 INTERNAL (logged, opaque message)        │
//! │                                                                         │
//! │  JsonRejection          → 400 BAD_REQUEST                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Body
//! ```json
//! {
//!   "code": "VALIDATION_ERROR",
//!   "message": "Validation failed: code: is required",
//!   "violations": [{ "field": "code", "kind": "required" }]
//! }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use swift_core::{RegistryError, Violations};

/// Error returned from HTTP handlers.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,

    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,

    /// Every failed rule, for validation errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Violations>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Candidate record failed validation (400)
    ValidationError,

    /// Body is not a JSON record (400)
    BadRequest,

    /// Code or country has no records (404)
    NotFound,

    /// Code already stored (409)
    Conflict,

    /// Registry deadline exceeded (504)
    Timeout,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError | ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error with the code's status.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            status: code.status(),
            code,
            message: message.into(),
            violations: None,
        }
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal() -> Self {
        ApiError::new(ErrorCode::Internal, "Internal server error")
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        let message = err.to_string();
        match err {
            RegistryError::ValidationFailed(violations) => ApiError {
                violations: Some(violations),
                ..ApiError::new(ErrorCode::ValidationError, message)
            },
            RegistryError::CodeNotFound(_) | RegistryError::CountryNotFound(_) => {
                ApiError::new(ErrorCode::NotFound, message)
            }
            RegistryError::CodeAlreadyExists(_) => ApiError::new(ErrorCode::Conflict, message),
            RegistryError::Timeout(_) => {
                tracing::warn!(error = %message, "Registry operation timed out");
                ApiError::new(ErrorCode::Timeout, "Request timed out")
            }
            RegistryError::Store(e) => {
                tracing::error!(error = %e, "Store operation failed");
                ApiError::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
