//! Application error and API response types

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error carrying a code, a message, and optional details
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details (field errors, ids, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create an error from a code with its default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.message().to_string(),
            details: None,
        }
    }

    /// Create an error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the category of this error
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    // ==================== Convenience constructors ====================

    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, message)
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, format!("{} not found", what.into()))
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, message)
    }

    pub fn business_rule(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::with_message(code, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, message)
    }
}

/// Standard result type for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Uniform API response envelope
///
/// Success responses carry `data`; failures carry `code`, `message`
/// and optionally `details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code, absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Status or error message
    pub message: String,
    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Optional structured error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Success response with payload
    pub fn success(data: T) -> Self {
        Self {
            code: None,
            message: "ok".to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// Success response without payload
    pub fn ok() -> Self {
        Self {
            code: None,
            message: "ok".to_string(),
            data: None,
            details: None,
        }
    }

    /// Success response with a custom message
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            data: Some(data),
            details: None,
        }
    }

    /// Error response from a code and message
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.code()),
            message: message.into(),
            data: None,
            details: None,
        }
    }

    /// Whether this response represents success
    pub fn is_success(&self) -> bool {
        self.code.is_none()
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code.http_status();

        // System-category failures are server faults worth an error log;
        // everything else is expected client traffic.
        if self.category() == ErrorCategory::System {
            tracing::error!(code = self.code.code(), message = %self.message, "server error");
        } else {
            tracing::debug!(code = self.code.code(), message = %self.message, "request failed");
        }

        let body: ApiResponse<Value> = self.into();
        (status, Json(body)).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = match self.code {
            Some(code) => ErrorCode::try_from(code)
                .map(|c| c.http_status())
                .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR),
            None => http::StatusCode::OK,
        };
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_message() {
        let err = AppError::new(ErrorCode::OrderEmpty);
        assert_eq!(err.code, ErrorCode::OrderEmpty);
        assert_eq!(err.message, "Order has no books");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_with_detail() {
        let err = AppError::new(ErrorCode::BookUnavailable)
            .with_detail("book_id", 42)
            .with_detail("title", "Dune");
        let details = err.details.unwrap();
        assert_eq!(details["book_id"], 42);
        assert_eq!(details["title"], "Dune");
    }

    #[test]
    fn test_api_response_success() {
        let resp = ApiResponse::success(vec![1, 2, 3]);
        assert!(resp.is_success());
        assert!(resp.code.is_none());
        assert_eq!(resp.data, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_api_response_from_error() {
        let err = AppError::with_message(ErrorCode::UsernameExists, "username taken");
        let resp: ApiResponse<Value> = err.into();
        assert!(!resp.is_success());
        assert_eq!(resp.code, Some(3004));
        assert_eq!(resp.message, "username taken");
    }

    #[test]
    fn test_success_serialization_skips_code() {
        let resp = ApiResponse::success(1);
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("code").is_none());
        assert_eq!(json["data"], 1);
    }

    #[test]
    fn test_error_display() {
        let err = AppError::validation("first_name is required");
        assert_eq!(err.to_string(), "first_name is required");
    }
}
