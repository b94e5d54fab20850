//! Application error and response envelope
//!
//! [`AppError`] pairs an [`ErrorCode`] with a human-readable message and
//! optional structured details; it converts straight into an HTTP
//! response. [`ApiResponse`] is the envelope error responses travel in
//! (successful handlers return their payload bare).

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error carrying a code, message and optional details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional context (offending field, conflicting value, ...)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach a detail entry
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// HTTP status this error maps to
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // Shorthand constructors for the codes raised all over the codebase.

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Compare-and-set failure; the caller may re-read and retry
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConcurrentUpdate, msg)
    }
}

/// Response envelope
///
/// `code` is 0 on success. Failures omit `data` and may carry `details`;
/// the numeric code also selects the HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

/// Result type alias for AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(code = %self.code, message = %self.message, "System error");
        }

        let status = self.http_status();
        (status, Json(ApiResponse::<()>::error(&self))).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = match self.code {
            Some(0) | None => StatusCode::OK,
            Some(c) => ErrorCode::try_from(c)
                .map(|c| c.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_message_comes_from_the_code() {
        let err = AppError::new(ErrorCode::SubmissionPending);
        assert_eq!(err.code, ErrorCode::SubmissionPending);
        assert_eq!(err.message, "A payment submission is already pending review");
        assert!(err.details.is_none());
    }

    #[test]
    fn custom_message_overrides_the_default() {
        let err = AppError::with_message(ErrorCode::MembershipNotFound, "No record for 2024-2025");
        assert_eq!(format!("{err}"), "No record for 2024-2025");
    }

    #[test]
    fn details_accumulate() {
        let err = AppError::validation("term_id is required")
            .with_detail("field", "term_id")
            .with_detail("reason", "required");

        let details = err.details.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details.get("field").unwrap(), "term_id");
    }

    #[test]
    fn status_follows_the_code() {
        assert_eq!(
            AppError::new(ErrorCode::MembershipNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("racing decision").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::new(ErrorCode::ReceiptStorageFailed).http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::database("pool closed").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_envelope_carries_code_message_and_details() {
        let err = AppError::with_message(ErrorCode::MembershipNotFound, "No record for term")
            .with_detail("term_id", "2024-2025");
        let envelope = ApiResponse::<()>::error(&err);

        assert_eq!(envelope.code, Some(2001));
        assert_eq!(envelope.message, "No record for term");
        assert!(envelope.data.is_none());

        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains("\"code\":2001"));
        assert!(json.contains("\"term_id\":\"2024-2025\""));
        // No null data key on the wire
        assert!(!json.contains("\"data\""));
    }

    #[test]
    fn success_envelope_round_trips() {
        let json = serde_json::to_string(&ApiResponse::success(vec![1, 2, 3])).unwrap();
        let parsed: ApiResponse<Vec<i32>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.code, Some(0));
        assert_eq!(parsed.message, "OK");
        assert_eq!(parsed.data, Some(vec![1, 2, 3]));
    }
}
