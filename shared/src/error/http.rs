//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::MemberNotFound
            | Self::MembershipNotFound
            | Self::QrCodeNotFound
            | Self::ReceiptNotFound
            | Self::EventNotFound
            | Self::AnnouncementNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict (state machine violations and duplicates)
            Self::AlreadyExists
            | Self::StudentNumberExists
            | Self::EmailExists
            | Self::MembershipAlreadyExists
            | Self::SubmissionPending
            | Self::MembershipAlreadyCompleted
            | Self::NoPendingSubmission
            | Self::InvalidTransition
            | Self::ConcurrentUpdate => StatusCode::CONFLICT,

            // 403 Forbidden (registration window)
            Self::RegistrationNotOpen | Self::RegistrationClosed => StatusCode::FORBIDDEN,

            // 413 Payload Too Large
            Self::ReceiptTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            // 503 Service Unavailable (transient, client can retry)
            Self::ReceiptStorageFailed => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::MembershipNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::ReceiptNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ErrorCode::EventNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(ErrorCode::AlreadyExists.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::MembershipAlreadyExists.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::SubmissionPending.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::NoPendingSubmission.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::InvalidTransition.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::ConcurrentUpdate.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_forbidden_status() {
        assert_eq!(
            ErrorCode::RegistrationNotOpen.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::RegistrationClosed.http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_transient_status() {
        assert_eq!(
            ErrorCode::ReceiptStorageFailed.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::ReceiptTooLarge.http_status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_internal_error_status() {
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_bad_request_status() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::PaymentInvalidMethod.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::EmptyReceipt.http_status(), StatusCode::BAD_REQUEST);
    }
}
