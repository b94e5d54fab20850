//! Unified error codes for SPECS Nexus
//!
//! This module defines all error codes used across the server and frontend.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Member errors
//! - 2xxx: Membership lifecycle errors
//! - 3xxx: Payment and receipt errors
//! - 4xxx: Event errors
//! - 5xxx: Announcement errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Member ====================
    /// Member not found
    MemberNotFound = 1001,
    /// Student number already registered
    StudentNumberExists = 1002,
    /// Email already registered
    EmailExists = 1003,

    // ==================== 2xxx: Membership ====================
    /// Membership record not found
    MembershipNotFound = 2001,
    /// Membership record already exists for this member and term
    MembershipAlreadyExists = 2002,
    /// A payment submission is already pending review
    SubmissionPending = 2003,
    /// Membership has already been completed for this term
    MembershipAlreadyCompleted = 2004,
    /// No pending submission to decide on
    NoPendingSubmission = 2005,
    /// Status transition not permitted
    InvalidTransition = 2006,
    /// Record was modified concurrently
    ConcurrentUpdate = 2007,

    // ==================== 3xxx: Payment / Receipt ====================
    /// Invalid payment method
    PaymentInvalidMethod = 3001,
    /// No QR code uploaded for this payment rail
    QrCodeNotFound = 3002,
    /// Receipt not found
    ReceiptNotFound = 3101,
    /// Receipt file too large
    ReceiptTooLarge = 3102,
    /// Empty receipt file
    EmptyReceipt = 3103,
    /// No file provided in request
    NoFileProvided = 3104,
    /// Receipt storage failed
    ReceiptStorageFailed = 3105,
    /// Malformed receipt reference
    InvalidReceiptRef = 3106,

    // ==================== 4xxx: Event ====================
    /// Event not found
    EventNotFound = 4001,
    /// Event registration has not started
    RegistrationNotOpen = 4002,
    /// Event registration has ended
    RegistrationClosed = 4003,

    // ==================== 5xxx: Announcement ====================
    /// Announcement not found
    AnnouncementNotFound = 5001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Member
            ErrorCode::MemberNotFound => "Member not found",
            ErrorCode::StudentNumberExists => "Student number already registered",
            ErrorCode::EmailExists => "Email already registered",

            // Membership
            ErrorCode::MembershipNotFound => "Membership record not found",
            ErrorCode::MembershipAlreadyExists => {
                "Membership record already exists for this member and term"
            }
            ErrorCode::SubmissionPending => "A payment submission is already pending review",
            ErrorCode::MembershipAlreadyCompleted => {
                "Membership has already been completed for this term"
            }
            ErrorCode::NoPendingSubmission => "No pending submission to decide on",
            ErrorCode::InvalidTransition => "Status transition not permitted",
            ErrorCode::ConcurrentUpdate => "Record was modified concurrently, please retry",

            // Payment / Receipt
            ErrorCode::PaymentInvalidMethod => "Payment method must be GCASH or PAYMAYA",
            ErrorCode::QrCodeNotFound => "No QR code uploaded for this payment rail",
            ErrorCode::ReceiptNotFound => "Receipt not found",
            ErrorCode::ReceiptTooLarge => "Receipt file too large",
            ErrorCode::EmptyReceipt => "Empty receipt file",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::ReceiptStorageFailed => "Receipt storage failed, please retry the upload",
            ErrorCode::InvalidReceiptRef => "Malformed receipt reference",

            // Event
            ErrorCode::EventNotFound => "Event not found",
            ErrorCode::RegistrationNotOpen => "Registration for this event has not started yet",
            ErrorCode::RegistrationClosed => "Registration for this event has ended",

            // Announcement
            ErrorCode::AnnouncementNotFound => "Announcement not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Member
            1001 => Ok(ErrorCode::MemberNotFound),
            1002 => Ok(ErrorCode::StudentNumberExists),
            1003 => Ok(ErrorCode::EmailExists),

            // Membership
            2001 => Ok(ErrorCode::MembershipNotFound),
            2002 => Ok(ErrorCode::MembershipAlreadyExists),
            2003 => Ok(ErrorCode::SubmissionPending),
            2004 => Ok(ErrorCode::MembershipAlreadyCompleted),
            2005 => Ok(ErrorCode::NoPendingSubmission),
            2006 => Ok(ErrorCode::InvalidTransition),
            2007 => Ok(ErrorCode::ConcurrentUpdate),

            // Payment / Receipt
            3001 => Ok(ErrorCode::PaymentInvalidMethod),
            3002 => Ok(ErrorCode::QrCodeNotFound),
            3101 => Ok(ErrorCode::ReceiptNotFound),
            3102 => Ok(ErrorCode::ReceiptTooLarge),
            3103 => Ok(ErrorCode::EmptyReceipt),
            3104 => Ok(ErrorCode::NoFileProvided),
            3105 => Ok(ErrorCode::ReceiptStorageFailed),
            3106 => Ok(ErrorCode::InvalidReceiptRef),

            // Event
            4001 => Ok(ErrorCode::EventNotFound),
            4002 => Ok(ErrorCode::RegistrationNotOpen),
            4003 => Ok(ErrorCode::RegistrationClosed),

            // Announcement
            5001 => Ok(ErrorCode::AnnouncementNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
