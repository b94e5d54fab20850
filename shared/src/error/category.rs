//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Member errors
/// - 2xxx: Membership errors
/// - 3xxx: Payment and receipt errors
/// - 4xxx: Event errors
/// - 5xxx: Announcement errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Member errors (1xxx)
    Member,
    /// Membership lifecycle errors (2xxx)
    Membership,
    /// Payment and receipt errors (3xxx)
    Payment,
    /// Event errors (4xxx)
    Event,
    /// Announcement errors (5xxx)
    Announcement,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Member,
            2000..3000 => Self::Membership,
            3000..4000 => Self::Payment,
            4000..5000 => Self::Event,
            5000..6000 => Self::Announcement,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Member => "member",
            Self::Membership => "membership",
            Self::Payment => "payment",
            Self::Event => "event",
            Self::Announcement => "announcement",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
