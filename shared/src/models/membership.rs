//! Membership lifecycle model
//!
//! One [`MembershipRecord`] per member per term. The record's
//! [`PaymentStatus`] moves through a fixed state machine:
//!
//! ```text
//! NotPaid --submit--> Verifying --accept--> Completed   (terminal)
//!                     Verifying --reject--> NotPaid
//! ```
//!
//! Every other transition is rejected at the persistence boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Payment status of a membership record for a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentStatus {
    NotPaid,
    Verifying,
    Completed,
}

impl PaymentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotPaid => "NOT_PAID",
            Self::Verifying => "VERIFYING",
            Self::Completed => "COMPLETED",
        }
    }

    /// Whether `next` is a permitted successor of `self`.
    ///
    /// The only permitted regression is Verifying -> NotPaid (rejection).
    /// Completed is terminal for the term.
    pub const fn can_transition_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (Self::NotPaid, Self::Verifying)
                | (Self::Verifying, Self::Completed)
                | (Self::Verifying, Self::NotPaid)
        )
    }

    /// Completed records accept no further transitions.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid payment status: {0}")]
pub struct ParsePaymentStatusError(String);

impl FromStr for PaymentStatus {
    type Err = ParsePaymentStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NOT_PAID" => Ok(Self::NotPaid),
            "VERIFYING" => Ok(Self::Verifying),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(ParsePaymentStatusError(other.to_string())),
        }
    }
}

/// Payment rail selected at submission time
///
/// Selection only determines which QR code is shown to the member before
/// the out-of-band transfer; no settlement API is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum PaymentMethod {
    #[serde(rename = "GCASH")]
    #[cfg_attr(feature = "db", sqlx(rename = "GCASH"))]
    GCash,
    #[serde(rename = "PAYMAYA")]
    #[cfg_attr(feature = "db", sqlx(rename = "PAYMAYA"))]
    PayMaya,
}

impl PaymentMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GCash => "GCASH",
            Self::PayMaya => "PAYMAYA",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid payment method: {0}")]
pub struct ParsePaymentMethodError(String);

impl FromStr for PaymentMethod {
    type Err = ParsePaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GCASH" => Ok(Self::GCash),
            "PAYMAYA" => Ok(Self::PayMaya),
            other => Err(ParsePaymentMethodError(other.to_string())),
        }
    }
}

/// Membership tier chosen at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum MembershipTier {
    Regular,
    Associate,
}

impl MembershipTier {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "REGULAR",
            Self::Associate => "ASSOCIATE",
        }
    }
}

/// Officer decision on a pending receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationOutcome {
    Accept,
    Reject,
}

/// Membership record - one per member per term
///
/// Mutated only by payment submission and the officer decision; never
/// deleted. A past term's Completed record is never overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MembershipRecord {
    pub id: i64,
    pub member_id: i64,
    pub term_id: String,
    pub tier: MembershipTier,
    pub status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub receipt_ref: Option<String>,
    pub amount: Option<f64>,
    pub denial_reason: Option<String>,
    pub submitted_at: Option<i64>,
    pub decided_at: Option<i64>,
    pub decided_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Membership record joined with member identity (officer list views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MembershipWithMember {
    pub id: i64,
    pub member_id: i64,
    pub term_id: String,
    pub tier: MembershipTier,
    pub status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub receipt_ref: Option<String>,
    pub amount: Option<f64>,
    pub denial_reason: Option<String>,
    pub submitted_at: Option<i64>,
    pub decided_at: Option<i64>,
    pub decided_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub full_name: String,
    pub student_number: String,
}

/// Create membership record payload (member registers a tier for a term)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipCreate {
    pub member_id: i64,
    pub term_id: String,
    pub tier: MembershipTier,
    pub amount: Option<f64>,
}

/// Submit payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPaymentRequest {
    pub payment_method: PaymentMethod,
    pub receipt_ref: String,
}

/// Officer decision payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecideRequest {
    pub officer_id: i64,
    pub outcome: VerificationOutcome,
    pub reason: Option<String>,
}

/// One committed status transition
///
/// Append-only; the receipt ref live at the transition is kept here so
/// rejected submissions stay traceable after the record's current
/// submission fields are cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MembershipHistoryEntry {
    pub id: i64,
    pub membership_id: i64,
    pub status: PaymentStatus,
    pub actor_id: i64,
    pub receipt_ref: Option<String>,
    pub note: Option<String>,
    pub created_at: i64,
}

/// Read-only status projection (Dashboard / Membership page)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipStatusView {
    #[serde(flatten)]
    pub record: MembershipRecord,
    pub full_name: String,
    pub student_number: String,
    pub history: Vec<MembershipHistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table_matches_state_machine() {
        use PaymentStatus::*;

        assert!(NotPaid.can_transition_to(Verifying));
        assert!(Verifying.can_transition_to(Completed));
        assert!(Verifying.can_transition_to(NotPaid));

        // No skipping Verifying, no leaving Completed
        assert!(!NotPaid.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(NotPaid));
        assert!(!Completed.can_transition_to(Verifying));
        assert!(!NotPaid.can_transition_to(NotPaid));
        assert!(!Verifying.can_transition_to(Verifying));
        assert!(!Completed.can_transition_to(Completed));
    }

    #[test]
    fn completed_is_only_terminal_state() {
        assert!(PaymentStatus::Completed.is_terminal());
        assert!(!PaymentStatus::NotPaid.is_terminal());
        assert!(!PaymentStatus::Verifying.is_terminal());
    }

    #[test]
    fn status_parses_case_insensitive() {
        assert_eq!(
            "verifying".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Verifying
        );
        assert_eq!(
            "NOT_PAID".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::NotPaid
        );
        assert_eq!(
            " completed ".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Completed
        );
        assert!("paid".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::NotPaid).unwrap(),
            "\"NOT_PAID\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Verifying).unwrap(),
            "\"VERIFYING\""
        );
    }

    #[test]
    fn payment_method_parses_and_serializes() {
        assert_eq!(
            "gcash".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::GCash
        );
        assert_eq!(
            "PAYMAYA".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::PayMaya
        );
        assert!("stripe".parse::<PaymentMethod>().is_err());

        assert_eq!(
            serde_json::to_string(&PaymentMethod::GCash).unwrap(),
            "\"GCASH\""
        );
        let parsed: PaymentMethod = serde_json::from_str("\"PAYMAYA\"").unwrap();
        assert_eq!(parsed, PaymentMethod::PayMaya);
    }

    #[test]
    fn verification_outcome_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&VerificationOutcome::Accept).unwrap(),
            "\"accept\""
        );
        let parsed: VerificationOutcome = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(parsed, VerificationOutcome::Reject);
    }
}
