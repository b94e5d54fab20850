//! Membership workflow service
//!
//! Orchestrates the payment lifecycle: validates preconditions, applies
//! the guarded transition through the repository, and maps repository
//! failures onto user-facing error codes. Officer review is an ordinary
//! request handled whenever the officer acts; nothing here polls or
//! expires records.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::db::repository::{member, membership, RepoError};
use crate::storage::ReceiptStore;
use shared::models::{
    DecideRequest, MembershipCreate, MembershipRecord, MembershipStatusView, PaymentStatus,
    SubmitPaymentRequest, VerificationOutcome,
};
use shared::{AppError, AppResult, ErrorCode};

#[derive(Clone, Debug)]
pub struct MembershipService {
    pool: SqlitePool,
    receipts: Arc<ReceiptStore>,
}

impl MembershipService {
    pub fn new(pool: SqlitePool, receipts: Arc<ReceiptStore>) -> Self {
        Self { pool, receipts }
    }

    /// Register a member for a tier in a term (creates the NotPaid record).
    pub async fn register(&self, data: MembershipCreate) -> AppResult<MembershipRecord> {
        member::find_by_id(&self.pool, data.member_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::MemberNotFound,
                    format!("Member {} not found", data.member_id),
                )
            })?;

        let member_id = data.member_id;
        let term_id = data.term_id.clone();
        let record = membership::create(&self.pool, data).await.map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::with_message(
                ErrorCode::MembershipAlreadyExists,
                format!("Member {member_id} already has a record for term {term_id}"),
            ),
            other => other.into(),
        })?;

        tracing::info!(
            member_id = record.member_id,
            term_id = %record.term_id,
            tier = record.tier.as_str(),
            "Membership record created"
        );
        Ok(record)
    }

    /// Submit a payment receipt: NotPaid -> Verifying.
    ///
    /// The receipt must already be in the blob store; a Verifying record
    /// must never point at a missing receipt, so a failed or skipped
    /// upload aborts before any state change.
    pub async fn submit_payment(
        &self,
        member_id: i64,
        term_id: &str,
        req: SubmitPaymentRequest,
    ) -> AppResult<MembershipRecord> {
        if !self.receipts.exists(&req.receipt_ref) {
            return Err(AppError::with_message(
                ErrorCode::ReceiptNotFound,
                format!("Receipt {} has not been uploaded", req.receipt_ref),
            ));
        }

        let run = || {
            membership::submit_payment(
                &self.pool,
                member_id,
                term_id,
                req.payment_method,
                &req.receipt_ref,
                shared::util::now_millis(),
            )
        };

        let mut result = run().await;
        if matches!(result, Err(RepoError::Conflict(_))) {
            // One retry after re-read; a second conflict surfaces as transient
            result = run().await;
        }

        let record = result.map_err(|e| Self::map_submit_error(member_id, term_id, e))?;

        tracing::info!(
            member_id,
            term_id = %term_id,
            method = req.payment_method.as_str(),
            receipt_ref = %req.receipt_ref,
            "Payment submitted, awaiting verification"
        );
        Ok(record)
    }

    fn map_submit_error(member_id: i64, term_id: &str, err: RepoError) -> AppError {
        match err {
            RepoError::NotFound(_) => AppError::with_message(
                ErrorCode::MembershipNotFound,
                format!("No membership record for member {member_id} in term {term_id}"),
            ),
            RepoError::InvalidState {
                current: PaymentStatus::Verifying,
            } => AppError::new(ErrorCode::SubmissionPending),
            RepoError::InvalidState {
                current: PaymentStatus::Completed,
            } => AppError::new(ErrorCode::MembershipAlreadyCompleted),
            other => other.into(),
        }
    }

    /// Officer decision on a pending submission: Verifying -> {Completed | NotPaid}.
    pub async fn decide(
        &self,
        member_id: i64,
        term_id: &str,
        req: DecideRequest,
    ) -> AppResult<MembershipRecord> {
        let run = || {
            membership::decide(
                &self.pool,
                member_id,
                term_id,
                req.officer_id,
                req.outcome,
                req.reason.as_deref(),
                shared::util::now_millis(),
            )
        };

        let mut result = run().await;
        if matches!(result, Err(RepoError::Conflict(_))) {
            result = run().await;
        }

        let record = result.map_err(|e| Self::map_decide_error(member_id, term_id, e))?;

        match req.outcome {
            VerificationOutcome::Accept => tracing::info!(
                member_id,
                term_id = %term_id,
                officer_id = req.officer_id,
                "Payment verified, membership completed"
            ),
            VerificationOutcome::Reject => tracing::info!(
                member_id,
                term_id = %term_id,
                officer_id = req.officer_id,
                reason = req.reason.as_deref().unwrap_or(""),
                "Payment rejected, member may resubmit"
            ),
        }
        Ok(record)
    }

    fn map_decide_error(member_id: i64, term_id: &str, err: RepoError) -> AppError {
        match err {
            RepoError::NotFound(_) => AppError::with_message(
                ErrorCode::MembershipNotFound,
                format!("No membership record for member {member_id} in term {term_id}"),
            ),
            RepoError::InvalidState {
                current: PaymentStatus::Completed,
            } => AppError::new(ErrorCode::MembershipAlreadyCompleted),
            RepoError::InvalidState {
                current: PaymentStatus::NotPaid,
            } => AppError::new(ErrorCode::NoPendingSubmission),
            other => other.into(),
        }
    }

    /// Read-only status projection for one member/term, with history.
    pub async fn status(&self, member_id: i64, term_id: &str) -> AppResult<MembershipStatusView> {
        let record = membership::find_by_member_term(&self.pool, member_id, term_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::MembershipNotFound,
                    format!("No membership record for member {member_id} in term {term_id}"),
                )
            })?;

        let member = member::find_by_id(&self.pool, member_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::MemberNotFound,
                    format!("Member {member_id} not found"),
                )
            })?;

        let history = membership::history(&self.pool, record.id).await?;

        Ok(MembershipStatusView {
            record,
            full_name: member.full_name,
            student_number: member.student_number,
            history,
        })
    }
}
