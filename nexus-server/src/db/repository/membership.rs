//! Membership Repository
//!
//! Persistence boundary for the payment lifecycle. Every status write is a
//! compare-and-set on the previously observed status: the UPDATE carries
//! `AND status = ?` and a zero row count means the guard failed, never a
//! partial write. The record row and its history row commit in one
//! transaction.

use super::{RepoError, RepoResult};
use shared::models::{
    MembershipCreate, MembershipHistoryEntry, MembershipRecord, MembershipWithMember,
    PaymentMethod, PaymentStatus, VerificationOutcome,
};
use sqlx::SqlitePool;

const MEMBERSHIP_SELECT: &str = "SELECT id, member_id, term_id, tier, status, payment_method, receipt_ref, amount, denial_reason, submitted_at, decided_at, decided_by, created_at, updated_at FROM membership";

const MEMBERSHIP_WITH_MEMBER_SELECT: &str = "SELECT ms.id, ms.member_id, ms.term_id, ms.tier, ms.status, ms.payment_method, ms.receipt_ref, ms.amount, ms.denial_reason, ms.submitted_at, ms.decided_at, ms.decided_by, ms.created_at, ms.updated_at, m.full_name, m.student_number FROM membership ms JOIN member m ON ms.member_id = m.id";

/// Reject writes that would violate the transition table.
fn ensure_transition(from: PaymentStatus, to: PaymentStatus) -> RepoResult<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(RepoError::InvalidTransition { from, to })
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MembershipRecord>> {
    let sql = format!("{} WHERE id = ?", MEMBERSHIP_SELECT);
    let row = sqlx::query_as::<_, MembershipRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_member_term(
    pool: &SqlitePool,
    member_id: i64,
    term_id: &str,
) -> RepoResult<Option<MembershipRecord>> {
    let sql = format!("{} WHERE member_id = ? AND term_id = ?", MEMBERSHIP_SELECT);
    let row = sqlx::query_as::<_, MembershipRecord>(&sql)
        .bind(member_id)
        .bind(term_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_member(
    pool: &SqlitePool,
    member_id: i64,
) -> RepoResult<Vec<MembershipRecord>> {
    let sql = format!(
        "{} WHERE member_id = ? ORDER BY created_at DESC",
        MEMBERSHIP_SELECT
    );
    let rows = sqlx::query_as::<_, MembershipRecord>(&sql)
        .bind(member_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// All records joined with member identity, newest first, optionally
/// filtered by status (officer review queue uses `Verifying`).
pub async fn find_all(
    pool: &SqlitePool,
    status: Option<PaymentStatus>,
) -> RepoResult<Vec<MembershipWithMember>> {
    let rows = match status {
        Some(s) => {
            let sql = format!(
                "{} WHERE ms.status = ? ORDER BY ms.created_at DESC",
                MEMBERSHIP_WITH_MEMBER_SELECT
            );
            sqlx::query_as::<_, MembershipWithMember>(&sql)
                .bind(s.as_str())
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!(
                "{} ORDER BY ms.created_at DESC",
                MEMBERSHIP_WITH_MEMBER_SELECT
            );
            sqlx::query_as::<_, MembershipWithMember>(&sql)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

/// Create the record for a member/term registration (status NOT_PAID).
///
/// A record per (member, term) is unique; re-registration for a past term
/// never overwrites an existing record.
pub async fn create(pool: &SqlitePool, data: MembershipCreate) -> RepoResult<MembershipRecord> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO membership (id, member_id, term_id, tier, status, amount, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(data.member_id)
    .bind(&data.term_id)
    .bind(data.tier.as_str())
    .bind(PaymentStatus::NotPaid.as_str())
    .bind(data.amount)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!(
            "Membership for member {} in term {}",
            data.member_id, data.term_id
        )),
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create membership record".into()))
}

/// Ordered transition log for one record (oldest first).
pub async fn history(
    pool: &SqlitePool,
    membership_id: i64,
) -> RepoResult<Vec<MembershipHistoryEntry>> {
    let rows = sqlx::query_as::<_, MembershipHistoryEntry>(
        "SELECT id, membership_id, status, actor_id, receipt_ref, note, created_at FROM membership_history WHERE membership_id = ? ORDER BY created_at ASC, id ASC",
    )
    .bind(membership_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Classify a failed status guard by re-reading the record.
async fn classify_guard_failure(
    pool: &SqlitePool,
    member_id: i64,
    term_id: &str,
    expected: PaymentStatus,
) -> RepoError {
    match find_by_member_term(pool, member_id, term_id).await {
        Ok(None) => RepoError::NotFound(format!(
            "Membership for member {member_id} in term {term_id}"
        )),
        // Guard failed but the status matches what we expected: the record
        // changed and changed back between our read and write. Retryable.
        Ok(Some(r)) if r.status == expected => {
            RepoError::Conflict("Record was modified concurrently".into())
        }
        Ok(Some(r)) => RepoError::InvalidState { current: r.status },
        Err(e) => e,
    }
}

/// NotPaid -> Verifying: attach the receipt and queue the record for review.
///
/// The caller must have durably stored the receipt blob first; a record in
/// `Verifying` must never point at a missing receipt.
pub async fn submit_payment(
    pool: &SqlitePool,
    member_id: i64,
    term_id: &str,
    method: PaymentMethod,
    receipt_ref: &str,
    now: i64,
) -> RepoResult<MembershipRecord> {
    ensure_transition(PaymentStatus::NotPaid, PaymentStatus::Verifying)?;

    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE membership SET status = ?1, payment_method = ?2, receipt_ref = ?3, submitted_at = ?4, denial_reason = NULL, updated_at = ?4 WHERE member_id = ?5 AND term_id = ?6 AND status = ?7",
    )
    .bind(PaymentStatus::Verifying.as_str())
    .bind(method.as_str())
    .bind(receipt_ref)
    .bind(now)
    .bind(member_id)
    .bind(term_id)
    .bind(PaymentStatus::NotPaid.as_str())
    .execute(&mut *tx)
    .await?;

    if rows.rows_affected() == 0 {
        tx.rollback().await?;
        return Err(classify_guard_failure(pool, member_id, term_id, PaymentStatus::NotPaid).await);
    }

    let record_id: i64 =
        sqlx::query_scalar("SELECT id FROM membership WHERE member_id = ?1 AND term_id = ?2")
            .bind(member_id)
            .bind(term_id)
            .fetch_one(&mut *tx)
            .await?;

    sqlx::query(
        "INSERT INTO membership_history (membership_id, status, actor_id, receipt_ref, note, created_at) VALUES (?1, ?2, ?3, ?4, NULL, ?5)",
    )
    .bind(record_id)
    .bind(PaymentStatus::Verifying.as_str())
    .bind(member_id)
    .bind(receipt_ref)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, record_id)
        .await?
        .ok_or_else(|| RepoError::Database("Membership vanished after update".into()))
}

/// Verifying -> {Completed | NotPaid}: officer decision on the pending receipt.
///
/// Accept completes the term (terminal). Reject returns the record to
/// NotPaid and clears the current submission fields; the decided receipt
/// ref stays in the history row for audit.
pub async fn decide(
    pool: &SqlitePool,
    member_id: i64,
    term_id: &str,
    officer_id: i64,
    outcome: VerificationOutcome,
    reason: Option<&str>,
    now: i64,
) -> RepoResult<MembershipRecord> {
    let next = match outcome {
        VerificationOutcome::Accept => PaymentStatus::Completed,
        VerificationOutcome::Reject => PaymentStatus::NotPaid,
    };
    ensure_transition(PaymentStatus::Verifying, next)?;

    let mut tx = pool.begin().await?;

    // CAS probe and audit append in one write. The first statement in the
    // transaction must be a write so the write lock is taken against fresh
    // data; the SELECT also captures the pending receipt ref before a
    // rejection clears it from the record.
    let rows = sqlx::query(
        "INSERT INTO membership_history (membership_id, status, actor_id, receipt_ref, note, created_at) \
         SELECT id, ?1, ?2, receipt_ref, ?3, ?4 FROM membership WHERE member_id = ?5 AND term_id = ?6 AND status = ?7",
    )
    .bind(next.as_str())
    .bind(officer_id)
    .bind(reason)
    .bind(now)
    .bind(member_id)
    .bind(term_id)
    .bind(PaymentStatus::Verifying.as_str())
    .execute(&mut *tx)
    .await?;

    if rows.rows_affected() == 0 {
        tx.rollback().await?;
        return Err(
            classify_guard_failure(pool, member_id, term_id, PaymentStatus::Verifying).await,
        );
    }

    let rows = match outcome {
        VerificationOutcome::Accept => {
            sqlx::query(
                "UPDATE membership SET status = ?1, decided_at = ?2, decided_by = ?3, denial_reason = NULL, updated_at = ?2 WHERE member_id = ?4 AND term_id = ?5 AND status = ?6",
            )
            .bind(next.as_str())
            .bind(now)
            .bind(officer_id)
            .bind(member_id)
            .bind(term_id)
            .bind(PaymentStatus::Verifying.as_str())
            .execute(&mut *tx)
            .await?
        }
        VerificationOutcome::Reject => {
            sqlx::query(
                "UPDATE membership SET status = ?1, decided_at = ?2, decided_by = ?3, denial_reason = ?4, payment_method = NULL, receipt_ref = NULL, submitted_at = NULL, updated_at = ?2 WHERE member_id = ?5 AND term_id = ?6 AND status = ?7",
            )
            .bind(next.as_str())
            .bind(now)
            .bind(officer_id)
            .bind(reason)
            .bind(member_id)
            .bind(term_id)
            .bind(PaymentStatus::Verifying.as_str())
            .execute(&mut *tx)
            .await?
        }
    };

    if rows.rows_affected() == 0 {
        tx.rollback().await?;
        return Err(RepoError::Conflict("Record was modified concurrently".into()));
    }

    let record_id: i64 =
        sqlx::query_scalar("SELECT id FROM membership WHERE member_id = ?1 AND term_id = ?2")
            .bind(member_id)
            .bind(term_id)
            .fetch_one(&mut *tx)
            .await?;

    tx.commit().await?;

    find_by_id(pool, record_id)
        .await?
        .ok_or_else(|| RepoError::Database("Membership vanished after update".into()))
}
