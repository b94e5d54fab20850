//! Event Repository
//!
//! Roster membership is idempotent: joining twice has no additional
//! effect (UNIQUE pair + INSERT OR IGNORE).

use super::{RepoError, RepoResult};
use shared::models::{
    Event, EventCreate, EventWithParticipation, JoinOutcome, LeaveOutcome, Member,
};
use sqlx::SqlitePool;

const EVENT_SELECT: &str = "SELECT id, title, description, location, starts_at, registration_start, registration_end, archived, created_at, updated_at FROM event";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Event>> {
    let sql = format!("{} WHERE id = ?", EVENT_SELECT);
    let row = sqlx::query_as::<_, Event>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Active events with roster info. When `viewer` is given, flags the
/// events that member has already joined.
pub async fn find_all_active(
    pool: &SqlitePool,
    viewer: Option<i64>,
) -> RepoResult<Vec<EventWithParticipation>> {
    let rows = sqlx::query_as::<_, EventWithParticipation>(
        "SELECT e.id, e.title, e.description, e.location, e.starts_at, e.registration_start, e.registration_end, e.archived, e.created_at, e.updated_at, \
         (SELECT COUNT(*) FROM event_participant ep WHERE ep.event_id = e.id) AS participant_count, \
         EXISTS(SELECT 1 FROM event_participant ep WHERE ep.event_id = e.id AND ep.member_id = ?1) AS is_participant \
         FROM event e WHERE e.archived = 0 ORDER BY e.starts_at ASC",
    )
    .bind(viewer.unwrap_or(-1))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Count of active events that have not started yet (dashboard).
pub async fn count_upcoming(pool: &SqlitePool, now: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM event WHERE archived = 0 AND starts_at > ?",
    )
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: EventCreate) -> RepoResult<Event> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO event (id, title, description, location, starts_at, registration_start, registration_end, archived, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?8)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.location)
    .bind(data.starts_at)
    .bind(data.registration_start)
    .bind(data.registration_end)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create event".into()))
}

/// Soft delete.
pub async fn archive(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE event SET archived = 1, updated_at = ? WHERE id = ? AND archived = 0")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Append the member to the roster; a second join is a no-op.
pub async fn join(pool: &SqlitePool, event_id: i64, member_id: i64) -> RepoResult<JoinOutcome> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "INSERT OR IGNORE INTO event_participant (event_id, member_id, created_at) VALUES (?1, ?2, ?3)",
    )
    .bind(event_id)
    .bind(member_id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(if rows.rows_affected() > 0 {
        JoinOutcome::Joined
    } else {
        JoinOutcome::AlreadyJoined
    })
}

pub async fn leave(pool: &SqlitePool, event_id: i64, member_id: i64) -> RepoResult<LeaveOutcome> {
    let rows = sqlx::query("DELETE FROM event_participant WHERE event_id = ?1 AND member_id = ?2")
        .bind(event_id)
        .bind(member_id)
        .execute(pool)
        .await?;
    Ok(if rows.rows_affected() > 0 {
        LeaveOutcome::Left
    } else {
        LeaveOutcome::NotParticipating
    })
}

pub async fn participants(pool: &SqlitePool, event_id: i64) -> RepoResult<Vec<Member>> {
    let rows = sqlx::query_as::<_, Member>(
        "SELECT m.id, m.student_number, m.full_name, m.email, m.year, m.block, m.created_at, m.updated_at \
         FROM member m JOIN event_participant ep ON ep.member_id = m.id \
         WHERE ep.event_id = ? ORDER BY ep.created_at ASC",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
