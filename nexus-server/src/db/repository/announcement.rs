//! Announcement Repository
//!
//! Read side only on the API surface; the insert is used by seeding and
//! tests (authoring lives outside this system).

use super::{RepoError, RepoResult};
use shared::models::{Announcement, AnnouncementCreate};
use sqlx::SqlitePool;

const ANNOUNCEMENT_SELECT: &str =
    "SELECT id, title, body, image_ref, posted_at, archived FROM announcement";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Announcement>> {
    let sql = format!(
        "{} WHERE archived = 0 ORDER BY posted_at DESC",
        ANNOUNCEMENT_SELECT
    );
    let rows = sqlx::query_as::<_, Announcement>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_latest(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<Announcement>> {
    let sql = format!(
        "{} WHERE archived = 0 ORDER BY posted_at DESC LIMIT ?",
        ANNOUNCEMENT_SELECT
    );
    let rows = sqlx::query_as::<_, Announcement>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: AnnouncementCreate) -> RepoResult<Announcement> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let posted_at = data.posted_at.unwrap_or(now);
    sqlx::query(
        "INSERT INTO announcement (id, title, body, image_ref, posted_at, archived) VALUES (?1, ?2, ?3, ?4, ?5, 0)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.body)
    .bind(&data.image_ref)
    .bind(posted_at)
    .execute(pool)
    .await?;

    let sql = format!("{} WHERE id = ?", ANNOUNCEMENT_SELECT);
    sqlx::query_as::<_, Announcement>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create announcement".into()))
}
