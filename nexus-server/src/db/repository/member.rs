//! Member Repository

use super::{RepoError, RepoResult};
use shared::models::{Member, MemberCreate};
use sqlx::SqlitePool;

const MEMBER_SELECT: &str = "SELECT id, student_number, full_name, email, year, block, created_at, updated_at FROM member";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Member>> {
    let sql = format!("{} ORDER BY created_at DESC", MEMBER_SELECT);
    let rows = sqlx::query_as::<_, Member>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Member>> {
    let sql = format!("{} WHERE id = ?", MEMBER_SELECT);
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: MemberCreate) -> RepoResult<Member> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO member (id, student_number, full_name, email, year, block, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(&data.student_number)
    .bind(&data.full_name)
    .bind(&data.email)
    .bind(&data.year)
    .bind(&data.block)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        // Unique index name tells us which field collided
        RepoError::Duplicate(msg) if msg.contains("student_number") => {
            RepoError::Duplicate(format!("Student number {}", data.student_number))
        }
        RepoError::Duplicate(msg) if msg.contains("email") => {
            RepoError::Duplicate(format!("Email {}", data.email))
        }
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create member".into()))
}
