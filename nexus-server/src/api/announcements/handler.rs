//! Announcement API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::announcement;
use crate::utils::AppResult;
use shared::models::Announcement;

/// GET /api/announcements - active announcements, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Announcement>>> {
    let posts = announcement::find_all(&state.pool).await?;
    Ok(Json(posts))
}
