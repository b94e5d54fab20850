//! Dashboard Handler
//!
//! Read-only aggregate for the member landing page: current membership
//! status, upcoming events, latest announcements. Never mutates.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::{announcement, event, member, membership};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Announcement, Member, MembershipHistoryEntry, MembershipRecord};

const LATEST_ANNOUNCEMENTS: i64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardMembership {
    #[serde(flatten)]
    pub record: MembershipRecord,
    pub history: Vec<MembershipHistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub member: Member,
    /// None when the member has not registered for this term
    pub membership: Option<DashboardMembership>,
    pub upcoming_event_count: i64,
    pub announcements: Vec<Announcement>,
}

/// GET /api/dashboard/{member_id}/{term_id}
pub async fn dashboard(
    State(state): State<ServerState>,
    Path((member_id, term_id)): Path<(i64, String)>,
) -> AppResult<Json<DashboardView>> {
    let member = member::find_by_id(&state.pool, member_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::MemberNotFound,
                format!("Member {member_id} not found"),
            )
        })?;

    let membership = match membership::find_by_member_term(&state.pool, member_id, &term_id).await?
    {
        Some(record) => {
            let history = membership::history(&state.pool, record.id).await?;
            Some(DashboardMembership { record, history })
        }
        None => None,
    };

    let now = shared::util::now_millis();
    let upcoming_event_count = event::count_upcoming(&state.pool, now).await?;
    let announcements = announcement::find_latest(&state.pool, LATEST_ANNOUNCEMENTS).await?;

    Ok(Json(DashboardView {
        member,
        membership,
        upcoming_event_count,
        announcements,
    }))
}
