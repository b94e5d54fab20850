//! Member API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{RepoError, member};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Member, MemberCreate, MembershipRecord};

/// GET /api/members - all members
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Member>>> {
    let members = member::find_all(&state.pool).await?;
    Ok(Json(members))
}

/// Member detail response (profile + membership records)
#[derive(serde::Serialize)]
pub struct MemberDetail {
    #[serde(flatten)]
    pub member: Member,
    pub memberships: Vec<MembershipRecord>,
}

/// GET /api/members/{id} - one member with their membership records
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MemberDetail>> {
    let member = member::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::MemberNotFound, format!("Member {id} not found"))
        })?;

    let memberships =
        crate::db::repository::membership::find_by_member(&state.pool, id).await?;

    Ok(Json(MemberDetail {
        member,
        memberships,
    }))
}

/// POST /api/members - create member
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MemberCreate>,
) -> AppResult<Json<Member>> {
    if payload.student_number.trim().is_empty() || payload.full_name.trim().is_empty() {
        return Err(AppError::validation(
            "student_number and full_name are required",
        ));
    }

    let member = member::create(&state.pool, payload).await.map_err(|e| match e {
        RepoError::Duplicate(msg) if msg.starts_with("Student number") => {
            AppError::with_message(ErrorCode::StudentNumberExists, msg)
        }
        RepoError::Duplicate(msg) if msg.starts_with("Email") => {
            AppError::with_message(ErrorCode::EmailExists, msg)
        }
        other => other.into(),
    })?;

    tracing::info!(member_id = member.id, "Member created");
    Ok(Json(member))
}
