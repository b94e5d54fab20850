//! Event API Handlers
//!
//! Roster joining is idempotent and independent of membership status.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::{event, member};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    Event, EventCreate, EventWithParticipation, JoinEventRequest, JoinOutcome, LeaveOutcome,
    Member,
};

#[derive(serde::Deserialize)]
pub struct ListQuery {
    pub member_id: Option<i64>,
}

/// GET /api/events?member_id=... - active events with roster info
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<EventWithParticipation>>> {
    let events = event::find_all_active(&state.pool, query.member_id).await?;
    Ok(Json(events))
}

/// POST /api/events - create an event (officer)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EventCreate>,
) -> AppResult<Json<Event>> {
    if payload.title.trim().is_empty() {
        return Err(AppError::validation("title is required"));
    }
    let created = event::create(&state.pool, payload).await?;
    tracing::info!(event_id = created.id, "Event created");
    Ok(Json(created))
}

/// DELETE /api/events/{id} - archive an event (officer, soft delete)
pub async fn archive(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = event::archive(&state.pool, id).await?;
    if !result {
        return Err(not_found(id));
    }
    tracing::info!(event_id = id, "Event archived");
    Ok(Json(result))
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::EventNotFound, format!("Event {id} not found"))
}

/// Look up an active event and check its registration window at `now`.
async fn active_event_in_window(state: &ServerState, id: i64, now: i64) -> AppResult<Event> {
    let ev = event::find_by_id(&state.pool, id)
        .await?
        .filter(|e| !e.archived)
        .ok_or_else(|| not_found(id))?;

    if let Some(start) = ev.registration_start
        && now < start
    {
        return Err(AppError::new(ErrorCode::RegistrationNotOpen));
    }
    if let Some(end) = ev.registration_end
        && now > end
    {
        return Err(AppError::new(ErrorCode::RegistrationClosed));
    }
    Ok(ev)
}

#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub outcome: JoinOutcome,
}

/// POST /api/events/{id}/join - join the roster (idempotent)
pub async fn join(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<JoinEventRequest>,
) -> AppResult<Json<JoinResponse>> {
    let now = shared::util::now_millis();
    active_event_in_window(&state, id, now).await?;

    member::find_by_id(&state.pool, payload.member_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::MemberNotFound,
                format!("Member {} not found", payload.member_id),
            )
        })?;

    let outcome = event::join(&state.pool, id, payload.member_id).await?;
    if outcome == JoinOutcome::Joined {
        tracing::info!(event_id = id, member_id = payload.member_id, "Member joined event");
    }
    Ok(Json(JoinResponse { outcome }))
}

#[derive(Debug, Serialize)]
pub struct LeaveResponse {
    pub outcome: LeaveOutcome,
}

/// POST /api/events/{id}/leave - leave the roster (idempotent)
///
/// Leaving is allowed any time before the registration window closes,
/// including before it opens (the member simply is not on the roster yet).
pub async fn leave(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<JoinEventRequest>,
) -> AppResult<Json<LeaveResponse>> {
    let now = shared::util::now_millis();
    let ev = event::find_by_id(&state.pool, id)
        .await?
        .filter(|e| !e.archived)
        .ok_or_else(|| not_found(id))?;
    if let Some(end) = ev.registration_end
        && now > end
    {
        return Err(AppError::new(ErrorCode::RegistrationClosed));
    }

    let outcome = event::leave(&state.pool, id, payload.member_id).await?;
    if outcome == LeaveOutcome::Left {
        tracing::info!(event_id = id, member_id = payload.member_id, "Member left event");
    }
    Ok(Json(LeaveResponse { outcome }))
}

/// GET /api/events/{id}/participants - roster listing
pub async fn participants(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Member>>> {
    event::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let members = event::participants(&state.pool, id).await?;
    Ok(Json(members))
}
