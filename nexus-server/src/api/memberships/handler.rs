//! Membership API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::repository::membership;
use crate::utils::{AppError, AppResult};
use shared::models::{
    DecideRequest, MembershipCreate, MembershipRecord, MembershipStatusView,
    MembershipWithMember, PaymentStatus, SubmitPaymentRequest,
};

#[derive(serde::Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// GET /api/memberships?status=verifying - officer list / review queue
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MembershipWithMember>>> {
    let status = match query.status.as_deref() {
        Some(s) => Some(s.parse::<PaymentStatus>().map_err(|e| {
            AppError::validation(e.to_string()).with_detail("parameter", "status")
        })?),
        None => None,
    };

    let records = membership::find_all(&state.pool, status).await?;
    Ok(Json(records))
}

/// POST /api/memberships - register a member for a tier in a term
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MembershipCreate>,
) -> AppResult<Json<MembershipRecord>> {
    if payload.term_id.trim().is_empty() {
        return Err(AppError::validation("term_id is required"));
    }
    let record = state.membership_service().register(payload).await?;
    Ok(Json(record))
}

/// GET /api/memberships/{member_id}/{term_id} - status projection with history
pub async fn status(
    State(state): State<ServerState>,
    Path((member_id, term_id)): Path<(i64, String)>,
) -> AppResult<Json<MembershipStatusView>> {
    let view = state.membership_service().status(member_id, &term_id).await?;
    Ok(Json(view))
}

/// POST /api/memberships/{member_id}/{term_id}/submit - submit a payment receipt
pub async fn submit(
    State(state): State<ServerState>,
    Path((member_id, term_id)): Path<(i64, String)>,
    Json(payload): Json<SubmitPaymentRequest>,
) -> AppResult<Json<MembershipRecord>> {
    let record = state
        .membership_service()
        .submit_payment(member_id, &term_id, payload)
        .await?;
    Ok(Json(record))
}

/// POST /api/memberships/{member_id}/{term_id}/decide - officer decision
pub async fn decide(
    State(state): State<ServerState>,
    Path((member_id, term_id)): Path<(i64, String)>,
    Json(payload): Json<DecideRequest>,
) -> AppResult<Json<MembershipRecord>> {
    let record = state
        .membership_service()
        .decide(member_id, &term_id, payload)
        .await?;
    Ok(Json(record))
}
