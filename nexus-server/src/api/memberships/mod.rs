//! Membership API module
//!
//! The lifecycle surface: registration, the member's submit operation and
//! the officer's decide operation, plus the read-only status projection.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/memberships", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{member_id}/{term_id}", get(handler::status))
        .route("/{member_id}/{term_id}/submit", post(handler::submit))
        .route("/{member_id}/{term_id}/decide", post(handler::decide))
}
