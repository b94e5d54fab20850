//! Dashboard API module (aggregated read view)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/dashboard/{member_id}/{term_id}",
        get(handler::dashboard),
    )
}
