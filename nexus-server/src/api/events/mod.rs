//! Event API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/events", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", axum::routing::delete(handler::archive))
        .route("/{id}/join", post(handler::join))
        .route("/{id}/leave", post(handler::leave))
        .route("/{id}/participants", get(handler::participants))
}
