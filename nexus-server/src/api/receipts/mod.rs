//! Receipt API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/receipts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::upload))
        .route("/{receipt_ref}", get(handler::fetch))
}
