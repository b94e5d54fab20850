//! Payment rail QR code API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/qrcodes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", put(handler::upload))
        .route("/{payment_method}", get(handler::get_by_method))
}
