//! Announcement API module (read-only feed)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/announcements", get(handler::list))
}
