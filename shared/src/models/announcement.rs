//! Announcement Model

use serde::{Deserialize, Serialize};

/// Announcement post (read-only collaborator; authoring lives elsewhere)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub image_ref: Option<String>,
    pub posted_at: i64,
    pub archived: bool,
}

/// Insert payload (used by seeding and tests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementCreate {
    pub title: String,
    pub body: String,
    pub image_ref: Option<String>,
    pub posted_at: Option<i64>,
}
