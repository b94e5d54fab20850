//! Event Model

use serde::{Deserialize, Serialize};

/// Event entity (roster collaborator)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: i64,
    pub registration_start: Option<i64>,
    pub registration_end: Option<i64>,
    pub archived: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreate {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: i64,
    pub registration_start: Option<i64>,
    pub registration_end: Option<i64>,
}

/// Event with roster info (for list views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EventWithParticipation {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: i64,
    pub registration_start: Option<i64>,
    pub registration_end: Option<i64>,
    pub archived: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub participant_count: i64,
    pub is_participant: bool,
}

/// Join roster payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinEventRequest {
    pub member_id: i64,
}

/// Outcome of a roster join - joining twice has no additional effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinOutcome {
    Joined,
    AlreadyJoined,
}

/// Outcome of leaving a roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveOutcome {
    Left,
    NotParticipating,
}

