//! Member Model

use serde::{Deserialize, Serialize};

/// Member entity (profile collaborator)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Member {
    pub id: i64,
    pub student_number: String,
    pub full_name: String,
    pub email: String,
    pub year: Option<String>,
    pub block: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create member payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCreate {
    pub student_number: String,
    pub full_name: String,
    pub email: String,
    pub year: Option<String>,
    pub block: Option<String>,
}
