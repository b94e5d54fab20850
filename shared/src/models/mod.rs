//! Data models
//!
//! Shared between nexus-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod announcement;
pub mod event;
pub mod member;
pub mod membership;
pub mod qr_code;

// Re-exports
pub use announcement::*;
pub use event::*;
pub use member::*;
pub use membership::*;
pub use qr_code::*;
