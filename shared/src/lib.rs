//! Shared types for SPECS Nexus
//!
//! Common types used by the server and its API consumers: data models,
//! error types, response structures, and utility functions.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
