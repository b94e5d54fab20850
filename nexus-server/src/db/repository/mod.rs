//! Repository Module
//!
//! Per-entity CRUD over the SQLite pool. Status-bearing writes go through
//! compare-and-set updates (`UPDATE … WHERE … AND status = ?`) so that a
//! stale caller fails instead of clobbering a concurrent transition.

pub mod announcement;
pub mod event;
pub mod member;
pub mod membership;
pub mod qr_code;

use shared::models::PaymentStatus;
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Operation attempted from a status that does not permit it
    #[error("Invalid state: record is currently {current}")]
    InvalidState { current: PaymentStatus },

    /// Write would violate the status transition table
    #[error("Transition not permitted: {from} -> {to}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    /// Compare-and-set failure: the record changed between read and write
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::InvalidState { current } => AppError::with_message(
                ErrorCode::InvalidTransition,
                format!("Operation not permitted while status is {current}"),
            )
            .with_detail("current_status", current.as_str()),
            RepoError::InvalidTransition { from, to } => AppError::with_message(
                ErrorCode::InvalidTransition,
                format!("Transition not permitted: {from} -> {to}"),
            ),
            RepoError::Conflict(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
