//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health checks
//! - [`members`] - member profiles
//! - [`memberships`] - membership lifecycle and payment verification
//! - [`receipts`] - receipt upload / fetch
//! - [`qrcodes`] - payment rail QR codes
//! - [`events`] - event listing and rosters
//! - [`announcements`] - announcement feed
//! - [`dashboard`] - aggregated member view

pub mod announcements;
pub mod dashboard;
pub mod events;
pub mod health;
pub mod members;
pub mod memberships;
pub mod qrcodes;
pub mod receipts;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
