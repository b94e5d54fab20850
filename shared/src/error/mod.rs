//! Unified error handling
//!
//! - [`ErrorCode`] - numeric error codes grouped by domain
//! - [`ErrorCategory`] - coarse classification derived from the code range
//! - [`AppError`] - application error carrying a code, message and details
//! - [`ApiResponse`] - unified API response envelope

pub mod category;
pub mod codes;
pub mod http;
pub mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
