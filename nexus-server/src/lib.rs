//! SPECS Nexus Server - student organization backend
//!
//! Manages membership lifecycle, event participation and announcements
//! for a student organization. Members register for a term, pay dues
//! through a mobile wallet rail, upload proof of payment, and wait for an
//! officer to verify the receipt.
//!
//! # Module structure
//!
//! ```text
//! nexus-server/src/
//! ├── core/          # Config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool and repositories
//! ├── membership/    # Payment lifecycle workflow
//! ├── storage/       # Receipt blob store
//! └── utils/         # Logging, shared error re-exports
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod membership;
pub mod storage;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState, build_router};
pub use membership::MembershipService;
pub use storage::ReceiptStore;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: .env, then logging.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ ____  ________________
  / ___// __ \/ ____/ ____/ ___/
  \__ \/ /_/ / __/ / /    \__ \
 ___/ / ____/ /___/ /___ ___/ /
/____/_/   /_____/\____//____/
    _   __
   / | / /__  _  ____  _______
  /  |/ / _ \| |/_/ / / / ___/
 / /|  /  __/>  </ /_/ (__  )
/_/ |_/\___/_/|_|\__,_/____/
    "#
    );
}
