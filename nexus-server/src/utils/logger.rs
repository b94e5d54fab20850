//! Logging Infrastructure
//!
//! tracing-subscriber setup: RUST_LOG-style filtering with a configured
//! fallback level, and optional daily-rolling file output.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with stdout output only
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger
///
/// `log_level` seeds the filter when RUST_LOG is unset. When `log_dir`
/// names an existing directory, output goes to a daily-rolling file there
/// instead of stdout.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("info")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    match log_dir.filter(|dir| Path::new(dir).is_dir()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "nexus-server");
            builder.with_writer(appender).init();
        }
        None => builder.init(),
    }
}
