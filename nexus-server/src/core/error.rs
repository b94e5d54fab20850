use thiserror::Error;

/// Errors raised while starting or running the HTTP server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for server startup/runtime paths
pub type Result<T> = std::result::Result<T, ServerError>;
