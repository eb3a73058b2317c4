//! Server error types

use thiserror::Error;

/// Errors starting or running the HTTP service
#[derive(Debug, Error)]
pub enum ServerError {
    /// Could not bind the listener
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Upstream client could not be built
    #[error(transparent)]
    Fetch(#[from] playbadge_fetch::FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the server
pub type Result<T> = std::result::Result<T, ServerError>;
