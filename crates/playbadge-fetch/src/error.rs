//! Fetch and cache error types

use thiserror::Error;

/// Errors fetching an upstream page
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("upstream returned {status} for {url}")]
    Status { status: String, url: String },

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Errors from a cache backend.
///
/// These never reach a badge consumer; the fetcher logs them and
/// carries on as if the entry were absent.
#[derive(Debug, Error)]
pub enum CacheError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored entry could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend-specific failure
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Result type for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;
