//! Cache backend and page source traits

use std::time::Duration;

use crate::error::{CacheError, Result};

/// Key-value store for fetched pages.
///
/// Keys are full upstream URLs, values are raw response bodies.
#[async_trait::async_trait]
pub trait CacheBackend: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Whether lookups can ever hit. The fetcher skips disabled backends.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Look up a live entry
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, CacheError>;

    /// Store an entry that expires after `ttl`
    async fn put(&self, key: &str, value: String, ttl: Duration)
        -> std::result::Result<(), CacheError>;

    /// Number of stored entries, when the backend can tell
    async fn entry_count(&self) -> Option<usize> {
        None
    }
}

/// Source of upstream page text
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    /// Download `url` and return its body as text
    async fn fetch_text(&self, url: &str) -> Result<String>;
}
