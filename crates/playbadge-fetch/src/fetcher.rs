//! Get-or-fetch facade over a page source and a cache backend

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Result;
use crate::traits::{CacheBackend, PageSource};

/// Fetches pages through an optional cache.
///
/// Cache failures never fail a fetch: a broken `get` is a miss and a
/// broken `put` is logged. Stores run on a spawned task so the caller
/// gets the page without waiting for the write.
#[derive(Clone)]
pub struct CachedFetcher {
    source: Arc<dyn PageSource>,
    cache: Arc<dyn CacheBackend>,
    ttl: Duration,
}

impl CachedFetcher {
    /// Create a fetcher storing pages for `ttl`
    pub fn new(source: Arc<dyn PageSource>, cache: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self { source, cache, ttl }
    }

    /// The cache backend in use
    pub fn cache(&self) -> &Arc<dyn CacheBackend> {
        &self.cache
    }

    /// Return the body of `url`, from cache when possible.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        if !self.cache.is_enabled() {
            return self.source.fetch_text(url).await;
        }

        match self.cache.get(url).await {
            Ok(Some(text)) if !text.is_empty() => {
                debug!(url, backend = self.cache.name(), "cache hit");
                return Ok(text);
            }
            Ok(_) => debug!(url, backend = self.cache.name(), "cache miss"),
            Err(e) => warn!(
                url,
                backend = self.cache.name(),
                error = %e,
                "cache lookup failed, fetching upstream"
            ),
        }

        let text = self.source.fetch_text(url).await?;
        self.store_in_background(url, text.clone());
        Ok(text)
    }

    fn store_in_background(&self, url: &str, text: String) {
        let cache = Arc::clone(&self.cache);
        let url = url.to_string();
        let ttl = self.ttl;

        tokio::spawn(async move {
            match cache.put(&url, text, ttl).await {
                Ok(()) => debug!(url = %url, backend = cache.name(), "stored page in cache"),
                Err(e) => warn!(
                    url = %url,
                    backend = cache.name(),
                    error = %e,
                    "cache store failed"
                ),
            }
        });
    }
}

impl std::fmt::Debug for CachedFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedFetcher")
            .field("cache", &self.cache.name())
            .field("ttl", &self.ttl)
            .finish()
    }
}
