//! Shared handler state

use std::sync::Arc;

use playbadge_core::Config;
use playbadge_fetch::{build_backend, CacheBackend, CachedFetcher, HttpSource, PageSource};
use playbadge_scraper::GooglePlayScraper;
use tracing::info;

use crate::error::Result;

/// State cloned into every request
#[derive(Debug, Clone)]
pub struct AppState {
    /// Validated configuration
    pub config: Arc<Config>,

    /// Listing page scraper; its fetcher also serves remote templates
    pub scraper: GooglePlayScraper,
}

impl AppState {
    /// Assemble state from parts
    pub fn new(config: Config, scraper: GooglePlayScraper) -> Self {
        Self {
            config: Arc::new(config),
            scraper,
        }
    }

    /// Build state fetching from the live upstream with the configured cache
    pub fn from_config(config: Config) -> Result<Self> {
        let source: Arc<dyn PageSource> = Arc::new(HttpSource::new(&config.upstream)?);
        Ok(Self::with_source(config, source))
    }

    /// Build state around an arbitrary page source
    pub fn with_source(config: Config, source: Arc<dyn PageSource>) -> Self {
        let cache = build_backend(&config.cache);
        info!(
            backend = cache.name(),
            ttl_secs = config.cache.ttl_secs,
            "page cache ready"
        );

        let fetcher = CachedFetcher::new(source, cache, config.cache.ttl());
        let scraper = GooglePlayScraper::new(fetcher, config.upstream.listing_url.clone());
        Self::new(config, scraper)
    }

    /// The page cache backend
    pub fn cache(&self) -> &Arc<dyn CacheBackend> {
        self.scraper.fetcher().cache()
    }
}
