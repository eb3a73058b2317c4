//! Cached upstream fetching for playbadge
//!
//! Listing pages are fetched through a [`CachedFetcher`], which consults
//! an optional [`CacheBackend`] keyed by the full page URL before going
//! to the [`PageSource`].
//!
//! ## Backends
//!
//! - **none**: always miss, every request goes upstream
//! - **memory**: bounded LRU in process memory
//! - **disk**: one JSON file per page, survives restarts
//!
//! ## Usage
//!
//! ```ignore
//! use playbadge_fetch::{build_backend, CachedFetcher, HttpSource};
//!
//! let source = Arc::new(HttpSource::new(&config.upstream)?);
//! let fetcher = CachedFetcher::new(source, build_backend(&config.cache), config.cache.ttl());
//! let html = fetcher.fetch(&url).await?;
//! ```

pub mod backends;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod traits;

pub use backends::{build_backend, DiskCache, MemoryCache, NoopCache};
pub use error::{CacheError, FetchError, Result};
pub use fetcher::CachedFetcher;
pub use http::HttpSource;
pub use traits::{CacheBackend, PageSource};
