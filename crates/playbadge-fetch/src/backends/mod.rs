//! Cache backend implementations

mod disk;
mod memory;
mod noop;

pub use disk::DiskCache;
pub use memory::MemoryCache;
pub use noop::NoopCache;

use std::sync::Arc;

use playbadge_core::config::{CacheBackendKind, CacheConfig};
use tracing::debug;

use crate::traits::CacheBackend;

/// Build the backend selected by configuration
pub fn build_backend(config: &CacheConfig) -> Arc<dyn CacheBackend> {
    let backend: Arc<dyn CacheBackend> = match config.backend {
        CacheBackendKind::None => Arc::new(NoopCache),
        CacheBackendKind::Memory => Arc::new(MemoryCache::new(config.capacity)),
        CacheBackendKind::Disk => Arc::new(DiskCache::new(config.resolved_directory())),
    };
    debug!(backend = backend.name(), "cache backend ready");
    backend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_backend_by_kind() {
        let mut config = CacheConfig::default();
        assert_eq!(build_backend(&config).name(), "memory");

        config.backend = CacheBackendKind::None;
        let backend = build_backend(&config);
        assert_eq!(backend.name(), "none");
        assert!(!backend.is_enabled());

        config.backend = CacheBackendKind::Disk;
        config.directory = Some(std::env::temp_dir().join("playbadge-test"));
        assert_eq!(build_backend(&config).name(), "disk");
    }
}
