//! Always-miss backend for deployments without a cache

use std::time::Duration;

use crate::error::CacheError;
use crate::traits::CacheBackend;

/// Backend that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait::async_trait]
impl CacheBackend for NoopCache {
    fn name(&self) -> &str {
        "none"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_never_hits() {
        let cache = NoopCache;
        cache
            .put("https://example.com", "page".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get("https://example.com").await.unwrap(), None);
        assert!(!cache.is_enabled());
        assert_eq!(cache.entry_count().await, None);
    }
}
