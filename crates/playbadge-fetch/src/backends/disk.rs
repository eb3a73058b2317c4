//! On-disk page cache, one JSON file per key

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::CacheError;
use crate::traits::CacheBackend;

/// A cached page as stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct DiskEntry {
    key: String,
    value: String,
    expires_at: DateTime<Utc>,
}

/// Page cache persisted under a directory.
///
/// File names are the SHA-256 of the key, so any URL maps to a safe path.
#[derive(Debug, Clone)]
pub struct DiskCache {
    cache_dir: PathBuf,
}

impl DiskCache {
    /// Create a cache rooted at `cache_dir`; the directory is created lazily
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Cache directory
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        self.cache_dir
            .join(format!("{:x}.json", hasher.finalize()))
    }
}

#[async_trait::async_trait]
impl CacheBackend for DiskCache {
    fn name(&self) -> &str {
        "disk"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.entry_path(key);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry: DiskEntry = serde_json::from_str(&contents)?;
        if entry.key != key {
            debug!(key, "hash collision in disk cache");
            return Ok(None);
        }

        if entry.expires_at <= Utc::now() {
            debug!(key, "disk cache entry expired");
            if let Err(e) = tokio::fs::remove_file(&path).await {
                debug!(path = %path.display(), error = %e, "could not remove expired entry");
            }
            return Ok(None);
        }

        Ok(Some(entry.value))
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| CacheError::Backend(format!("invalid ttl: {}", e)))?;

        tokio::fs::create_dir_all(&self.cache_dir).await?;

        let entry = DiskEntry {
            key: key.to_string(),
            value,
            expires_at: Utc::now() + ttl,
        };
        let encoded = serde_json::to_vec(&entry)?;
        let path = self.entry_path(key);
        let dir = self.cache_dir.clone();
        let target = path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&dir, &target, &encoded))
            .await
            .map_err(|e| CacheError::Backend(format!("disk write task failed: {}", e)))??;

        debug!(key, path = %path.display(), "stored page on disk");
        Ok(())
    }

    async fn entry_count(&self) -> Option<usize> {
        let mut dir = match tokio::fs::read_dir(&self.cache_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Some(0),
            Err(_) => return None,
        };

        let mut count = 0;
        while let Ok(Some(entry)) = dir.next_entry().await {
            if entry.path().extension().is_some_and(|e| e == "json") {
                count += 1;
            }
        }
        Some(count)
    }
}

/// Write through a uniquely named temp file in `dir`, then rename over `path`
fn write_atomic(dir: &Path, path: &Path, contents: &[u8]) -> Result<(), CacheError> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| CacheError::Io(e.error))?;
    Ok(())
}
