//! In-process LRU page cache with per-entry expiry

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::CacheError;
use crate::traits::CacheBackend;

#[derive(Debug)]
struct MemoryEntry {
    value: String,
    expires_at: DateTime<Utc>,
    last_used: u64,
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, MemoryEntry>,
    /// Monotonic use counter, bumped on every get/put
    tick: u64,
}

/// Bounded least-recently-used cache held in process memory
#[derive(Debug)]
pub struct MemoryCache {
    capacity: usize,
    state: Mutex<MemoryState>,
}

impl MemoryCache {
    /// Create a cache holding at most `capacity` pages
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl MemoryState {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Make room for one more entry
    fn evict(&mut self, now: DateTime<Utc>) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        if self.entries.len() < before {
            debug!(removed = before - self.entries.len(), "evicted expired pages");
            return;
        }

        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            debug!(key = %key, "evicted least recently used page");
            self.entries.remove(&key);
        }
    }
}

#[async_trait::async_trait]
impl CacheBackend for MemoryCache {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let now = Utc::now();

        let expired = match state.entries.get(key) {
            None => return Ok(None),
            Some(entry) => entry.expires_at <= now,
        };
        if expired {
            state.entries.remove(key);
            return Ok(None);
        }

        let tick = state.next_tick();
        Ok(state.entries.get_mut(key).map(|entry| {
            entry.last_used = tick;
            entry.value.clone()
        }))
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| CacheError::Backend(format!("invalid ttl: {}", e)))?;

        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let now = Utc::now();

        if !state.entries.contains_key(key) && state.entries.len() >= self.capacity {
            state.evict(now);
        }

        let last_used = state.next_tick();
        state.entries.insert(
            key.to_string(),
            MemoryEntry {
                value,
                expires_at: now + ttl,
                last_used,
            },
        );
        Ok(())
    }

    async fn entry_count(&self) -> Option<usize> {
        Some(self.state.lock().await.entries.len())
    }
}
