use async_trait::async_trait;
use chorus_core::{Cache, CacheError};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

struct Entry {
    value: String,
    /// `None` when the TTL reaches past what `Instant` can represent
    expires_at: Option<Instant>,
}

/// In-process cache bounded by entry count, with a TTL per entry
///
/// Least recently used entries are evicted once `capacity` is reached;
/// expired entries are dropped when they are next read. A TTL too large to
/// add to the current instant keeps the entry until it is evicted or deleted.
pub struct MemoryCache {
    entries: Mutex<LruCache<String, Entry>>,
}

impl MemoryCache {
    /// Create a cache holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of entries currently held, expired ones included
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, LruCache<String, Entry>>, CacheError> {
        self.entries
            .lock()
            .map_err(|_| CacheError::Unavailable("memory cache lock poisoned".to_string()))
    }
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("len", &self.len())
            .finish()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.lock()?;
        let now = Instant::now();

        let lookup = entries
            .get(key)
            .map(|entry| (!entry.expires_at.is_some_and(|at| at <= now), entry.value.clone()));

        match lookup {
            Some((true, value)) => Ok(Some(value)),
            Some((false, _)) => {
                entries.pop(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let expires_at = Instant::now().checked_add(ttl);
        self.lock()?.put(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock()?.pop(key);
        Ok(())
    }
}
