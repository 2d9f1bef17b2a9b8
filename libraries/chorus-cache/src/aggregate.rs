//! Cache-aside policy for derived aggregates

use chorus_core::{Cache, CacheKey, ChorusError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Where an aggregate value was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    Cache,
    Store,
}

impl CacheSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheSource::Cache => "cache",
            CacheSource::Store => "store",
        }
    }
}

impl fmt::Display for CacheSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An aggregate value tagged with its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cached<T> {
    pub value: T,
    pub source: CacheSource,
}

/// Read-through cache for aggregates with synchronous invalidation
///
/// Reads never fail because of the cache: a miss, an unreachable backend and
/// an undecodable entry all fall through to `recompute`. Invalidation is the
/// opposite: a failed delete fails the calling operation.
#[derive(Clone)]
pub struct AggregateCache {
    backend: Arc<dyn Cache>,
    ttl: Duration,
}

impl AggregateCache {
    pub fn new(backend: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value for `key`, or recompute and cache it.
    ///
    /// `recompute` yields `None` when the aggregate has no underlying rows;
    /// that absence becomes `NotFound` and is never cached.
    pub async fn get_or_compute<T, F, Fut>(&self, key: &CacheKey, recompute: F) -> Result<Cached<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        let cache_key = key.to_string();

        match self.backend.get(&cache_key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    tracing::debug!(key = %cache_key, "cache hit");
                    return Ok(Cached {
                        value,
                        source: CacheSource::Cache,
                    });
                }
                Err(e) => {
                    tracing::warn!(key = %cache_key, error = %e, "discarding undecodable cache entry");
                }
            },
            Ok(None) => tracing::debug!(key = %cache_key, "cache miss"),
            Err(e) => {
                tracing::warn!(key = %cache_key, error = %e, "cache unavailable, reading from store");
            }
        }

        let value = recompute()
            .await?
            .ok_or_else(|| ChorusError::not_found(key.entity(), key.subject()))?;

        let raw = serde_json::to_string(&value)?;
        if let Err(e) = self.backend.set(&cache_key, raw, self.ttl).await {
            tracing::warn!(key = %cache_key, error = %e, "failed to populate cache");
        }

        Ok(Cached {
            value,
            source: CacheSource::Store,
        })
    }

    /// Drop the cached value for `key`
    pub async fn invalidate(&self, key: &CacheKey) -> Result<()> {
        let cache_key = key.to_string();
        self.backend.delete(&cache_key).await.map_err(|e| {
            tracing::error!(key = %cache_key, error = %e, "cache invalidation failed");
            ChorusError::from(e)
        })?;
        tracing::debug!(key = %cache_key, "cache invalidated");
        Ok(())
    }

    /// Drop every key; stops at the first failure
    pub async fn invalidate_many<'a, I>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a CacheKey>,
    {
        for key in keys {
            self.invalidate(key).await?;
        }
        Ok(())
    }
}

impl fmt::Debug for AggregateCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
