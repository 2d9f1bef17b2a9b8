//! Chorus Cache
//!
//! Cache backends and the cache-aside policy for derived aggregates.
//!
//! # Architecture
//!
//! - **Backends** implement `chorus_core::Cache` and only move strings:
//!   `MemoryCache` (bounded LRU with per-entry TTL) and `NoopCache`
//!   (always misses, used when caching is switched off)
//! - **`AggregateCache`** owns the read-through and invalidation rules and
//!   reports whether a value came from the cache or the store
//!
//! # Example
//!
//! ```rust
//! use chorus_cache::{AggregateCache, CacheSource, MemoryCache};
//! use chorus_core::{AlbumId, CacheKey};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> chorus_core::Result<()> {
//! let cache = AggregateCache::new(Arc::new(MemoryCache::new(1024)), Duration::from_secs(1800));
//! let key = CacheKey::AlbumLikes(AlbumId::new("album-1"));
//!
//! let first = cache.get_or_compute(&key, || async { Ok(Some(3_u64)) }).await?;
//! assert_eq!(first.source, CacheSource::Store);
//!
//! let second = cache.get_or_compute(&key, || async { Ok(Some(3_u64)) }).await?;
//! assert_eq!(second.source, CacheSource::Cache);
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod backends;

pub use aggregate::{AggregateCache, CacheSource, Cached};
pub use backends::{MemoryCache, NoopCache};
