//! Integration tests for the cache-aside aggregate policy
//!
//! Tests read-through and invalidation including:
//! - Miss → store → hit sequencing
//! - Absent aggregates are NotFound and never cached
//! - A failing backend degrades reads to the store but fails invalidation

use async_trait::async_trait;
use chorus_cache::{AggregateCache, CacheSource, MemoryCache, NoopCache};
use chorus_core::{AlbumId, Cache, CacheError, CacheKey, ChorusError, UserId};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(1800);

/// Memory cache whose reads, writes and deletes can be switched to failing
struct FlakyCache {
    inner: MemoryCache,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_deletes: AtomicBool,
}

impl FlakyCache {
    fn new() -> Self {
        Self {
            inner: MemoryCache::new(16),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Cache for FlakyCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("connection refused".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("connection refused".to_string()));
        }
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(CacheError::Operation("read-only replica".to_string()));
        }
        self.inner.delete(key).await
    }
}

fn likes_key(id: &str) -> CacheKey {
    CacheKey::AlbumLikes(AlbumId::new(id))
}

#[tokio::test]
async fn test_miss_then_hit() {
    let cache = AggregateCache::new(Arc::new(MemoryCache::new(16)), TTL);
    let key = likes_key("album-1");
    let counter = AtomicUsize::new(0);
    let calls = &counter;

    let compute = move || async move {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(5_u64))
    };

    let first = cache.get_or_compute(&key, compute).await.unwrap();
    assert_eq!(first.value, 5);
    assert_eq!(first.source, CacheSource::Store);

    let second = cache.get_or_compute(&key, compute).await.unwrap();
    assert_eq!(second.value, 5);
    assert_eq!(second.source, CacheSource::Cache);

    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unbounded_ttl_still_caches() {
    let cache = AggregateCache::new(
        Arc::new(MemoryCache::new(8)),
        Duration::from_secs(u64::MAX),
    );
    let key = likes_key("album-forever");

    let first = cache
        .get_or_compute(&key, || async { Ok(Some(1_u64)) })
        .await
        .unwrap();
    assert_eq!((first.value, first.source), (1, CacheSource::Store));

    let second = cache
        .get_or_compute(&key, || async { Ok(Some(2_u64)) })
        .await
        .unwrap();
    assert_eq!((second.value, second.source), (1, CacheSource::Cache));
}

#[tokio::test]
async fn test_absent_aggregate_is_not_found_and_not_cached() {
    let backend = Arc::new(MemoryCache::new(16));
    let cache = AggregateCache::new(backend.clone(), TTL);
    let key = likes_key("album-empty");

    let err = cache
        .get_or_compute(&key, || async { Ok(None::<u64>) })
        .await
        .unwrap_err();

    assert!(err.is_not_found(), "got {err:?}");
    assert_eq!(backend.get(&key.to_string()).await.unwrap(), None);
}

#[tokio::test]
async fn test_invalidate_forces_store_read() {
    let cache = AggregateCache::new(Arc::new(MemoryCache::new(16)), TTL);
    let key = likes_key("album-2");

    cache
        .get_or_compute(&key, || async { Ok(Some(1_u64)) })
        .await
        .unwrap();
    cache.invalidate(&key).await.unwrap();

    let after = cache
        .get_or_compute(&key, || async { Ok(Some(2_u64)) })
        .await
        .unwrap();
    assert_eq!(after.value, 2);
    assert_eq!(after.source, CacheSource::Store);
}

#[tokio::test]
async fn test_keys_of_different_kinds_do_not_collide() {
    let cache = AggregateCache::new(Arc::new(MemoryCache::new(16)), TTL);
    let likes = likes_key("shared-id");
    let playlists = CacheKey::UserPlaylists(UserId::new("shared-id"));

    cache
        .get_or_compute(&likes, || async { Ok(Some(9_u64)) })
        .await
        .unwrap();

    let listing = cache
        .get_or_compute(&playlists, || async { Ok(Some(Vec::<String>::new())) })
        .await
        .unwrap();
    assert_eq!(listing.source, CacheSource::Store);
}

#[tokio::test]
async fn test_unavailable_backend_falls_through_to_store() {
    let backend = Arc::new(FlakyCache::new());
    backend.fail_reads.store(true, Ordering::SeqCst);
    backend.fail_writes.store(true, Ordering::SeqCst);
    let cache = AggregateCache::new(backend, TTL);
    let key = likes_key("album-3");

    for _ in 0..2 {
        let read = cache
            .get_or_compute(&key, || async { Ok(Some(4_u64)) })
            .await
            .unwrap();
        assert_eq!(read.value, 4);
        assert_eq!(read.source, CacheSource::Store);
    }
}

#[tokio::test]
async fn test_undecodable_entry_is_treated_as_miss() {
    let backend = Arc::new(MemoryCache::new(16));
    let key = likes_key("album-4");
    backend
        .set(&key.to_string(), "not json".to_string(), TTL)
        .await
        .unwrap();

    let cache = AggregateCache::new(backend, TTL);
    let read = cache
        .get_or_compute(&key, || async { Ok(Some(7_u64)) })
        .await
        .unwrap();

    assert_eq!(read.value, 7);
    assert_eq!(read.source, CacheSource::Store);
}

#[tokio::test]
async fn test_failed_invalidation_is_surfaced() {
    let backend = Arc::new(FlakyCache::new());
    backend.fail_deletes.store(true, Ordering::SeqCst);
    let cache = AggregateCache::new(backend, TTL);

    let err = cache.invalidate(&likes_key("album-5")).await.unwrap_err();
    assert!(matches!(err, ChorusError::Cache(_)));
}

#[tokio::test]
async fn test_recompute_errors_propagate_unchanged() {
    let cache = AggregateCache::new(Arc::new(NoopCache), TTL);

    let err = cache
        .get_or_compute(&likes_key("album-6"), || async {
            Err::<Option<u64>, _>(ChorusError::Database("disk I/O error".to_string()))
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ChorusError::Database(_)));
}

#[tokio::test]
async fn test_noop_backend_always_reads_from_store() {
    let cache = AggregateCache::new(Arc::new(NoopCache), TTL);
    let key = likes_key("album-7");

    for _ in 0..2 {
        let read = cache
            .get_or_compute(&key, || async { Ok(Some(1_u64)) })
            .await
            .unwrap();
        assert_eq!(read.source, CacheSource::Store);
    }
}
