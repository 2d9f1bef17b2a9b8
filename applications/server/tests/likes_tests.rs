/// Album like registration and the cached like count
mod common;

use async_trait::async_trait;
use chorus_cache::{CacheSource, MemoryCache};
use chorus_core::{AlbumId, Cache, CacheError, CacheKey, ChorusError};
use common::{fixtures, TestApp};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Memory cache whose deletes can be switched to failing
struct FailingDeletes {
    inner: MemoryCache,
    fail: AtomicBool,
}

#[async_trait]
impl Cache for FailingDeletes {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("connection reset".to_string()));
        }
        self.inner.delete(key).await
    }
}

#[tokio::test]
async fn test_like_count_lifecycle() {
    let app = TestApp::new().await;
    let albums = &app.state.albums;
    let (alice, _) = app.user("alice").await;

    let album = albums.add_album(&fixtures::album("Viva la Vida")).await.unwrap();

    // Nobody likes it yet: NotFound, not a cached zero
    let err = albums.album_likes(&album).await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");

    albums.register_like(&album, &alice).await.unwrap();

    let first = albums.album_likes(&album).await.unwrap();
    assert_eq!((first.value, first.source), (1, CacheSource::Store));

    let second = albums.album_likes(&album).await.unwrap();
    assert_eq!((second.value, second.source), (1, CacheSource::Cache));

    albums.delete_like(&album, &alice).await.unwrap();

    let err = albums.album_likes(&album).await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
async fn test_second_like_is_a_conflict() {
    let app = TestApp::new().await;
    let albums = &app.state.albums;
    let (alice, _) = app.user("alice").await;
    let album = albums.add_album(&fixtures::album("Parachutes")).await.unwrap();

    albums.register_like(&album, &alice).await.unwrap();
    let err = albums.register_like(&album, &alice).await.unwrap_err();

    match err {
        ChorusError::Conflict(msg) => assert_eq!(msg, "You have already liked this album"),
        other => panic!("expected Conflict, got {other:?}"),
    }
    assert_eq!(albums.album_likes(&album).await.unwrap().value, 1);
}

#[tokio::test]
async fn test_like_on_missing_album_is_not_found() {
    let app = TestApp::new().await;
    let (alice, _) = app.user("alice").await;

    let err = app
        .state
        .albums
        .register_like(&AlbumId::new("album-missing"), &alice)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_unlike_without_like_is_not_found() {
    let app = TestApp::new().await;
    let (alice, _) = app.user("alice").await;
    let album = app
        .state
        .albums
        .add_album(&fixtures::album("X&Y"))
        .await
        .unwrap();

    let err = app.state.albums.delete_like(&album, &alice).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_new_like_invalidates_cached_count() {
    let app = TestApp::new().await;
    let albums = &app.state.albums;
    let (alice, _) = app.user("alice").await;
    let (bob, _) = app.user("bob").await;
    let album = albums.add_album(&fixtures::album("Ghost Stories")).await.unwrap();

    albums.register_like(&album, &alice).await.unwrap();
    albums.album_likes(&album).await.unwrap();
    assert_eq!(albums.album_likes(&album).await.unwrap().source, CacheSource::Cache);

    albums.register_like(&album, &bob).await.unwrap();

    let after = albums.album_likes(&album).await.unwrap();
    assert_eq!((after.value, after.source), (2, CacheSource::Store));
}

#[tokio::test]
async fn test_deleting_album_drops_cached_count() {
    let backend = Arc::new(MemoryCache::new(64));
    let app = TestApp::with_cache_backend(backend.clone()).await;
    let albums = &app.state.albums;
    let (alice, _) = app.user("alice").await;
    let album = albums.add_album(&fixtures::album("Mylo Xyloto")).await.unwrap();

    albums.register_like(&album, &alice).await.unwrap();
    albums.album_likes(&album).await.unwrap();
    let key = CacheKey::AlbumLikes(album.clone()).to_string();
    assert!(backend.get(&key).await.unwrap().is_some());

    albums.delete_album(&album).await.unwrap();

    assert_eq!(backend.get(&key).await.unwrap(), None);
    assert!(albums.album_likes(&album).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_failed_invalidation_fails_the_like() {
    let backend = Arc::new(FailingDeletes {
        inner: MemoryCache::new(64),
        fail: AtomicBool::new(false),
    });
    let app = TestApp::with_cache_backend(backend.clone()).await;
    let (alice, _) = app.user("alice").await;
    let album = app
        .state
        .albums
        .add_album(&fixtures::album("A Rush of Blood to the Head"))
        .await
        .unwrap();

    backend.fail.store(true, Ordering::SeqCst);

    let err = app
        .state
        .albums
        .register_like(&album, &alice)
        .await
        .unwrap_err();
    assert!(matches!(err, ChorusError::Cache(_)), "got {err:?}");
}
