//! Integration tests for the likes vertical slice
//!
//! Tests like bookkeeping including:
//! - Counting per album
//! - The unique index backstop mapping to Conflict
//! - Cascade on album deletion


use chorus_core::ChorusError;
use test_helpers::*;

#[tokio::test]
async fn test_count_follows_inserts_and_deletes() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;
    let album = create_test_album(pool, "Viva la Vida", 2008).await;

    assert_eq!(chorus_storage::likes::count(pool, &album).await.unwrap(), 0);

    chorus_storage::likes::insert(pool, &album, &alice).await.unwrap();
    chorus_storage::likes::insert(pool, &album, &bob).await.unwrap();
    assert_eq!(chorus_storage::likes::count(pool, &album).await.unwrap(), 2);
    assert!(chorus_storage::likes::exists(pool, &album, &alice).await.unwrap());

    assert!(chorus_storage::likes::delete(pool, &album, &alice).await.unwrap());
    assert!(!chorus_storage::likes::delete(pool, &album, &alice).await.unwrap());
    assert_eq!(chorus_storage::likes::count(pool, &album).await.unwrap(), 1);
    assert!(chorus_storage::likes::exists(pool, &album, &bob).await.unwrap());
}

#[tokio::test]
async fn test_duplicate_insert_hits_unique_index_as_conflict() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let album = create_test_album(pool, "Parachutes", 2000).await;

    chorus_storage::likes::insert(pool, &album, &alice).await.unwrap();

    // Skips the application pre-check on purpose: the store must still refuse
    let err = chorus_storage::likes::insert(pool, &album, &alice)
        .await
        .unwrap_err();
    assert!(matches!(err, ChorusError::Conflict(_)), "got {err:?}");
    assert_eq!(chorus_storage::likes::count(pool, &album).await.unwrap(), 1);
}

#[tokio::test]
async fn test_album_delete_cascades_to_likes() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let album = create_test_album(pool, "X&Y", 2005).await;
    chorus_storage::likes::insert(pool, &album, &alice).await.unwrap();

    assert!(chorus_storage::albums::delete(pool, &album).await.unwrap());
    assert_eq!(chorus_storage::likes::count(pool, &album).await.unwrap(), 0);
}
