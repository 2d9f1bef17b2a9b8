//! Key-value cache abstraction
//!
//! Backends only move opaque strings; serialization and the cache-aside
//! policy live in `chorus-cache`.

use crate::types::{AlbumId, UserId};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a cache backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The backend could not be reached or is in a broken state
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected the operation
    #[error("Cache operation failed: {0}")]
    Operation(String),
}

/// Key-value cache backend
///
/// A miss is `Ok(None)` and is distinct from a failing backend (`Err`).
#[async_trait]
pub trait Cache: Send + Sync {
    /// Look up a key
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value that expires after `ttl`
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Remove a key; removing an absent key succeeds
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// Cache key of a derived aggregate
///
/// Each variant renders under its own prefix so aggregate kinds never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Number of likes on an album
    AlbumLikes(AlbumId),
    /// Playlists owned by or shared with a user
    UserPlaylists(UserId),
}

impl CacheKey {
    /// Entity name used when the aggregate has no rows
    pub fn entity(&self) -> &'static str {
        match self {
            CacheKey::AlbumLikes(_) => "Album likes",
            CacheKey::UserPlaylists(_) => "Playlists",
        }
    }

    /// Identifier the aggregate is derived from
    pub fn subject(&self) -> &str {
        match self {
            CacheKey::AlbumLikes(id) => id.as_str(),
            CacheKey::UserPlaylists(id) => id.as_str(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::AlbumLikes(id) => write!(f, "album-likes:{}", id),
            CacheKey::UserPlaylists(id) => write!(f, "playlists:{}", id),
        }
    }
}
