//! Chorus Core
//!
//! Platform-agnostic domain types, typed identifiers, error handling and the
//! cache abstraction shared by every Chorus crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Album`, `Song`, `Playlist`, `User`, `Like`, ...
//! - **Core Traits**: `Cache`, the key-value backend behind cache-aside reads
//! - **Cache Keys**: `CacheKey`, the namespaced derivation of aggregate keys
//! - **Error Handling**: Unified `ChorusError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use chorus_core::{AlbumId, CacheKey, UserId};
//!
//! let album = AlbumId::new("album-1");
//! assert_eq!(CacheKey::AlbumLikes(album).to_string(), "album-likes:album-1");
//!
//! let user = UserId::generate();
//! assert!(user.as_str().starts_with("user-"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cache;
pub mod error;
pub mod types;

pub use cache::{Cache, CacheError, CacheKey};
pub use error::{ChorusError, Result};

pub use types::{
    // Identifiers
    ActivityId, AlbumId, CollaborationId, LikeId, PlaylistId, PlaylistSongId, SongId, UserId,
    // Albums and songs
    Album, AlbumDetail, NewAlbum, NewSong, Song, SongFilter, SongSummary, UpdateAlbum,
    // Playlists
    ActivityAction, NewPlaylist, Playlist, PlaylistActivities, PlaylistActivity, PlaylistDetail,
    PlaylistSummary,
    // Social
    Collaboration, Like,
    // Users
    NewUser, User,
};
