//! Song types

use super::{AlbumId, SongId};
use serde::{Deserialize, Serialize};

/// A song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub performer: String,
    /// Duration in seconds
    pub duration: Option<i32>,
    pub album_id: Option<AlbumId>,
}

/// Compact song listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSummary {
    pub id: SongId,
    pub title: String,
    pub performer: String,
}

/// Data for creating or replacing a song
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSong {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub performer: String,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub album_id: Option<AlbumId>,
}

/// Case-insensitive substring filters for song listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongFilter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub performer: Option<String>,
}
