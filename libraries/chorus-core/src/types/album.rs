//! Album types

use super::{AlbumId, SongSummary};
use serde::{Deserialize, Serialize};

/// An album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub year: i32,
    /// Public URL of the uploaded cover image
    pub cover_url: Option<String>,
}

/// An album together with the songs that belong to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumDetail {
    #[serde(flatten)]
    pub album: Album,
    pub songs: Vec<SongSummary>,
}

/// Data for creating a new album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlbum {
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub cover: Option<String>,
}

/// Data for editing an album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAlbum {
    pub name: String,
    pub year: i32,
}
