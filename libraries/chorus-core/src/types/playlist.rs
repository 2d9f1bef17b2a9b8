//! Playlist types

use super::{PlaylistId, SongSummary, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A playlist row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub owner: UserId,
}

/// Listing entry for playlists owned by or shared with a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: PlaylistId,
    pub name: String,
    /// Username of the owner
    pub username: String,
}

/// A playlist with its songs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDetail {
    pub id: PlaylistId,
    pub name: String,
    pub username: String,
    pub songs: Vec<SongSummary>,
}

/// Data for creating a playlist
#[derive(Debug, Clone)]
pub struct NewPlaylist {
    pub name: String,
    pub owner: UserId,
}

/// What happened to a song in a playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Add,
    Delete,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Add => "add",
            ActivityAction::Delete => "delete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "add" => Some(ActivityAction::Add),
            "delete" => Some(ActivityAction::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit entry of a playlist's song changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistActivity {
    pub username: String,
    pub title: String,
    pub action: ActivityAction,
    /// RFC 3339 timestamp
    pub time: String,
}

/// Activity log of a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistActivities {
    pub playlist_id: PlaylistId,
    pub activities: Vec<PlaylistActivity>,
}
