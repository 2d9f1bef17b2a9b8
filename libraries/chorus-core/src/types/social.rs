//! Likes and collaborations

use super::{AlbumId, CollaborationId, LikeId, PlaylistId, UserId};
use serde::{Deserialize, Serialize};

/// A user's like on an album, unique per (user, album)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: LikeId,
    pub user_id: UserId,
    pub album_id: AlbumId,
}

/// Grants a non-owner mutation rights on a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaboration {
    pub id: CollaborationId,
    pub playlist_id: PlaylistId,
    pub user_id: UserId,
}
