//! Domain types

mod album;
mod ids;
mod playlist;
mod social;
mod song;
mod user;

pub use album::{Album, AlbumDetail, NewAlbum, UpdateAlbum};
pub use ids::{
    ActivityId, AlbumId, CollaborationId, LikeId, PlaylistId, PlaylistSongId, SongId, UserId,
};
pub use playlist::{
    ActivityAction, NewPlaylist, Playlist, PlaylistActivities, PlaylistActivity, PlaylistDetail,
    PlaylistSummary,
};
pub use social::{Collaboration, Like};
pub use song::{NewSong, Song, SongFilter, SongSummary};
pub use user::{NewUser, User};
