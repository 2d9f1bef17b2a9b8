/// Server services
pub mod albums;
pub mod auth;
pub mod collaborations;
pub mod file_storage;
pub mod playlists;
pub mod songs;
pub mod users;

pub use albums::AlbumService;
pub use auth::AuthService;
pub use collaborations::CollaborationService;
pub use file_storage::{FileStorage, ImageKind};
pub use playlists::PlaylistService;
pub use songs::SongService;
pub use users::UserService;
