/// API route modules
pub mod albums;
pub mod auth;
pub mod collaborations;
pub mod health;
pub mod multipart;
pub mod playlists;
pub mod response;
pub mod songs;
pub mod uploads;
pub mod users;
pub mod validation;
