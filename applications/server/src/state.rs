/// Shared application state
use crate::services::{
    AlbumService, AuthService, CollaborationService, FileStorage, PlaylistService, SongService,
    UserService,
};
use chorus_cache::AggregateCache;
use chorus_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    pub file_storage: Arc<FileStorage>,
    pub albums: Arc<AlbumService>,
    pub songs: Arc<SongService>,
    pub users: Arc<UserService>,
    pub playlists: Arc<PlaylistService>,
    pub collaborations: Arc<CollaborationService>,
    /// Base URL prefixed to links of uploaded files
    pub public_url: String,
}

impl AppState {
    /// Wire the domain services over one database and one aggregate cache
    pub fn new(
        db: Arc<Database>,
        cache: AggregateCache,
        auth_service: Arc<AuthService>,
        file_storage: Arc<FileStorage>,
        public_url: impl Into<String>,
    ) -> Self {
        let collaborations = Arc::new(CollaborationService::new(Arc::clone(&db), cache.clone()));
        let playlists = Arc::new(PlaylistService::new(
            Arc::clone(&db),
            cache.clone(),
            Arc::clone(&collaborations),
        ));

        Self {
            albums: Arc::new(AlbumService::new(Arc::clone(&db), cache)),
            songs: Arc::new(SongService::new(Arc::clone(&db))),
            users: Arc::new(UserService::new(Arc::clone(&db), Arc::clone(&auth_service))),
            playlists,
            collaborations,
            db,
            auth_service,
            file_storage,
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Public URL of a stored file under `route`
    pub fn file_url(&self, route: &str, filename: &str) -> String {
        format!("{}/{}/{}", self.public_url, route.trim_matches('/'), filename)
    }
}
