//! Chorus Server Library
//!
//! REST backend for albums, songs, playlists and likes, with cache-aside
//! aggregates and owner-or-collaborator playlist access.
//!
//! This library exposes the router and its components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{auth::AuthService, file_storage::FileStorage};
pub use state::AppState;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use services::ImageKind;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
///
/// API routes are nested under `/api`; uploaded images are served from
/// `/albums/covers` and `/uploads/images`.
pub fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        // Users and sessions
        .route("/users", post(api::users::register))
        .route("/users/:id", get(api::users::get_user))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/refresh", post(api::auth::refresh))
        .route("/auth/logout", delete(api::auth::logout))
        // Albums
        .route("/albums", post(api::albums::add_album))
        .route(
            "/albums/:id",
            get(api::albums::get_album)
                .put(api::albums::edit_album)
                .delete(api::albums::delete_album),
        )
        .route("/albums/:id/covers", post(api::albums::upload_cover))
        .route("/albums/:id/likes", get(api::albums::album_likes))
        // Songs
        .route(
            "/songs",
            post(api::songs::add_song).get(api::songs::list_songs),
        )
        .route(
            "/songs/:id",
            get(api::songs::get_song)
                .put(api::songs::edit_song)
                .delete(api::songs::delete_song),
        )
        // Uploads
        .route("/uploads/images", post(api::uploads::upload_image));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Likes
        .route(
            "/albums/:id/likes",
            post(api::albums::like_album).delete(api::albums::unlike_album),
        )
        // Playlists
        .route(
            "/playlists",
            post(api::playlists::add_playlist).get(api::playlists::list_playlists),
        )
        .route("/playlists/:id", delete(api::playlists::delete_playlist))
        .route(
            "/playlists/:id/songs",
            post(api::playlists::add_playlist_song)
                .get(api::playlists::get_playlist_songs)
                .delete(api::playlists::remove_playlist_song),
        )
        .route(
            "/playlists/:id/activities",
            get(api::playlists::get_activities),
        )
        // Collaborations
        .route(
            "/collaborations",
            post(api::collaborations::add_collaboration)
                .delete(api::collaborations::delete_collaboration),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    let covers = ServeDir::new(app_state.file_storage.directory(ImageKind::Cover));
    let images = ServeDir::new(app_state.file_storage.directory(ImageKind::Image));

    // Combine routes
    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .nest_service("/albums/covers", covers)
        .nest_service("/uploads/images", images)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
