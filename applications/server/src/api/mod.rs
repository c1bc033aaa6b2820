/// API route modules
pub mod admin;
pub mod health;
pub mod playlists;
pub mod songs;
pub mod users;

use crate::{config::StorageSettings, middleware, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/refresh", post(users::refresh))
        .route("/profile", get(users::profile))
        .route("/logout", post(users::logout))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(admin::register))
        .route("/login", post(admin::login))
        .route("/profile", get(admin::profile))
        .route("/logout", post(admin::logout))
}

fn song_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(songs::list_songs).post(songs::create_song))
        .route("/liked/me", get(songs::liked_songs))
        .route("/genre/:genre", get(songs::songs_by_genre))
        .route("/:id", get(songs::get_song).delete(songs::delete_song))
        .route("/:id/like", post(songs::like_song).delete(songs::unlike_song))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

fn playlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(playlists::create_playlist))
        .route("/user", get(playlists::user_playlists))
        .route("/public", get(playlists::public_playlists))
        .route(
            "/:playlist_id",
            get(playlists::get_playlist).delete(playlists::delete_playlist),
        )
        .route("/:playlist_id/songs", get(playlists::playlist_songs))
        .route(
            "/:playlist_id/songs/:song_id",
            post(playlists::add_song).delete(playlists::remove_song),
        )
        .route("/:playlist_id/songs/:song_id/next", get(playlists::next_song))
        .route("/:playlist_id/songs/:song_id/prev", get(playlists::prev_song))
}

/// Build the full application router
///
/// `/api/v1/*` carries the JSON API, `/media/*` the uploaded files, and any
/// other path is served from the frontend build (falling back to
/// `index.html`).
pub fn create_router(app_state: AppState, storage: &StorageSettings) -> Router {
    let api_v1 = Router::new()
        .nest("/user", user_routes())
        .nest("/admin", admin_routes())
        .nest("/songs", song_routes(storage.max_upload_bytes))
        .nest("/playlist", playlist_routes())
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth_middleware,
        ));

    let media_dir = app_state.media_storage.base_path().to_path_buf();

    let router = Router::new()
        .route("/api/health", get(health::health))
        .nest("/api/v1", api_v1)
        .nest_service("/media", ServeDir::new(media_dir));

    // Static file serving for the web UI (SPA with fallback to index.html)
    let router = match storage.web_dir.as_ref().filter(|dir| dir.is_dir()) {
        Some(web_dir) => router.fallback_service(
            ServeDir::new(web_dir).fallback(ServeFile::new(web_dir.join("index.html"))),
        ),
        None => router.fallback(|| async {
            (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found", "message": "Not found" })))
        }),
    };

    router
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
