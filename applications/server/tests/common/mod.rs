//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use cadence_core::{CreateSong, CreateUser, Genre, PlaylistId, Role, SongId, User};
use cadence_server::{
    config::ServerConfig, create_router, services::AuthService, state::AppState, MediaStorage,
};
use cadence_storage::Database;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";
pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Full application wired to a temporary database and media directory
pub struct TestApp {
    pub router: Router,
    pub auth_service: Arc<AuthService>,
    pub db: Arc<Database>,
    pub media_dir: PathBuf,
    _temp_dir: TempDir,
}

/// Decoded response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let db = Arc::new(Database::connect(&db_url).await.unwrap());

        let media_dir = temp_dir.path().join("media");
        let media_storage = MediaStorage::new(media_dir.clone());
        media_storage.initialize().await.unwrap();

        let auth_service = Arc::new(AuthService::new(TEST_SECRET.to_string(), 1, 1));

        let mut config = ServerConfig::default();
        config.storage.web_dir = None;

        let app_state = AppState::new(
            Arc::clone(&db),
            Arc::clone(&auth_service),
            Arc::new(media_storage),
        );
        let router = create_router(app_state, &config.storage);

        Self {
            router,
            auth_service,
            db,
            media_dir,
            _temp_dir: temp_dir,
        }
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        self.db.pool()
    }

    /// File names currently stored under a media subdirectory
    pub fn media_files(&self, subdirectory: &str) -> Vec<String> {
        std::fs::read_dir(self.media_dir.join(subdirectory))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    /// Insert an account directly (cheap bcrypt cost) and mint an access token
    pub async fn create_user(&self, name: &str, role: Role) -> (User, String) {
        let user = cadence_storage::users::create(
            self.pool(),
            CreateUser {
                name: name.to_string(),
                email: format!("{name}@example.com"),
                password_hash: bcrypt::hash(TEST_PASSWORD, 4).unwrap(),
                role,
            },
        )
        .await
        .unwrap();

        let token = self.auth_service.create_access_token(&user).unwrap();
        (user, token)
    }

    pub async fn create_song(&self, title: &str, genre: Option<Genre>) -> SongId {
        let id = SongId::generate();
        cadence_storage::songs::create(
            self.pool(),
            CreateSong {
                id: id.clone(),
                title: title.to_string(),
                artists: vec!["Test Artist".to_string()],
                album: None,
                genre,
                release_date: None,
                duration: Some("3:00".to_string()),
                audio_url: format!("/media/audio/{id}.mp3"),
                cover_image_url: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    pub async fn create_playlist(&self, name: &str, owner: &User, is_public: bool) -> PlaylistId {
        cadence_storage::playlists::create(
            self.pool(),
            cadence_core::CreatePlaylist {
                name: name.to_string(),
                description: None,
                owner_id: owner.id.clone(),
                is_public,
            },
        )
        .await
        .unwrap()
        .id
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(request("GET", uri, token, Body::empty())).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(request("DELETE", uri, token, Body::empty())).await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        let mut req = request("POST", uri, token, Body::from(body.to_string()));
        req.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        self.send(req).await
    }
}

/// Build a request, authenticating with a Bearer token when given
pub fn request(method: &str, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body).unwrap()
}
