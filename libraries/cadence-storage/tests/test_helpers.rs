//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! so every pooled connection sees the same schema and constraints.

#![allow(dead_code)]

use cadence_core::types::*;
use cadence_storage::Database;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub db: Database,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let db = Database::connect(&db_url)
            .await
            .expect("Failed to open test database");

        Self {
            db,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }
}

/// Test fixture: Create a listener account
pub async fn create_test_user(pool: &SqlitePool, name: &str) -> UserId {
    cadence_storage::users::create(
        pool,
        CreateUser {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            role: Role::User,
        },
    )
    .await
    .expect("Failed to create test user")
    .id
}

/// Test fixture: Create a catalog song
pub async fn create_test_song(pool: &SqlitePool, title: &str, genre: Option<Genre>) -> SongId {
    let id = SongId::generate();
    cadence_storage::songs::create(
        pool,
        CreateSong {
            id: id.clone(),
            title: title.to_string(),
            artists: vec!["Test Artist".to_string()],
            album: Some("Test Album".to_string()),
            genre,
            release_date: Some("2024-01-01".to_string()),
            duration: Some("3:30".to_string()),
            audio_url: format!("/media/audio/{id}.mp3"),
            cover_image_url: None,
        },
    )
    .await
    .expect("Failed to create test song")
    .id
}

/// Test fixture: Create a playlist
pub async fn create_test_playlist(
    pool: &SqlitePool,
    name: &str,
    owner_id: &UserId,
    is_public: bool,
) -> PlaylistId {
    cadence_storage::playlists::create(
        pool,
        CreatePlaylist {
            name: name.to_string(),
            description: None,
            owner_id: owner_id.clone(),
            is_public,
        },
    )
    .await
    .expect("Failed to create test playlist")
    .id
}
