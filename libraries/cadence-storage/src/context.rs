use crate::{create_pool, playlists, run_migrations, songs, StorageError};
use async_trait::async_trait;
use cadence_core::{
    error::Result,
    storage::{PlaylistStore, SongCatalog},
    types::{PlaylistId, SongId, UserId},
};
use sqlx::SqlitePool;

/// SQLite-backed storage shared by every request
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `database_url` and apply
    /// pending migrations
    pub async fn connect(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PlaylistStore for Database {
    async fn get_playlist_members(&self, playlist_id: &PlaylistId) -> Result<Vec<SongId>> {
        playlists::get_members(&self.pool, playlist_id).await
    }

    async fn append_member(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()> {
        playlists::append_member(&self.pool, playlist_id, song_id).await
    }

    async fn remove_member(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()> {
        playlists::remove_member(&self.pool, playlist_id, song_id).await
    }

    async fn get_playlist_owner(&self, playlist_id: &PlaylistId) -> Result<Option<UserId>> {
        playlists::get_owner(&self.pool, playlist_id).await
    }
}

#[async_trait]
impl SongCatalog for Database {
    async fn song_exists(&self, song_id: &SongId) -> Result<bool> {
        songs::exists(&self.pool, song_id).await
    }
}
