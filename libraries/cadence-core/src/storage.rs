//! Collaborator traits consumed by the playlist membership service
//!
//! The SQLite implementation lives in `cadence-storage`; tests use
//! in-memory implementations.

use crate::error::Result;
use crate::types::{PlaylistId, SongId, UserId};
use async_trait::async_trait;

/// Ordered playlist membership persistence
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Member song ids ordered by position (empty for an unknown playlist)
    async fn get_playlist_members(&self, playlist_id: &PlaylistId) -> Result<Vec<SongId>>;

    /// Append a member after the current last one
    ///
    /// Must be atomic with respect to concurrent appends and must fail with
    /// `DuplicateMember` if the song is already present.
    async fn append_member(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()>;

    /// Remove a member, failing with `NotFound` if it is not present
    async fn remove_member(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()>;

    /// Owner of the playlist, or `None` if the playlist does not exist
    async fn get_playlist_owner(&self, playlist_id: &PlaylistId) -> Result<Option<UserId>>;
}

/// Song catalog lookups
#[async_trait]
pub trait SongCatalog: Send + Sync {
    async fn song_exists(&self, song_id: &SongId) -> Result<bool>;
}
