//! Playlist membership operations
//!
//! Owner-only add/remove and circular navigation on top of the
//! [`PlaylistStore`] and [`SongCatalog`] collaborators. Checks run in a fixed
//! order: existence, then ownership, then duplicates.

use crate::error::{entity, CadenceError, Result};
use crate::navigation::{self, Direction};
use crate::storage::{PlaylistStore, SongCatalog};
use crate::types::{PlaylistId, SongId, UserId};

/// Add `song_id` at the end of the playlist
///
/// # Errors
/// `NotFound` (playlist or song), `Forbidden` (not the owner),
/// `DuplicateMember` (already present).
pub async fn add_song<S, C>(
    store: &S,
    catalog: &C,
    actor: &UserId,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<()>
where
    S: PlaylistStore + ?Sized,
    C: SongCatalog + ?Sized,
{
    let owner = require_existing(store, catalog, playlist_id, song_id).await?;
    require_owner(&owner, actor)?;

    let members = store.get_playlist_members(playlist_id).await?;
    if members.contains(song_id) {
        return Err(CadenceError::DuplicateMember);
    }

    // The store re-checks uniqueness atomically; the lookup above only
    // short-circuits the common case.
    store.append_member(playlist_id, song_id).await
}

/// Remove `song_id` from the playlist, preserving the order of the rest
///
/// # Errors
/// `NotFound` (playlist, song, or membership), `Forbidden` (not the owner).
pub async fn remove_song<S, C>(
    store: &S,
    catalog: &C,
    actor: &UserId,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<()>
where
    S: PlaylistStore + ?Sized,
    C: SongCatalog + ?Sized,
{
    let owner = require_existing(store, catalog, playlist_id, song_id).await?;
    require_owner(&owner, actor)?;

    store.remove_member(playlist_id, song_id).await
}

/// Song after `current` in the playlist, wrapping around
pub async fn next_song<S>(store: &S, playlist_id: &PlaylistId, current: &SongId) -> Result<SongId>
where
    S: PlaylistStore + ?Sized,
{
    navigate(store, playlist_id, current, Direction::Next).await
}

/// Song before `current` in the playlist, wrapping around
pub async fn prev_song<S>(store: &S, playlist_id: &PlaylistId, current: &SongId) -> Result<SongId>
where
    S: PlaylistStore + ?Sized,
{
    navigate(store, playlist_id, current, Direction::Prev).await
}

/// Navigate over a fresh snapshot of the member list
///
/// An unknown playlist has no members and therefore reports `EmptyPlaylist`.
pub async fn navigate<S>(
    store: &S,
    playlist_id: &PlaylistId,
    current: &SongId,
    direction: Direction,
) -> Result<SongId>
where
    S: PlaylistStore + ?Sized,
{
    let members = store.get_playlist_members(playlist_id).await?;
    navigation::step(&members, current, direction).cloned()
}

async fn require_existing<S, C>(
    store: &S,
    catalog: &C,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<UserId>
where
    S: PlaylistStore + ?Sized,
    C: SongCatalog + ?Sized,
{
    let owner = store
        .get_playlist_owner(playlist_id)
        .await?
        .ok_or_else(|| CadenceError::not_found(entity::PLAYLIST, playlist_id.as_str()))?;

    if !catalog.song_exists(song_id).await? {
        return Err(CadenceError::not_found(entity::SONG, song_id.as_str()));
    }

    Ok(owner)
}

fn require_owner(owner: &UserId, actor: &UserId) -> Result<()> {
    if owner == actor {
        Ok(())
    } else {
        Err(CadenceError::forbidden("You cannot modify this playlist"))
    }
}
