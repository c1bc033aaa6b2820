//! Playlists and their ordered membership
//!
//! `playlist_songs.position` is the only ordering source. Appends take
//! `MAX(position) + 1` inside the INSERT itself, so two concurrent appends
//! can never read the same maximum. Removals leave gaps instead of
//! renumbering.

use crate::error::is_unique_violation;
use crate::songs::{song_from_row, SONG_SELECT};
use cadence_core::{
    error::{entity, Result},
    types::{CreatePlaylist, Playlist, PlaylistId, PlaylistSong, Song, SongId, UserId},
    CadenceError,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const PLAYLIST_COLUMNS: &str =
    "SELECT id, name, description, owner_id, is_public, created_at, updated_at FROM playlists";

fn playlist_from_row(row: &SqliteRow) -> Playlist {
    Playlist {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        owner_id: row.get("owner_id"),
        is_public: row.get::<i64, _>("is_public") != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Create new playlist
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let id = PlaylistId::generate();

    sqlx::query(
        r#"
        INSERT INTO playlists (id, name, description, owner_id, is_public)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&playlist.name)
    .bind(&playlist.description)
    .bind(&playlist.owner_id)
    .bind(playlist.is_public)
    .execute(pool)
    .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| CadenceError::storage("Failed to retrieve created playlist"))
}

/// Get playlist by ID
///
/// Visibility is not checked here; see [`Playlist::is_visible_to`].
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let sql = format!("{PLAYLIST_COLUMNS} WHERE id = ?");
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    Ok(row.as_ref().map(playlist_from_row))
}

/// Get playlists owned by `owner_id`, most recently changed first
pub async fn get_by_owner(pool: &SqlitePool, owner_id: &UserId) -> Result<Vec<Playlist>> {
    let sql = format!("{PLAYLIST_COLUMNS} WHERE owner_id = ? ORDER BY updated_at DESC, rowid DESC");
    let rows = sqlx::query(&sql).bind(owner_id).fetch_all(pool).await?;

    Ok(rows.iter().map(playlist_from_row).collect())
}

/// Get all public playlists
pub async fn get_public(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let sql = format!("{PLAYLIST_COLUMNS} WHERE is_public = 1 ORDER BY updated_at DESC, rowid DESC");
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    Ok(rows.iter().map(playlist_from_row).collect())
}

/// Owner of a playlist, `None` if it does not exist
pub async fn get_owner(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<UserId>> {
    let row = sqlx::query("SELECT owner_id FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| row.get("owner_id")))
}

/// Delete playlist (members go with it)
///
/// # Errors
///
/// `NotFound` for an unknown playlist, `Forbidden` unless `actor` owns it
pub async fn delete(pool: &SqlitePool, id: &PlaylistId, actor: &UserId) -> Result<()> {
    match get_owner(pool, id).await? {
        Some(owner) if &owner == actor => {
            sqlx::query("DELETE FROM playlists WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await?;
            Ok(())
        }
        Some(_) => Err(CadenceError::forbidden("You cannot delete this playlist")),
        None => Err(CadenceError::not_found(entity::PLAYLIST, id.as_str())),
    }
}

/// Member song ids ordered by position
pub async fn get_members(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<Vec<SongId>> {
    let rows = sqlx::query(
        "SELECT song_id FROM playlist_songs WHERE playlist_id = ? ORDER BY position",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|row| row.get("song_id")).collect())
}

/// Membership rows ordered by position
pub async fn get_entries(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<Vec<PlaylistSong>> {
    let rows = sqlx::query(
        r#"
        SELECT playlist_id, song_id, position, added_at
        FROM playlist_songs
        WHERE playlist_id = ?
        ORDER BY position
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistSong {
            playlist_id: row.get("playlist_id"),
            song_id: row.get("song_id"),
            position: row.get("position"),
            added_at: row.get("added_at"),
        })
        .collect())
}

/// Member songs with catalog details, ordered by position
pub async fn get_songs(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    viewer: Option<&UserId>,
) -> Result<Vec<Song>> {
    let sql = format!(
        "{SONG_SELECT} FROM playlist_songs ps
         INNER JOIN songs s ON s.id = ps.song_id
         WHERE ps.playlist_id = ?
         ORDER BY ps.position"
    );
    let rows = sqlx::query(&sql)
        .bind(viewer.map(UserId::as_str))
        .bind(playlist_id)
        .fetch_all(pool)
        .await?;

    rows.iter().map(song_from_row).collect()
}

/// Append a song after the current last member
///
/// Ownership is checked by the caller.
///
/// # Errors
///
/// `DuplicateMember` if the song is already in the playlist
pub async fn append_member(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO playlist_songs (playlist_id, song_id, position)
        SELECT ?, ?, COALESCE(MAX(position), 0) + 1
        FROM playlist_songs
        WHERE playlist_id = ?
        "#,
    )
    .bind(playlist_id)
    .bind(song_id)
    .bind(playlist_id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            CadenceError::DuplicateMember
        } else {
            e.into()
        }
    })?;

    sqlx::query("UPDATE playlists SET updated_at = datetime('now') WHERE id = ?")
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

/// Remove a member, leaving the other positions untouched
///
/// # Errors
///
/// `NotFound` if the song is not in the playlist
pub async fn remove_member(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id)
        .bind(song_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CadenceError::not_found(entity::PLAYLIST_MEMBER, song_id.as_str()));
    }

    sqlx::query("UPDATE playlists SET updated_at = datetime('now') WHERE id = ?")
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}
