//! Liked songs

use crate::error::is_unique_violation;
use crate::songs::{self, song_from_row, SONG_SELECT};
use cadence_core::{
    error::{entity, Result},
    types::{Song, SongId, UserId},
    CadenceError,
};
use sqlx::{Row, SqlitePool};

/// Like a song, returning the new like count
///
/// # Errors
///
/// `NotFound` for an unknown song, `Duplicate` if already liked
pub async fn like(pool: &SqlitePool, user_id: &UserId, song_id: &SongId) -> Result<i64> {
    if !songs::exists(pool, song_id).await? {
        return Err(CadenceError::not_found(entity::SONG, song_id.as_str()));
    }

    sqlx::query("INSERT INTO liked_songs (user_id, song_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(song_id)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CadenceError::Duplicate("Song already liked".to_string())
            } else {
                e.into()
            }
        })?;

    count(pool, song_id).await
}

/// Remove a like, returning the new like count
///
/// # Errors
///
/// `NotFound` for an unknown song, `InvalidInput` if it was not liked
pub async fn unlike(pool: &SqlitePool, user_id: &UserId, song_id: &SongId) -> Result<i64> {
    if !songs::exists(pool, song_id).await? {
        return Err(CadenceError::not_found(entity::SONG, song_id.as_str()));
    }

    let result = sqlx::query("DELETE FROM liked_songs WHERE user_id = ? AND song_id = ?")
        .bind(user_id)
        .bind(song_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CadenceError::invalid_input("Song not liked yet"));
    }

    count(pool, song_id).await
}

/// Number of likes on a song
pub async fn count(pool: &SqlitePool, song_id: &SongId) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM liked_songs WHERE song_id = ?")
        .bind(song_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get("count"))
}

/// Songs liked by `user_id`, most recent like first
pub async fn liked_songs(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<Song>> {
    let sql = format!(
        "{SONG_SELECT} FROM liked_songs lk
         INNER JOIN songs s ON s.id = lk.song_id
         WHERE lk.user_id = ?
         ORDER BY lk.id DESC"
    );
    let rows = sqlx::query(&sql)
        .bind(user_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    rows.iter().map(song_from_row).collect()
}
