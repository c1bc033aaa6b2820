//! Song catalog queries
//!
//! Like counts and the per-viewer `liked_by_user` flag are derived from
//! `liked_songs` at read time, never stored on the song row.

use cadence_core::{
    error::{entity, Result},
    types::{CreateSong, Genre, Song, SongId, UserId},
    CadenceError,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Song columns plus derived like data; expects the song table aliased `s`
/// and the viewer id bound as the first parameter.
pub(crate) const SONG_SELECT: &str = r#"
    SELECT
        s.id, s.title, s.artists, s.album, s.genre, s.release_date, s.duration,
        s.audio_url, s.cover_image_url, s.created_at,
        (SELECT COUNT(*) FROM liked_songs l WHERE l.song_id = s.id) AS likes_count,
        EXISTS (
            SELECT 1 FROM liked_songs l WHERE l.song_id = s.id AND l.user_id = ?
        ) AS liked_by_user
"#;

pub(crate) fn song_from_row(row: &SqliteRow) -> Result<Song> {
    let artists: String = row.get("artists");
    let artists = serde_json::from_str(&artists)
        .map_err(|e| CadenceError::storage(format!("Corrupt artists column: {e}")))?;
    let genre: Option<String> = row.get("genre");

    Ok(Song {
        id: row.get("id"),
        title: row.get("title"),
        artists,
        album: row.get("album"),
        genre: genre.and_then(|g| g.parse::<Genre>().ok()),
        release_date: row.get("release_date"),
        duration: row.get("duration"),
        audio_url: row.get("audio_url"),
        cover_image_url: row.get("cover_image_url"),
        likes_count: row.get("likes_count"),
        liked_by_user: row.get::<i64, _>("liked_by_user") != 0,
        created_at: row.get("created_at"),
    })
}

/// Add a song to the catalog
pub async fn create(pool: &SqlitePool, song: CreateSong) -> Result<Song> {
    let artists = serde_json::to_string(&song.artists)
        .map_err(|e| CadenceError::storage(e.to_string()))?;

    sqlx::query(
        r#"
        INSERT INTO songs (
            id, title, artists, album, genre, release_date, duration,
            audio_url, cover_image_url
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&song.id)
    .bind(&song.title)
    .bind(&artists)
    .bind(&song.album)
    .bind(song.genre.map(|g| g.as_str()))
    .bind(&song.release_date)
    .bind(&song.duration)
    .bind(&song.audio_url)
    .bind(&song.cover_image_url)
    .execute(pool)
    .await?;

    get_by_id(pool, &song.id, None)
        .await?
        .ok_or_else(|| CadenceError::storage("Failed to retrieve created song"))
}

/// Get all songs in upload order
pub async fn get_all(pool: &SqlitePool, viewer: Option<&UserId>) -> Result<Vec<Song>> {
    let sql = format!("{SONG_SELECT} FROM songs s ORDER BY s.rowid");
    let rows = sqlx::query(&sql)
        .bind(viewer.map(UserId::as_str))
        .fetch_all(pool)
        .await?;

    rows.iter().map(song_from_row).collect()
}

/// Get song by ID
pub async fn get_by_id(
    pool: &SqlitePool,
    id: &SongId,
    viewer: Option<&UserId>,
) -> Result<Option<Song>> {
    let sql = format!("{SONG_SELECT} FROM songs s WHERE s.id = ?");
    let row = sqlx::query(&sql)
        .bind(viewer.map(UserId::as_str))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(song_from_row).transpose()
}

/// Get all songs filed under `genre`
pub async fn get_by_genre(
    pool: &SqlitePool,
    genre: Genre,
    viewer: Option<&UserId>,
) -> Result<Vec<Song>> {
    let sql = format!("{SONG_SELECT} FROM songs s WHERE s.genre = ? ORDER BY s.rowid");
    let rows = sqlx::query(&sql)
        .bind(viewer.map(UserId::as_str))
        .bind(genre.as_str())
        .fetch_all(pool)
        .await?;

    rows.iter().map(song_from_row).collect()
}

/// Whether a song exists
pub async fn exists(pool: &SqlitePool, id: &SongId) -> Result<bool> {
    let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM songs WHERE id = ?) AS found")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("found") != 0)
}

/// Delete song
///
/// Likes and playlist references go with it (`ON DELETE CASCADE`).
pub async fn delete(pool: &SqlitePool, id: &SongId) -> Result<()> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CadenceError::not_found(entity::SONG, id.as_str()));
    }

    Ok(())
}
