/// Songs API routes
use crate::{
    error::{Result, ServerError},
    middleware::{AdminUser, AuthenticatedUser, MaybeUser},
    services::media_storage::{sanitize_extension, MediaKind},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use cadence_core::{format_duration, parse_artists, CreateSong, Genre, Song, SongId};
use cadence_storage::{likes, songs};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct SongUploadedResponse {
    pub message: String,
    pub song: Song,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub message: String,
    pub data: LikeData,
}

#[derive(Debug, Serialize)]
pub struct LikeData {
    pub song_id: SongId,
    pub likes_count: i64,
}

/// An uploaded file part
struct UploadedFile {
    extension: String,
    data: Bytes,
}

/// Fields of the song upload form
#[derive(Default)]
struct SongUpload {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    genre: Option<String>,
    release_date: Option<String>,
    audio: Option<UploadedFile>,
    cover: Option<UploadedFile>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// File extension from the part's filename, else from its content type
fn file_extension(file_name: Option<&str>, content_type: Option<&str>) -> Option<String> {
    file_name
        .and_then(|name| std::path::Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_string)
        .or_else(|| {
            content_type
                .and_then(mime_guess::get_mime_extensions_str)
                .and_then(|exts| exts.first())
                .map(|ext| (*ext).to_string())
        })
}

async fn parse_upload(headers: &HeaderMap, body: Bytes) -> Result<SongUpload> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    if !content_type.starts_with("multipart/form-data") {
        return Err(ServerError::BadRequest(
            "Expected multipart/form-data".to_string(),
        ));
    }

    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| ServerError::BadRequest("Missing boundary".to_string()))?;

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut upload = SongUpload::default();
    let bad_part = |e: multer::Error| ServerError::BadRequest(format!("Failed to parse multipart: {}", e));

    while let Some(field) = multipart.next_field().await.map_err(bad_part)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "audio" | "cover" => {
                let extension = file_extension(
                    field.file_name(),
                    field.content_type().map(|mime| mime.essence_str()),
                )
                .ok_or_else(|| ServerError::BadRequest(format!("Cannot tell the type of {name}")))?;
                let extension = sanitize_extension(&extension)?;
                let data = field.bytes().await.map_err(bad_part)?;
                let file = UploadedFile { extension, data };

                if name == "audio" {
                    upload.audio = Some(file);
                } else {
                    upload.cover = Some(file);
                }
            }
            "title" => upload.title = Some(field.text().await.map_err(bad_part)?),
            "artist" => upload.artist = Some(field.text().await.map_err(bad_part)?),
            "album" => upload.album = Some(field.text().await.map_err(bad_part)?),
            "genre" => upload.genre = Some(field.text().await.map_err(bad_part)?),
            "releaseDate" => upload.release_date = Some(field.text().await.map_err(bad_part)?),
            _ => {}
        }
    }

    Ok(upload)
}

/// POST /api/v1/songs
/// Upload a song (multipart: audio file, optional cover image, metadata fields)
pub async fn create_song(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<SongUploadedResponse>)> {
    let SongUpload {
        title,
        artist,
        album,
        genre,
        release_date,
        audio,
        cover,
    } = parse_upload(&headers, body).await?;

    let title = non_empty(title);
    let artists = non_empty(artist)
        .map(|raw| parse_artists(&raw))
        .filter(|artists| !artists.is_empty());
    let (Some(title), Some(artists)) = (title, artists) else {
        return Err(ServerError::BadRequest(
            "Title and artist are required".to_string(),
        ));
    };

    let audio = audio.ok_or_else(|| ServerError::BadRequest("Audio file is required".to_string()))?;

    let genre = non_empty(genre)
        .map(|g| g.parse::<Genre>())
        .transpose()?;

    let song_id = SongId::generate();
    let media = &app_state.media_storage;

    // Any failure past the first write removes every file stored for the song
    let created = async {
        let stored_audio = media
            .store(&song_id, MediaKind::Audio, &audio.extension, &audio.data)
            .await?;
        let duration = media
            .read_duration(&stored_audio.path)
            .await
            .map(format_duration);

        let cover_url = match cover {
            Some(cover) => Some(
                media
                    .store(&song_id, MediaKind::Cover, &cover.extension, &cover.data)
                    .await?
                    .url,
            ),
            None => None,
        };

        let song = songs::create(
            app_state.db.pool(),
            CreateSong {
                id: song_id.clone(),
                title,
                artists,
                album: non_empty(album),
                genre,
                release_date: non_empty(release_date),
                duration,
                audio_url: stored_audio.url,
                cover_image_url: cover_url,
            },
        )
        .await?;

        Ok::<_, ServerError>(song)
    }
    .await;

    let song = match created {
        Ok(song) => song,
        Err(e) => {
            if let Err(cleanup) = media.delete_song(&song_id).await {
                tracing::warn!("Failed to remove media for rejected upload: {}", cleanup);
            }
            return Err(e);
        }
    };

    tracing::info!(song_id = %song.id, title = %song.title, "Song uploaded");

    Ok((
        StatusCode::CREATED,
        Json(SongUploadedResponse {
            message: "Song uploaded successfully".to_string(),
            song,
        }),
    ))
}

/// GET /api/v1/songs
pub async fn list_songs(
    State(app_state): State<AppState>,
    viewer: MaybeUser,
) -> Result<Json<Vec<Song>>> {
    let songs = songs::get_all(app_state.db.pool(), viewer.user_id()).await?;
    Ok(Json(songs))
}

/// GET /api/v1/songs/:id
pub async fn get_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    viewer: MaybeUser,
) -> Result<Json<Song>> {
    let song = songs::get_by_id(app_state.db.pool(), &SongId::new(id), viewer.user_id())
        .await?
        .ok_or_else(|| ServerError::NotFound("Song not found".to_string()))?;
    Ok(Json(song))
}

/// DELETE /api/v1/songs/:id
/// Removes the song, its likes, its playlist entries and its media files
pub async fn delete_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Value>> {
    let song_id = SongId::new(id);

    songs::delete(app_state.db.pool(), &song_id).await?;

    // The catalog entry is gone either way; leftover files are only logged
    if let Err(e) = app_state.media_storage.delete_song(&song_id).await {
        tracing::warn!(song_id = %song_id, "Failed to remove media for deleted song: {}", e);
    }

    Ok(Json(json!({ "message": "Song deleted successfully" })))
}

/// POST /api/v1/songs/:id/like
pub async fn like_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<LikeResponse>> {
    let song_id = SongId::new(id);
    let likes_count = likes::like(app_state.db.pool(), auth.user_id(), &song_id).await?;

    Ok(Json(LikeResponse {
        message: "Song liked successfully".to_string(),
        data: LikeData { song_id, likes_count },
    }))
}

/// DELETE /api/v1/songs/:id/like
pub async fn unlike_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<LikeResponse>> {
    let song_id = SongId::new(id);
    let likes_count = likes::unlike(app_state.db.pool(), auth.user_id(), &song_id).await?;

    Ok(Json(LikeResponse {
        message: "Song unliked successfully".to_string(),
        data: LikeData { song_id, likes_count },
    }))
}

/// GET /api/v1/songs/liked/me
pub async fn liked_songs(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let songs = likes::liked_songs(app_state.db.pool(), auth.user_id()).await?;
    Ok(Json(json!({ "message": "success", "data": songs })))
}

/// GET /api/v1/songs/genre/:genre
pub async fn songs_by_genre(
    Path(genre): Path<String>,
    State(app_state): State<AppState>,
    viewer: MaybeUser,
) -> Result<Json<Vec<Song>>> {
    let genre: Genre = genre.parse()?;
    let songs = songs::get_by_genre(app_state.db.pool(), genre, viewer.user_id()).await?;

    if songs.is_empty() {
        return Err(ServerError::NotFound(format!(
            "No songs found for genre: {genre}"
        )));
    }

    Ok(Json(songs))
}
