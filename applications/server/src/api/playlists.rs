/// Playlists API routes
use crate::{
    error::{Result, ServerError},
    middleware::{AuthenticatedUser, MaybeUser},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use cadence_core::{
    error::entity, membership, CadenceError, CreatePlaylist, Direction, Playlist, PlaylistId, Song, SongId,
};
use cadence_storage::{playlists, songs};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default, alias = "isPublic")]
    pub is_public: bool,
}

/// Success envelope shared by the playlist endpoints
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: &'static str,
    pub data: T,
}

fn success<T>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        message: "success",
        data,
    })
}

#[derive(Debug, Serialize)]
pub struct PlaylistDetails {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub songs: Vec<Song>,
}

#[derive(Debug, Serialize)]
pub struct DeletedPlaylist {
    pub deleted: bool,
    pub playlist_id: PlaylistId,
}

#[derive(Debug, Serialize)]
pub struct MembershipChange {
    pub playlist_id: PlaylistId,
    pub song_id: SongId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
}

/// Add/remove report a missing playlist and a missing song alike
fn membership_error(err: CadenceError) -> ServerError {
    if err.is_not_found_of(&[entity::PLAYLIST, entity::SONG]) {
        return ServerError::NotFound("Playlist or song not found".to_string());
    }

    match err {
        CadenceError::Forbidden(_) => {
            ServerError::Forbidden("Forbidden: You cannot modify this playlist".to_string())
        }
        other => other.into(),
    }
}

/// Playlist readable by `viewer`; private playlists of others look absent
async fn visible_playlist(
    app_state: &AppState,
    playlist_id: &PlaylistId,
    viewer: &MaybeUser,
) -> Result<Option<Playlist>> {
    let playlist = playlists::get_by_id(app_state.db.pool(), playlist_id).await?;
    Ok(playlist.filter(|p| p.is_visible_to(viewer.user_id())))
}

/// POST /api/v1/playlist
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<Envelope<Playlist>>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ServerError::BadRequest(
            "Playlist name is required".to_string(),
        ));
    }

    let playlist = playlists::create(
        app_state.db.pool(),
        CreatePlaylist {
            name: name.to_string(),
            description: req.description.filter(|d| !d.trim().is_empty()),
            owner_id: auth.user_id().clone(),
            is_public: req.is_public,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, success(playlist)))
}

/// DELETE /api/v1/playlist/:playlist_id
pub async fn delete_playlist(
    Path(playlist_id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Envelope<DeletedPlaylist>>> {
    let playlist_id = PlaylistId::new(playlist_id);

    playlists::delete(app_state.db.pool(), &playlist_id, auth.user_id())
        .await
        .map_err(|e| match e {
            CadenceError::Forbidden(_) => {
                ServerError::Forbidden("Forbidden: You cannot delete this playlist".to_string())
            }
            other => other.into(),
        })?;

    Ok(success(DeletedPlaylist {
        deleted: true,
        playlist_id,
    }))
}

/// GET /api/v1/playlist/user
/// Caller's own playlists, public and private
pub async fn user_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Envelope<Vec<Playlist>>>> {
    let playlists = playlists::get_by_owner(app_state.db.pool(), auth.user_id()).await?;
    Ok(success(playlists))
}

/// GET /api/v1/playlist/public
pub async fn public_playlists(
    State(app_state): State<AppState>,
) -> Result<Json<Envelope<Vec<Playlist>>>> {
    let playlists = playlists::get_public(app_state.db.pool()).await?;
    Ok(success(playlists))
}

/// GET /api/v1/playlist/:playlist_id
pub async fn get_playlist(
    Path(playlist_id): Path<String>,
    State(app_state): State<AppState>,
    viewer: MaybeUser,
) -> Result<Json<Envelope<PlaylistDetails>>> {
    let playlist_id = PlaylistId::new(playlist_id);
    let playlist = visible_playlist(&app_state, &playlist_id, &viewer)
        .await?
        .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))?;

    let songs = playlists::get_songs(app_state.db.pool(), &playlist_id, viewer.user_id()).await?;

    Ok(success(PlaylistDetails { playlist, songs }))
}

/// GET /api/v1/playlist/:playlist_id/songs
/// Member songs in playlist order
pub async fn playlist_songs(
    Path(playlist_id): Path<String>,
    State(app_state): State<AppState>,
    viewer: MaybeUser,
) -> Result<Json<Envelope<Vec<Song>>>> {
    let playlist_id = PlaylistId::new(playlist_id);
    if visible_playlist(&app_state, &playlist_id, &viewer).await?.is_none() {
        return Err(ServerError::NotFound("Playlist not found".to_string()));
    }

    let songs = playlists::get_songs(app_state.db.pool(), &playlist_id, viewer.user_id()).await?;
    Ok(success(songs))
}

/// POST /api/v1/playlist/:playlist_id/songs/:song_id
pub async fn add_song(
    Path((playlist_id, song_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Envelope<MembershipChange>>> {
    let playlist_id = PlaylistId::new(playlist_id);
    let song_id = SongId::new(song_id);
    let db = app_state.db.as_ref();

    membership::add_song(db, db, auth.user_id(), &playlist_id, &song_id)
        .await
        .map_err(membership_error)?;

    tracing::debug!(playlist_id = %playlist_id, song_id = %song_id, "Song added to playlist");

    Ok(success(MembershipChange {
        playlist_id,
        song_id,
        added: Some(true),
        removed: None,
    }))
}

/// DELETE /api/v1/playlist/:playlist_id/songs/:song_id
pub async fn remove_song(
    Path((playlist_id, song_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Envelope<MembershipChange>>> {
    let playlist_id = PlaylistId::new(playlist_id);
    let song_id = SongId::new(song_id);
    let db = app_state.db.as_ref();

    membership::remove_song(db, db, auth.user_id(), &playlist_id, &song_id)
        .await
        .map_err(membership_error)?;

    Ok(success(MembershipChange {
        playlist_id,
        song_id,
        added: None,
        removed: Some(true),
    }))
}

/// GET /api/v1/playlist/:playlist_id/songs/:song_id/next
pub async fn next_song(
    Path((playlist_id, song_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    viewer: MaybeUser,
) -> Result<Json<Song>> {
    navigate(&app_state, playlist_id, song_id, &viewer, Direction::Next).await
}

/// GET /api/v1/playlist/:playlist_id/songs/:song_id/prev
pub async fn prev_song(
    Path((playlist_id, song_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    viewer: MaybeUser,
) -> Result<Json<Song>> {
    navigate(&app_state, playlist_id, song_id, &viewer, Direction::Prev).await
}

/// Step through the playlist and return the full target song
///
/// A missing or hidden playlist answers like an empty one.
async fn navigate(
    app_state: &AppState,
    playlist_id: String,
    song_id: String,
    viewer: &MaybeUser,
    direction: Direction,
) -> Result<Json<Song>> {
    let playlist_id = PlaylistId::new(playlist_id);
    if visible_playlist(app_state, &playlist_id, viewer).await?.is_none() {
        return Err(CadenceError::EmptyPlaylist.into());
    }

    let target = membership::navigate(
        app_state.db.as_ref(),
        &playlist_id,
        &SongId::new(song_id),
        direction,
    )
    .await?;

    let song = songs::get_by_id(app_state.db.pool(), &target, viewer.user_id())
        .await?
        .ok_or_else(|| ServerError::NotFound("Song not found".to_string()))?;

    Ok(Json(song))
}
