/// Playlist domain types
use super::ids::{PlaylistId, SongId, UserId};
use serde::{Deserialize, Serialize};

/// Playlist owned by a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    pub description: Option<String>,

    /// Owner user ID
    pub owner_id: UserId,

    /// Public playlists are visible to everyone, private ones to the owner only
    pub is_public: bool,

    pub created_at: String,
    pub updated_at: String,
}

impl Playlist {
    /// Only the owner may mutate a playlist
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Whether `viewer` (None for anonymous requests) may read the playlist
    pub fn is_visible_to(&self, viewer: Option<&UserId>) -> bool {
        self.is_public || viewer.is_some_and(|user_id| self.is_owned_by(user_id))
    }
}

/// Data for creating a new playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: UserId,
    pub is_public: bool,
}

/// Song reference within a playlist
///
/// `position` is the authoritative ordering field: strictly increasing in
/// insertion order and unique per playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSong {
    pub playlist_id: PlaylistId,
    pub song_id: SongId,
    pub position: i64,
    pub added_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(is_public: bool) -> Playlist {
        Playlist {
            id: PlaylistId::new("playlist-1"),
            name: "Road Trip".to_string(),
            description: None,
            owner_id: UserId::new("user-1"),
            is_public,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn private_playlist_visible_to_owner_only() {
        let private = playlist(false);
        assert!(private.is_visible_to(Some(&UserId::new("user-1"))));
        assert!(!private.is_visible_to(Some(&UserId::new("user-2"))));
        assert!(!private.is_visible_to(None));
    }

    #[test]
    fn public_playlist_visible_to_everyone() {
        let public = playlist(true);
        assert!(public.is_visible_to(None));
        assert!(public.is_visible_to(Some(&UserId::new("user-2"))));
    }
}
