/// Core error types for Cadence
use thiserror::Error;

/// Entity names carried by [`CadenceError::NotFound`]
pub mod entity {
    pub const PLAYLIST: &str = "Playlist";
    pub const PLAYLIST_MEMBER: &str = "Playlist member";
    pub const SONG: &str = "Song";
}

/// Result type alias using `CadenceError`
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Core error type for Cadence
///
/// The first four variants are the playlist taxonomy: all of them are local,
/// recoverable conditions reported straight back to the caller.
#[derive(Error, Debug)]
pub enum CadenceError {
    /// Navigation over a playlist with no members
    #[error("No songs in playlist")]
    EmptyPlaylist,

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Mutation attempted by someone other than the owner
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Song is already a member of the playlist
    #[error("Song already in playlist")]
    DuplicateMember,

    /// Duplicate entry outside of playlists (accounts, likes)
    #[error("{0}")]
    Duplicate(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl CadenceError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Whether this is a `NotFound` for one of `entities`
    pub fn is_not_found_of(&self, entities: &[&str]) -> bool {
        matches!(self, Self::NotFound { entity: name, .. } if entities.contains(&name.as_str()))
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for CadenceError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
