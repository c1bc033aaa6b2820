//! Cadence Core
//!
//! Domain types, the playlist ordering engine, and the collaborator traits
//! shared by the storage layer and the HTTP server.
//!
//! # Architecture
//!
//! - **Domain Types**: `Song`, `Playlist`, `User`, typed ids
//! - **Navigation**: circular next/prev over an ordered member list
//! - **Membership**: owner-only add/remove on top of `PlaylistStore` + `SongCatalog`
//! - **Error Handling**: unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::navigation::{next, prev};
//!
//! let playlist = ["intro", "verse", "outro"];
//! assert_eq!(next(&playlist, &"outro").unwrap(), &"intro");
//! assert_eq!(prev(&playlist, &"intro").unwrap(), &"outro");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod membership;
pub mod navigation;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{CadenceError, Result};
pub use navigation::{Direction, Membership};
pub use storage::{PlaylistStore, SongCatalog};

pub use types::{
    format_duration, parse_artists, CreatePlaylist, CreateSong, CreateUser, Genre, Playlist,
    PlaylistId, PlaylistSong, Role, Song, SongId, User, UserId,
};
