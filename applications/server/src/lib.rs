//! Cadence Server Library
//!
//! Music streaming web backend: accounts, the song catalog with likes, and
//! playlists with circular next/previous navigation.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{auth::AuthService, media_storage::MediaStorage};
pub use state::AppState;
