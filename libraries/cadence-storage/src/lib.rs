//! Cadence Storage
//!
//! `SQLite` persistence for accounts, the song catalog, likes and playlists.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each feature owns its own queries (`users`,
//!   `songs`, `likes`, `playlists`)
//! - **Ordered Membership**: `playlist_songs.position` is the single source
//!   of playlist order
//! - **Collaborators**: [`Database`] implements the `PlaylistStore` and
//!   `SongCatalog` traits from `cadence-core`
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence_core::{membership, PlaylistId, SongId};
//! use cadence_storage::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite://cadence.db").await?;
//!
//! let next = membership::next_song(&db, &PlaylistId::new("road-trip"), &SongId::new("intro")).await?;
//! println!("up next: {next}");
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod likes;
pub mod playlists;
pub mod songs;
pub mod users;

pub use context::Database;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://cadence.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool ready");

    Ok(pool)
}
