mod genre;
mod ids;
mod playlist;
mod song;
mod user;

pub use genre::Genre;
pub use ids::{PlaylistId, SongId, UserId};
pub use playlist::{CreatePlaylist, Playlist, PlaylistSong};
pub use song::{format_duration, parse_artists, CreateSong, Song};
pub use user::{CreateUser, Role, User};
