//! Catalog song types

use super::genre::Genre;
use super::ids::SongId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A song in the catalog, as returned to listeners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub genre: Option<Genre>,
    /// `YYYY-MM-DD`, as supplied at upload
    pub release_date: Option<String>,
    /// `m:ss`
    pub duration: Option<String>,
    pub audio_url: String,
    pub cover_image_url: Option<String>,

    /// Number of listeners who liked the song
    pub likes_count: i64,

    /// Whether the requesting listener liked it (false for anonymous requests)
    pub liked_by_user: bool,

    pub created_at: String,
}

/// Data for adding a song to the catalog
#[derive(Debug, Clone)]
pub struct CreateSong {
    pub id: SongId,
    pub title: String,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub genre: Option<Genre>,
    pub release_date: Option<String>,
    pub duration: Option<String>,
    pub audio_url: String,
    pub cover_image_url: Option<String>,
}

/// Format a track length as `m:ss`, dropping fractional seconds
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Parse the `artist` upload field: a JSON array of names, or one plain name
pub fn parse_artists(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(names) => names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect(),
        Err(_) => {
            let name = raw.trim();
            if name.is_empty() {
                Vec::new()
            } else {
                vec![name.to_string()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formatting_pads_seconds() {
        assert_eq!(format_duration(Duration::from_secs(225)), "3:45");
        assert_eq!(format_duration(Duration::from_millis(61_900)), "1:01");
        assert_eq!(format_duration(Duration::ZERO), "0:00");
    }

    #[test]
    fn artists_from_json_array() {
        assert_eq!(
            parse_artists(r#"["Daft Punk", " Pharrell "]"#),
            vec!["Daft Punk".to_string(), "Pharrell".to_string()]
        );
    }

    #[test]
    fn artists_from_plain_string() {
        assert_eq!(parse_artists("Björk"), vec!["Björk".to_string()]);
        assert!(parse_artists("   ").is_empty());
    }
}
