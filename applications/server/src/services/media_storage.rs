/// Media storage service - uploaded audio and cover art on local disk
use crate::error::{Result, ServerError};
use cadence_core::SongId;
use lofty::AudioFile;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// URL prefix under which the media directory is served
pub const MEDIA_URL_PREFIX: &str = "/media";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Cover,
}

impl MediaKind {
    pub fn subdirectory(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Cover => "covers",
        }
    }
}

/// A file written by [`MediaStorage::store`]
#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub path: PathBuf,
    /// Public URL, relative to the server root
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct MediaStorage {
    base_path: PathBuf,
}

impl MediaStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Initialize storage directories
    pub async fn initialize(&self) -> Result<()> {
        for kind in [MediaKind::Audio, MediaKind::Cover] {
            fs::create_dir_all(self.base_path.join(kind.subdirectory())).await?;
        }
        Ok(())
    }

    /// Store an uploaded file as `<song id>.<extension>`
    pub async fn store(
        &self,
        song_id: &SongId,
        kind: MediaKind,
        extension: &str,
        data: &[u8],
    ) -> Result<StoredMedia> {
        let extension = sanitize_extension(extension)?;
        let filename = format!("{}.{}", song_id.as_str(), extension);
        let path = self.base_path.join(kind.subdirectory()).join(&filename);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;

        Ok(StoredMedia {
            path,
            url: format!("{MEDIA_URL_PREFIX}/{}/{filename}", kind.subdirectory()),
        })
    }

    /// Delete every stored file belonging to a song
    pub async fn delete_song(&self, song_id: &SongId) -> Result<()> {
        let prefix = format!("{}.", song_id.as_str());

        for kind in [MediaKind::Audio, MediaKind::Cover] {
            let dir = self.base_path.join(kind.subdirectory());
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            while let Some(entry) = entries.next_entry().await? {
                if entry.file_name().to_string_lossy().starts_with(&prefix) {
                    fs::remove_file(entry.path()).await?;
                }
            }
        }

        Ok(())
    }

    /// Playback length of a stored audio file, `None` if it cannot be read
    pub async fn read_duration(&self, path: &Path) -> Option<Duration> {
        let path = path.to_path_buf();
        let probed = tokio::task::spawn_blocking(move || {
            lofty::read_from_path(&path).map(|file| file.properties().duration())
        })
        .await;

        match probed {
            Ok(Ok(duration)) => Some(duration),
            Ok(Err(e)) => {
                tracing::warn!("Could not read audio properties: {}", e);
                None
            }
            Err(e) => {
                tracing::error!("Duration probe task failed: {}", e);
                None
            }
        }
    }
}

/// Lowercased extension limited to ASCII alphanumerics
pub(crate) fn sanitize_extension(extension: &str) -> Result<String> {
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();
    if extension.is_empty()
        || extension.len() > 8
        || !extension.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(ServerError::BadRequest(format!(
            "Unsupported file extension: {extension}"
        )));
    }
    Ok(extension)
}
