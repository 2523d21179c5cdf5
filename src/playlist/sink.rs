//! Handing assembled playlists to a destination.
//!
//! The destination service is a collaborator: the engine only prepares a
//! [`PlaylistDraft`] and pushes it through a [`PlaylistSink`].

use super::Playlist;
use crate::catalog::Track;
use crate::error::{MoodifyError, Result};
use crate::mood::{Behavior, Mood};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Maximum number of tracks added per request to the destination.
pub const UPLOAD_BATCH_SIZE: usize = 100;

const TRACK_URI_PREFIX: &str = "spotify:track:";
const TRACK_URL_MARKER: &str = "open.spotify.com/track/";
const BARE_ID_LEN: usize = 22;

/// Playlist ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistDraft {
    pub name: String,
    pub description: String,
    pub uris: Vec<String>,
}

impl PlaylistDraft {
    /// Draft for `playlist`, resolving track uris from `tracks`.
    ///
    /// Tracks without a usable uri fall back to their id; anything that
    /// still does not look like a track reference is dropped.
    pub fn new(
        playlist: &Playlist,
        tracks: &[Track],
        mood: Mood,
        behavior: Behavior,
        prompt: &str,
    ) -> Self {
        let references = playlist.track_ids().iter().map(|id| {
            tracks
                .iter()
                .find(|t| &t.id == id)
                .and_then(|t| t.uri.clone())
                .unwrap_or_else(|| id.clone())
        });

        Self {
            name: playlist_name(mood, behavior),
            description: format!("Generated from prompt: {}", prompt),
            uris: prepare_track_uris(references),
        }
    }
}

pub fn playlist_name(mood: Mood, behavior: Behavior) -> String {
    format!("Moodify: {} ({})", mood, behavior.short_label())
}

/// Convert track references into `spotify:track:<id>` uris.
///
/// Accepts full uris, 22-character bare ids and `open.spotify.com/track/`
/// links (query string stripped). Other references are dropped.
pub fn prepare_track_uris<I, S>(references: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    references
        .into_iter()
        .filter_map(|r| track_uri(r.as_ref()))
        .collect()
}

fn track_uri(reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.starts_with(TRACK_URI_PREFIX) {
        return Some(reference.to_string());
    }
    if reference.len() == BARE_ID_LEN && reference.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(format!("{}{}", TRACK_URI_PREFIX, reference));
    }
    if let Some((_, tail)) = reference.split_once(TRACK_URL_MARKER) {
        let id = tail.split(['?', '#', '/']).next().unwrap_or_default();
        if !id.is_empty() {
            return Some(format!("{}{}", TRACK_URI_PREFIX, id));
        }
    }
    None
}

/// Reference to a playlist created by a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedPlaylist {
    pub id: String,
    /// Where the playlist can be opened, if the destination has a notion of it.
    pub location: Option<String>,
}

/// Destination for assembled playlists.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait PlaylistSink: Send + Sync {
    /// Create an empty playlist and return its id.
    async fn create_playlist(&self, name: &str, description: &str) -> Result<SavedPlaylist>;

    /// Append one batch of at most [`UPLOAD_BATCH_SIZE`] uris.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()>;
}

/// Create the playlist and upload its tracks in batches.
pub async fn persist_playlist(sink: &dyn PlaylistSink, draft: &PlaylistDraft) -> Result<SavedPlaylist> {
    let saved = sink.create_playlist(&draft.name, &draft.description).await?;
    for batch in draft.uris.chunks(UPLOAD_BATCH_SIZE) {
        debug!(playlist_id = %saved.id, batch_size = batch.len(), "Uploading playlist batch");
        sink.add_tracks(&saved.id, batch).await?;
    }
    info!(
        playlist_id = %saved.id,
        tracks = draft.uris.len(),
        "Playlist persisted"
    );
    Ok(saved)
}

/// On-disk form written by [`JsonFilePlaylistSink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPlaylist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub uris: Vec<String>,
}

/// Sink writing each playlist to `<dir>/<uuid>.json`.
pub struct JsonFilePlaylistSink {
    dir: PathBuf,
}

impl JsonFilePlaylistSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    async fn read(&self, path: &Path) -> Result<StoredPlaylist> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            MoodifyError::Persistence(format!("Failed to read playlist {:?}: {}", path, e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            MoodifyError::Persistence(format!("Failed to parse playlist {:?}: {}", path, e))
        })
    }

    async fn write(&self, path: &Path, stored: &StoredPlaylist) -> Result<()> {
        let content = serde_json::to_string_pretty(stored)
            .map_err(|e| MoodifyError::Persistence(e.to_string()))?;
        tokio::fs::write(path, content).await.map_err(|e| {
            MoodifyError::Persistence(format!("Failed to write playlist {:?}: {}", path, e))
        })
    }
}

#[async_trait]
impl PlaylistSink for JsonFilePlaylistSink {
    async fn create_playlist(&self, name: &str, description: &str) -> Result<SavedPlaylist> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            MoodifyError::Persistence(format!("Failed to create {:?}: {}", self.dir, e))
        })?;

        let stored = StoredPlaylist {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
            uris: Vec::new(),
        };
        let path = self.path_for(&stored.id);
        self.write(&path, &stored).await?;

        Ok(SavedPlaylist {
            id: stored.id,
            location: Some(path.to_string_lossy().to_string()),
        })
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let path = self.path_for(playlist_id);
        let mut stored = self.read(&path).await?;
        stored.uris.extend_from_slice(uris);
        self.write(&path, &stored).await
    }
}
