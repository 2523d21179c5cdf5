//! End-to-end playlist generation.
//!
//! classify -> target mood -> fetch candidates -> pool -> score -> sample
//! -> assemble.

use crate::catalog::{CandidatePool, Track, TrackCatalogProvider};
use crate::classifier::MoodClassifier;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::mood::{Behavior, Mood};
use crate::playlist::{assemble, Playlist};
use crate::scoring::{sample, score_tracks};
use std::sync::Arc;
use tracing::info;

/// Build a playlist for `mood` out of an already-built pool.
///
/// Scores every candidate, draws `size` ids and assembles them. Performs no
/// I/O. With a seed the output is reproducible for the same pool and
/// configuration.
pub fn build_playlist(
    pool: &CandidatePool,
    mood: Mood,
    size: usize,
    seed: Option<u64>,
    config: &EngineConfig,
) -> Result<Playlist> {
    let scored = score_tracks(
        pool.tracks(),
        mood,
        &config.genre_profile,
        &config.weights,
        config.popularity_scale,
    )?;

    let sampled = sample(&scored, size, seed);
    Ok(assemble(sampled, size))
}

/// One playlist request.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub text: String,
    pub behavior: Behavior,
    pub seed: Option<u64>,
    /// Falls back to the configured default playlist size.
    pub size: Option<usize>,
}

impl GenerationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPlaylist {
    pub detected_mood: Mood,
    pub target_mood: Mood,
    pub behavior: Behavior,
    pub playlist: Playlist,
    /// Playlist tracks, in playlist order.
    pub tracks: Vec<Track>,
}

pub struct PlaylistGenerator {
    config: EngineConfig,
    classifier: Arc<dyn MoodClassifier>,
    catalog: Arc<dyn TrackCatalogProvider>,
}

impl PlaylistGenerator {
    pub fn new(
        config: EngineConfig,
        classifier: Arc<dyn MoodClassifier>,
        catalog: Arc<dyn TrackCatalogProvider>,
    ) -> Self {
        Self {
            config,
            classifier,
            catalog,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedPlaylist> {
        let detected_mood = self.classifier.classify(&request.text).await?;
        let target_mood = request.behavior.target_for(detected_mood);
        info!(
            detected = %detected_mood,
            target = %target_mood,
            behavior = request.behavior.short_label(),
            "Resolved target mood"
        );

        let records = self.catalog.fetch_candidates().await?;
        let pool = CandidatePool::from_records(records);

        let size = request.size.unwrap_or(self.config.default_playlist_size);
        let playlist = build_playlist(&pool, target_mood, size, request.seed, &self.config)?;

        let tracks = playlist
            .track_ids()
            .iter()
            .filter_map(|id| pool.get(id).cloned())
            .collect();

        info!(
            pool_size = pool.len(),
            playlist_size = playlist.len(),
            "Generated playlist"
        );

        Ok(GeneratedPlaylist {
            detected_mood,
            target_mood,
            behavior: request.behavior,
            playlist,
            tracks,
        })
    }
}
