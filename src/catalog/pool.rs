use super::models::{SourceBucket, Track};
use super::normalizer::normalize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Normalized, deduplicated candidate tracks for one request.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    tracks: Vec<Track>,
}

impl CandidatePool {
    /// Normalize raw records and keep the usable ones.
    ///
    /// Records without an id and local files are dropped. When an id
    /// appears in more than one bucket, the record from the bucket with
    /// the highest precedence (top, then recent, then saved) is kept;
    /// within a bucket the first record wins.
    pub fn from_records(records: impl IntoIterator<Item = (Value, SourceBucket)>) -> Self {
        let tracks = records
            .into_iter()
            .map(|(raw, bucket)| normalize(&raw, bucket))
            .collect();
        Self::from_tracks(tracks)
    }

    /// Same filtering and dedup as [`CandidatePool::from_records`], for
    /// already normalized tracks.
    pub fn from_tracks(mut tracks: Vec<Track>) -> Self {
        let total = tracks.len();

        // Stable: keeps provider order inside each bucket.
        tracks.sort_by_key(|t| t.source_bucket);

        let mut seen = HashSet::new();
        let mut skipped_unusable = 0usize;
        let mut skipped_duplicates = 0usize;
        tracks.retain(|t| {
            if t.id.is_empty() || t.is_local {
                skipped_unusable += 1;
                return false;
            }
            if !seen.insert(t.id.clone()) {
                skipped_duplicates += 1;
                return false;
            }
            true
        });

        debug!(
            total,
            kept = tracks.len(),
            skipped_unusable,
            skipped_duplicates,
            "Built candidate pool"
        );

        Self { tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
