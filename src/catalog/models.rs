//! Normalized track model shared by scoring, sampling and assembly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Upper bound of the popularity scale.
pub const MAX_POPULARITY: f64 = 100.0;

/// Where a candidate track came from.
///
/// Variant order is the dedup precedence: when the same track shows up in
/// several buckets, the earliest bucket wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceBucket {
    /// The listener's top tracks.
    Top,
    /// Recently played.
    Recent,
    /// Saved to the library.
    Saved,
}

impl SourceBucket {
    pub const ALL: [SourceBucket; 3] = [SourceBucket::Top, SourceBucket::Recent, SourceBucket::Saved];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceBucket::Top => "top",
            SourceBucket::Recent => "recent",
            SourceBucket::Saved => "saved",
        }
    }
}

impl fmt::Display for SourceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate song, normalized from a raw catalog record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub id: String,
    /// Lowercased genre tokens. May be empty.
    pub genres: BTreeSet<String>,
    /// Clamped to `0.0..=MAX_POPULARITY`.
    pub popularity: f64,
    pub source_bucket: SourceBucket,
    pub name: Option<String>,
    pub artists: Vec<String>,
    pub uri: Option<String>,
    pub preview_url: Option<String>,
    /// Local files cannot be added to a remote playlist.
    pub is_local: bool,
}

impl Track {
    /// Minimal valid track: no genres, zero popularity.
    pub fn new(id: impl Into<String>, source_bucket: SourceBucket) -> Self {
        Self {
            id: id.into(),
            genres: BTreeSet::new(),
            popularity: 0.0,
            source_bucket,
            name: None,
            artists: Vec::new(),
            uri: None,
            preview_url: None,
            is_local: false,
        }
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.genres = genres
            .into_iter()
            .map(|g| g.as_ref().trim().to_lowercase())
            .filter(|g| !g.is_empty())
            .collect();
        self
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = clamp_popularity(popularity);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn summary(&self) -> TrackSummary {
        TrackSummary {
            id: self.id.clone(),
            name: self.name.clone().unwrap_or_default(),
            artists: self.artists.join(", "),
            uri: self.uri.clone(),
            preview_url: self.preview_url.clone(),
            popularity: self.popularity,
        }
    }
}

/// Presentation view of a track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    /// Comma-separated artist names.
    pub artists: String,
    pub uri: Option<String>,
    pub preview_url: Option<String>,
    pub popularity: f64,
}

impl fmt::Display for TrackSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() { &self.id } else { &self.name };
        if self.artists.is_empty() {
            write!(f, "{}", name)
        } else {
            write!(f, "{} - {}", name, self.artists)
        }
    }
}

pub(crate) fn clamp_popularity(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, MAX_POPULARITY)
    } else {
        0.0
    }
}
