//! Mood relevance scoring.
//!
//! A track's score is a weighted sum of how many of its genres are keywords
//! of the target mood and its normalized popularity:
//!
//! ```text
//! score = weight_genre * genre_match + weight_popularity * popularity / scale
//! ```
//!
//! `genre_match` is a plain count, so a track with more matching genres
//! never scores below one with fewer at equal popularity. Tracks with no
//! matching genre still score through popularity, so a strict genre filter
//! never empties the pool.

use crate::catalog::{Track, MAX_POPULARITY};
use crate::error::{MoodifyError, Result};
use crate::mood::{GenreProfile, Mood};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Relative weight of genre relevance and popularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub genre: f64,
    pub popularity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            genre: 10.0,
            popularity: 1.0,
        }
    }
}

impl ScoringWeights {
    /// Weights must be finite, non-negative and not both zero.
    pub fn new(genre: f64, popularity: f64) -> Result<Self> {
        let weights = Self { genre, popularity };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("genre", self.genre), ("popularity", self.popularity)] {
            if !value.is_finite() || value < 0.0 {
                return Err(MoodifyError::InvalidWeights(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.genre == 0.0 && self.popularity == 0.0 {
            return Err(MoodifyError::InvalidWeights(
                "at least one weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// How popularity is brought into `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopularityScale {
    /// Divide by the fixed maximum of the popularity range (100).
    #[default]
    Fixed,
    /// Divide by the most popular track of the pool.
    PoolMax,
}

impl PopularityScale {
    /// Divisor to apply for `tracks`. Zero means popularity contributes
    /// nothing.
    fn divisor(&self, tracks: &[Track]) -> f64 {
        match self {
            PopularityScale::Fixed => MAX_POPULARITY,
            PopularityScale::PoolMax => tracks.iter().map(|t| t.popularity).fold(0.0, f64::max),
        }
    }
}

/// A track paired with its relevance score for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredTrack<'a> {
    pub track: &'a Track,
    /// Always `>= 0`.
    pub score: f64,
}

/// Score one track against `target_mood` on the fixed popularity scale.
pub fn score(
    track: &Track,
    target_mood: Mood,
    profile: &GenreProfile,
    weights: &ScoringWeights,
) -> Result<f64> {
    score_with_divisor(track, target_mood, profile, weights, MAX_POPULARITY)
}

/// Score one track against a mood given as a raw label.
///
/// Fails with [`MoodifyError::UnknownMood`] when the label is not one of the
/// supported moods.
pub fn score_label(
    track: &Track,
    target_mood: &str,
    profile: &GenreProfile,
    weights: &ScoringWeights,
) -> Result<f64> {
    let mood: Mood = target_mood.parse()?;
    score(track, mood, profile, weights)
}

/// Score every track of a pool.
pub fn score_tracks<'a>(
    tracks: &'a [Track],
    target_mood: Mood,
    profile: &GenreProfile,
    weights: &ScoringWeights,
    scale: PopularityScale,
) -> Result<Vec<ScoredTrack<'a>>> {
    let divisor = scale.divisor(tracks);
    let scored = tracks
        .iter()
        .map(|track| {
            score_with_divisor(track, target_mood, profile, weights, divisor)
                .map(|score| ScoredTrack { track, score })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        mood = %target_mood,
        track_count = scored.len(),
        top_score = scored.iter().map(|s| s.score).fold(0.0, f64::max),
        "Scored candidate tracks"
    );

    Ok(scored)
}

fn score_with_divisor(
    track: &Track,
    target_mood: Mood,
    profile: &GenreProfile,
    weights: &ScoringWeights,
    divisor: f64,
) -> Result<f64> {
    let genre_match = profile.match_count(target_mood, &track.genres)? as f64;
    let popularity = if divisor > 0.0 {
        (track.popularity / divisor).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let score = weights.genre * genre_match + weights.popularity * popularity;
    Ok(score.max(0.0))
}
