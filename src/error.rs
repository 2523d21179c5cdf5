//! Error types for the playlist engine and its collaborators.

use thiserror::Error;

/// Errors surfaced by the playlist engine.
///
/// Degenerate inputs (an empty candidate pool, all-zero scores) are not
/// errors: the engine degrades to an empty or uniformly-weighted result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MoodifyError {
    /// A mood label outside the closed enumeration.
    #[error("Unknown mood: {0}")]
    UnknownMood(String),

    #[error("Invalid sample size: {0} (must be non-negative)")]
    InvalidSampleSize(i64),

    #[error("Invalid genre profile: {0}")]
    InvalidGenreProfile(String),

    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, MoodifyError>;
