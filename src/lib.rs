//! Moodify Library
//!
//! Mood-based playlist scoring and sampling. The modules are exposed for
//! the `moodify` binary, integration tests and reuse.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod generator;
pub mod mood;
pub mod playlist;
pub mod scoring;

// Re-export commonly used types for convenience
pub use catalog::{CandidatePool, SourceBucket, Track, TrackCatalogProvider};
pub use classifier::MoodClassifier;
pub use config::{AppConfig, EngineConfig};
pub use error::{MoodifyError, Result};
pub use generator::{build_playlist, GeneratedPlaylist, GenerationRequest, PlaylistGenerator};
pub use mood::{opposite_of, Behavior, GenreProfile, Mood};
pub use playlist::{assemble, Playlist};
pub use scoring::{sample, score, ScoringWeights};
