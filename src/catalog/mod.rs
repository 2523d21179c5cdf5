//! Candidate tracks: raw catalog records, normalization and the pool.

mod models;
mod normalizer;
mod pool;
mod provider;

pub use models::{SourceBucket, Track, TrackSummary, MAX_POPULARITY};
pub use normalizer::normalize;
pub use pool::CandidatePool;
pub use provider::{InMemoryCatalog, JsonFileCatalog, TrackCatalogProvider, DEFAULT_CANDIDATE_LIMIT};

#[cfg(feature = "mock")]
pub use provider::MockTrackCatalogProvider;
