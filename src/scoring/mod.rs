//! Track scoring and weighted sampling.

mod sampler;
mod scorer;

pub use sampler::{sample, sample_with_rng, SampleSize};
pub use scorer::{score, score_label, score_tracks, PopularityScale, ScoredTrack, ScoringWeights};
