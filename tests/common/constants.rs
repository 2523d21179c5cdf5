//! Ids of the fixture tracks.

/// pop, dance; popularity 80. Present in top and saved.
pub const TRACK_A: &str = "A";
/// metal; popularity 20.
pub const TRACK_B: &str = "B";
/// jazz; popularity 50. Saved only.
pub const TRACK_C: &str = "C";
/// sad; popularity 30. Recent only, wrapped as a play history item.
pub const TRACK_D: &str = "D";
/// Local file, never a candidate.
pub const TRACK_LOCAL: &str = "L";

pub const SEED: u64 = 42;
