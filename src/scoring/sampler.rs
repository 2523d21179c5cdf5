//! Weighted sampling without replacement.
//!
//! Each draw picks one remaining track with probability proportional to its
//! score, removes it, and renormalizes over what is left. Higher scores are
//! favoured without collapsing into a fixed top-N ranking.

use super::scorer::ScoredTrack;
use crate::error::MoodifyError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Validated number of tracks to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SampleSize(usize);

impl SampleSize {
    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for SampleSize {
    type Error = MoodifyError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        usize::try_from(n)
            .map(SampleSize)
            .map_err(|_| MoodifyError::InvalidSampleSize(n))
    }
}

impl From<SampleSize> for usize {
    fn from(size: SampleSize) -> usize {
        size.0
    }
}

/// Draw up to `n` track ids.
///
/// With a seed the result is fully reproducible for the same pool and `n`;
/// without one the generator is seeded from OS entropy.
///
/// Only tracks with a positive score can be drawn, so the result holds
/// `min(n, positive-score tracks)` ids. If no track has a positive score,
/// every track gets the same weight and the result holds `min(n, pool size)`
/// ids. An empty pool yields an empty result.
pub fn sample(scored: &[ScoredTrack<'_>], n: usize, seed: Option<u64>) -> Vec<String> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    sample_with_rng(scored, n, &mut rng)
}

/// [`sample`] with a caller-supplied generator.
pub fn sample_with_rng<R: Rng + ?Sized>(
    scored: &[ScoredTrack<'_>],
    n: usize,
    rng: &mut R,
) -> Vec<String> {
    if scored.is_empty() || n == 0 {
        return Vec::new();
    }

    let mut remaining: Vec<(&str, f64)> = scored
        .iter()
        .filter(|s| s.score > 0.0)
        .map(|s| (s.track.id.as_str(), s.score))
        .collect();

    let uniform = remaining.is_empty();
    if uniform {
        remaining = scored.iter().map(|s| (s.track.id.as_str(), 1.0)).collect();
    }

    let draws = n.min(remaining.len());
    let mut picked = Vec::with_capacity(draws);

    for _ in 0..draws {
        let index = draw_index(&remaining, rng);
        let (id, _) = remaining.remove(index);
        picked.push(id.to_string());
    }

    debug!(
        requested = n,
        drawn = picked.len(),
        pool = scored.len(),
        uniform,
        "Sampled tracks"
    );

    picked
}

/// Pick an index with probability proportional to its weight.
///
/// `weights` is non-empty and every weight is positive. Weights are scaled
/// by the largest one so their sum stays finite. Infinite weights dominate:
/// while any remain, one of them is drawn uniformly.
fn draw_index<R: Rng + ?Sized>(weights: &[(&str, f64)], rng: &mut R) -> usize {
    let infinite: Vec<usize> = weights
        .iter()
        .enumerate()
        .filter(|(_, (_, w))| w.is_infinite())
        .map(|(index, _)| index)
        .collect();
    if !infinite.is_empty() {
        return infinite[rng.random_range(0..infinite.len())];
    }

    let largest = weights.iter().map(|(_, w)| *w).fold(0.0, f64::max);
    let total: f64 = weights.iter().map(|(_, w)| w / largest).sum();
    let target = rng.random::<f64>() * total;

    let mut cumulative = 0.0;
    for (index, (_, weight)) in weights.iter().enumerate() {
        cumulative += weight / largest;
        if target < cumulative {
            return index;
        }
    }
    // Rounding can leave target at or just above the final sum.
    weights.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SourceBucket, Track};
    use std::collections::{HashMap, HashSet};

    fn tracks(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track::new(format!("t{}", i), SourceBucket::Top))
            .collect()
    }

    fn scored<'a>(tracks: &'a [Track], scores: &[f64]) -> Vec<ScoredTrack<'a>> {
        tracks
            .iter()
            .zip(scores)
            .map(|(track, score)| ScoredTrack {
                track,
                score: *score,
            })
            .collect()
    }

    #[test]
    fn test_sample_size_from_i64() {
        assert_eq!(SampleSize::try_from(0).unwrap().get(), 0);
        assert_eq!(SampleSize::try_from(25).unwrap().get(), 25);
        assert_eq!(
            SampleSize::try_from(-1).unwrap_err(),
            MoodifyError::InvalidSampleSize(-1)
        );
    }

    #[test]
    fn test_empty_pool() {
        assert!(sample(&[], 10, None).is_empty());
        assert!(sample(&[], 10, Some(42)).is_empty());
    }

    #[test]
    fn test_zero_draws() {
        let pool = tracks(3);
        let s = scored(&pool, &[1.0, 2.0, 3.0]);
        assert!(sample(&s, 0, Some(1)).is_empty());
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let pool = tracks(20);
        let scores: Vec<f64> = (0..20).map(|i| (i % 5) as f64 + 0.5).collect();
        let s = scored(&pool, &scores);

        let first = sample(&s, 8, Some(42));
        let second = sample(&s, 8, Some(42));
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
    }

    #[test]
    fn test_different_seeds_vary() {
        let pool = tracks(30);
        let s = scored(&pool, &[1.0; 30]);

        let outputs: HashSet<Vec<String>> = (0..10u64).map(|seed| sample(&s, 5, Some(seed))).collect();
        assert!(outputs.len() > 1);
    }

    #[test]
    fn test_no_duplicates_and_bounded_length() {
        let pool = tracks(10);
        let s = scored(&pool, &[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0]);

        for n in [1, 5, 10, 50] {
            let picked = sample(&s, n, Some(7));
            let unique: HashSet<&String> = picked.iter().collect();
            assert_eq!(unique.len(), picked.len());
            assert!(picked.len() <= n);
            assert!(picked.len() <= pool.len());
        }
    }

    #[test]
    fn test_zero_scores_are_never_drawn() {
        let pool = tracks(4);
        let s = scored(&pool, &[0.0, 2.0, 0.0, 1.0]);

        for seed in 0..20 {
            let picked = sample(&s, 10, Some(seed));
            assert_eq!(picked.len(), 2);
            assert!(picked.contains(&"t1".to_string()));
            assert!(picked.contains(&"t3".to_string()));
        }
    }

    #[test]
    fn test_all_zero_scores_fall_back_to_uniform() {
        let pool = tracks(5);
        let s = scored(&pool, &[0.0; 5]);

        let picked = sample(&s, 3, Some(9));
        assert_eq!(picked.len(), 3);
        assert_eq!(sample(&s, 10, Some(9)).len(), 5);
    }

    #[test]
    fn test_dominant_weight_is_drawn_first() {
        let pool = tracks(3);
        let s = scored(&pool, &[20.8, 0.2, 0.5]);

        let first_a = (0..200u64)
            .filter(|seed| sample(&s, 2, Some(*seed))[0] == "t0")
            .count();
        // P(first = t0) = 20.8 / 21.5, roughly 0.967
        assert!(first_a > 170, "t0 drawn first only {} times", first_a);
    }

    #[test]
    fn test_second_draw_renormalizes_over_remaining() {
        let pool = tracks(3);
        let s = scored(&pool, &[20.8, 0.2, 0.5]);

        let mut second_t1 = 0;
        let mut second_t2 = 0;
        for seed in 0..2000u64 {
            let picked = sample(&s, 2, Some(seed));
            if picked[0] != "t0" {
                continue;
            }
            match picked[1].as_str() {
                "t1" => second_t1 += 1,
                "t2" => second_t2 += 1,
                other => panic!("unexpected second pick {}", other),
            }
        }
        // After t0 is removed the remaining weights are 0.2 : 0.5
        let share_t2 = second_t2 as f64 / (second_t1 + second_t2) as f64;
        assert!(
            (0.62..0.80).contains(&share_t2),
            "t2 share of second picks was {}",
            share_t2
        );
    }

    #[test]
    fn test_huge_scores_keep_proportional_draws() {
        let pool = tracks(3);
        // Finite scores whose sum overflows f64
        let s = scored(&pool, &[1e308, 1e308, 1e308]);

        let mut counts: HashMap<String, usize> = HashMap::new();
        for seed in 0..300u64 {
            let picked = sample(&s, 1, Some(seed));
            *counts.entry(picked[0].clone()).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 3);
        for (id, count) in &counts {
            assert!(*count > 60, "{} drawn only {} times", id, count);
        }
    }

    #[test]
    fn test_infinite_score_is_drawn_first() {
        let pool = tracks(2);
        let s = scored(&pool, &[1e308, f64::INFINITY]);

        for seed in 0..20 {
            assert_eq!(sample(&s, 2, Some(seed)), vec!["t1".to_string(), "t0".to_string()]);
        }
    }

    #[test]
    fn test_draw_index_fallback_on_rounding() {
        struct MaxRng;
        impl rand::RngCore for MaxRng {
            fn next_u32(&mut self) -> u32 {
                u32::MAX
            }
            fn next_u64(&mut self) -> u64 {
                u64::MAX
            }
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                dest.fill(0xff);
            }
        }

        let weights = [("a", 0.1), ("b", 0.2), ("c", 0.3)];
        let index = draw_index(&weights, &mut MaxRng);
        assert_eq!(index, 2);
    }
}
