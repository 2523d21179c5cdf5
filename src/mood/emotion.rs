//! Folding free-form emotion labels into the mood enumeration.
//!
//! Emotion models and LLMs answer with their own vocabulary ("joy",
//! "fear", "anger/annoyance", ...). These helpers map such labels onto
//! [`Mood`] and turn a labelled score list into a normalized distribution.

use super::Mood;
use serde::Serialize;
use std::collections::BTreeMap;

/// Map an emotion label onto a mood. Labels that already name a mood map
/// to themselves. Returns `None` for anything else.
pub fn map_emotion_label(label: &str) -> Option<Mood> {
    let label = label.trim().to_lowercase();
    let mood = match label.as_str() {
        "joy" | "happiness" | "love" | "surprise" => Mood::Happy,
        "sadness" => Mood::Sad,
        "anger" | "anger/annoyance" => Mood::Angry,
        "fear" | "anxiety" => Mood::Anxious,
        "relief" | "calm" => Mood::Relaxed,
        other => return other.parse().ok(),
    };
    Some(mood)
}

/// Probability of each mood, summing to 1 unless every input was unmapped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodDistribution {
    scores: BTreeMap<Mood, f64>,
}

impl MoodDistribution {
    /// Accumulate `(label, score)` pairs into moods and normalize.
    ///
    /// Unmapped labels and non-finite or negative scores are ignored.
    pub fn from_labelled_scores<'a>(entries: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut scores: BTreeMap<Mood, f64> = Mood::ALL.iter().map(|m| (*m, 0.0)).collect();

        for (label, score) in entries {
            if !score.is_finite() || score < 0.0 {
                continue;
            }
            if let Some(mood) = map_emotion_label(label) {
                *scores.entry(mood).or_insert(0.0) += score;
            }
        }

        let total: f64 = scores.values().sum();
        if total > 0.0 {
            for value in scores.values_mut() {
                *value /= total;
            }
        }

        Self { scores }
    }

    pub fn score(&self, mood: Mood) -> f64 {
        self.scores.get(&mood).copied().unwrap_or(0.0)
    }

    /// Highest-probability mood. Ties resolve in [`Mood::ALL`] order and an
    /// all-zero distribution resolves to neutral.
    pub fn top(&self) -> (Mood, f64) {
        let mut best = (Mood::Neutral, 0.0);
        for mood in Mood::ALL {
            let score = self.score(mood);
            if score > best.1 {
                best = (mood, score);
            }
        }
        best
    }
}
