//! Lexicon-based mood classifier.
//!
//! Counts cue words for each mood in the input. Needs no model, so it is
//! the default classifier and the deterministic stand-in for tests.

use super::MoodClassifier;
use crate::error::Result;
use crate::mood::{Mood, MoodDistribution};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

const HAPPY_CUES: &[&str] = &[
    "happy", "glad", "joy", "joyful", "great", "excited", "cheerful", "awesome", "wonderful",
    "fantastic", "good", "love", "delighted", "thrilled", "amazing", "celebrate", "sunny",
];
const SAD_CUES: &[&str] = &[
    "sad", "down", "unhappy", "depressed", "lonely", "cry", "crying", "heartbroken", "miserable",
    "blue", "grief", "upset", "gloomy", "hopeless",
];
const RELAXED_CUES: &[&str] = &[
    "relaxed", "calm", "chill", "peaceful", "relaxing", "mellow", "serene", "rest", "lazy",
    "cozy", "content",
];
const ANXIOUS_CUES: &[&str] = &[
    "anxious", "nervous", "worried", "stressed", "stress", "panic", "scared", "afraid", "tense",
    "overwhelmed", "fear", "uneasy",
];
const ANGRY_CUES: &[&str] = &[
    "angry", "mad", "furious", "annoyed", "irritated", "rage", "pissed", "frustrated", "hate",
];
const NEUTRAL_CUES: &[&str] = &["okay", "ok", "fine", "normal", "meh", "whatever"];

/// Classifier picking the mood with the most cue words.
///
/// Input without cues, or with a tie for the top count, is neutral.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    cues: HashMap<&'static str, Mood>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordClassifier {
    pub fn new() -> Self {
        let table: [(Mood, &[&'static str]); 6] = [
            (Mood::Happy, HAPPY_CUES),
            (Mood::Sad, SAD_CUES),
            (Mood::Relaxed, RELAXED_CUES),
            (Mood::Anxious, ANXIOUS_CUES),
            (Mood::Angry, ANGRY_CUES),
            (Mood::Neutral, NEUTRAL_CUES),
        ];

        let cues = table
            .into_iter()
            .flat_map(|(mood, words)| words.iter().map(move |w| (*w, mood)))
            .collect();
        Self { cues }
    }

    /// Synchronous core of [`MoodClassifier::classify`].
    pub fn detect(&self, text: &str) -> Mood {
        let lowered = text.to_lowercase();
        let mut counts: HashMap<Mood, usize> = HashMap::new();

        for token in lowered.split(|c: char| !c.is_alphanumeric() && c != '\'') {
            if let Some(mood) = self.cues.get(token.trim_matches('\'')) {
                *counts.entry(*mood).or_insert(0) += 1;
            }
        }

        let distribution = MoodDistribution::from_labelled_scores(
            counts.iter().map(|(mood, count)| (mood.as_str(), *count as f64)),
        );
        let (top, share) = distribution.top();
        let tied = Mood::ALL
            .into_iter()
            .any(|m| m != top && distribution.score(m) == share);

        let mood = if share > 0.0 && !tied { top } else { Mood::Neutral };
        debug!(
            mood = %mood,
            share,
            cue_hits = counts.values().sum::<usize>(),
            "Keyword classification"
        );
        mood
    }
}

#[async_trait]
impl MoodClassifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<Mood> {
        Ok(self.detect(text))
    }
}
