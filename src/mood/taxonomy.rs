use super::Mood;
use crate::error::{MoodifyError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Mapping from each mood to the genre keywords that express it.
///
/// Keywords are stored lowercased and trimmed, so lookups are
/// case-insensitive. Every mood always has at least one keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreProfile {
    keywords: BTreeMap<Mood, BTreeSet<String>>,
}

impl Default for GenreProfile {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GenreProfile {
    /// Build a profile from an explicit table. Fails if a mood is missing
    /// or has no usable keyword.
    pub fn new<I, S>(table: impl IntoIterator<Item = (Mood, I)>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords = BTreeMap::new();
        for (mood, words) in table {
            let set: BTreeSet<String> = words
                .into_iter()
                .filter_map(|w| normalize_keyword(w.as_ref()))
                .collect();
            keywords.insert(mood, set);
        }
        let profile = Self { keywords };
        profile.validate()?;
        Ok(profile)
    }

    /// Default table, grouped from common streaming-service genre names.
    pub fn builtin() -> Self {
        let table: [(Mood, &[&str]); 6] = [
            (
                Mood::Happy,
                &[
                    "pop",
                    "dance",
                    "edm",
                    "folk",
                    "country",
                    "alternative rock",
                    "latin",
                ],
            ),
            (Mood::Sad, &["sad", "melancholy"]),
            (
                Mood::Relaxed,
                &[
                    "jazz",
                    "blues",
                    "classical",
                    "ambient",
                    "r&b",
                    "reggae",
                    "lo-fi",
                    "soul",
                ],
            ),
            (Mood::Anxious, &["hip hop"]),
            (Mood::Angry, &["rock", "metal", "punk", "rap", "grunge"]),
            (
                Mood::Neutral,
                &["indie", "singer-songwriter", "soft rock", "acoustic"],
            ),
        ];

        let keywords = table
            .into_iter()
            .map(|(mood, words)| {
                let set = words.iter().map(|w| w.to_string()).collect();
                (mood, set)
            })
            .collect();
        Self { keywords }
    }

    /// Replace the keywords of selected moods, keyed by mood label.
    ///
    /// Unknown labels fail with [`MoodifyError::UnknownMood`]; an override
    /// with no usable keyword fails with
    /// [`MoodifyError::InvalidGenreProfile`].
    pub fn with_overrides(mut self, overrides: &HashMap<String, Vec<String>>) -> Result<Self> {
        for (label, words) in overrides {
            let mood: Mood = label.parse()?;
            let set: BTreeSet<String> = words.iter().filter_map(|w| normalize_keyword(w)).collect();
            if set.is_empty() {
                return Err(MoodifyError::InvalidGenreProfile(format!(
                    "mood '{}' has no keywords",
                    mood
                )));
            }
            self.keywords.insert(mood, set);
        }
        Ok(self)
    }

    /// Keywords associated with `mood`.
    pub fn keywords_for(&self, mood: Mood) -> Result<&BTreeSet<String>> {
        self.keywords
            .get(&mood)
            .ok_or_else(|| MoodifyError::UnknownMood(mood.to_string()))
    }

    /// Keywords for a mood given as a raw label.
    pub fn keywords_for_label(&self, label: &str) -> Result<&BTreeSet<String>> {
        let mood: Mood = label.parse()?;
        self.keywords_for(mood)
    }

    /// Number of `genres` that are keywords of `mood`.
    pub fn match_count<'a>(
        &self,
        mood: Mood,
        genres: impl IntoIterator<Item = &'a String>,
    ) -> Result<usize> {
        let keywords = self.keywords_for(mood)?;
        Ok(genres
            .into_iter()
            .filter(|g| keywords.contains(g.as_str()))
            .count())
    }

    fn validate(&self) -> Result<()> {
        for mood in Mood::ALL {
            match self.keywords.get(&mood) {
                Some(set) if !set.is_empty() => {}
                Some(_) => {
                    return Err(MoodifyError::InvalidGenreProfile(format!(
                        "mood '{}' has no keywords",
                        mood
                    )))
                }
                None => {
                    return Err(MoodifyError::InvalidGenreProfile(format!(
                        "mood '{}' is missing",
                        mood
                    )))
                }
            }
        }
        Ok(())
    }
}

/// Lowercase and trim a genre token, dropping blanks.
pub(crate) fn normalize_keyword(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}
