//! Mood enumeration and the mood-to-genre taxonomy.

mod emotion;
mod taxonomy;

pub use emotion::{map_emotion_label, MoodDistribution};
pub use taxonomy::GenreProfile;

use crate::error::MoodifyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six supported moods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Relaxed,
    Anxious,
    Angry,
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Relaxed,
        Mood::Anxious,
        Mood::Angry,
        Mood::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Relaxed => "relaxed",
            Mood::Anxious => "anxious",
            Mood::Angry => "angry",
            Mood::Neutral => "neutral",
        }
    }

    /// Target mood used when the listener asks to change how they feel.
    ///
    /// Negative moods lift to happy, happy settles to relaxed, relaxed and
    /// neutral move to happy.
    pub fn opposite(&self) -> Mood {
        match self {
            Mood::Sad | Mood::Angry | Mood::Anxious => Mood::Happy,
            Mood::Happy => Mood::Relaxed,
            Mood::Relaxed => Mood::Happy,
            Mood::Neutral => Mood::Happy,
        }
    }
}

/// Free-function form of [`Mood::opposite`].
pub fn opposite_of(mood: Mood) -> Mood {
    mood.opposite()
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = MoodifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == label)
            .ok_or_else(|| MoodifyError::UnknownMood(s.to_string()))
    }
}

/// Whether the playlist should match the detected mood or steer away from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    #[default]
    MatchMood,
    ChangeMood,
}

impl Behavior {
    /// Mood the playlist is scored against.
    pub fn target_for(&self, detected: Mood) -> Mood {
        match self {
            Behavior::MatchMood => detected,
            Behavior::ChangeMood => detected.opposite(),
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Behavior::MatchMood => "Match",
            Behavior::ChangeMood => "Change",
        }
    }
}
