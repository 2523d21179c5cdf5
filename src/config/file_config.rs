use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Scoring
    pub weight_genre: Option<f64>,
    pub weight_popularity: Option<f64>,
    /// "fixed" or "pool_max"
    pub popularity_scale: Option<String>,

    // Playlist
    pub default_playlist_size: Option<i64>,
    pub candidate_limit: Option<usize>,

    /// Mood label -> genre keywords. Replaces the built-in keywords of
    /// each listed mood.
    pub genre_profile: Option<HashMap<String, Vec<String>>>,

    pub classifier: Option<ClassifierConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ClassifierConfig {
    /// "keyword", "ollama" or "openai"
    pub kind: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_sec: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
