use super::constants::*;
use async_trait::async_trait;
use moodify::catalog::{InMemoryCatalog, SourceBucket};
use moodify::classifier::MoodClassifier;
use moodify::config::EngineConfig;
use moodify::generator::PlaylistGenerator;
use moodify::mood::Mood;
use moodify::Result;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Classifier answering the same mood for any text.
pub struct StubClassifier(pub Mood);

#[async_trait]
impl MoodClassifier for StubClassifier {
    async fn classify(&self, _text: &str) -> Result<Mood> {
        Ok(self.0)
    }
}

/// Raw records for the three buckets, shaped like the music service exports.
pub fn fixture_records() -> Vec<(Value, SourceBucket)> {
    vec![
        (
            json!({
                "id": TRACK_A,
                "name": "Sunshine",
                "artists": [{"name": "The Brights", "genres": ["pop"]}],
                "genres": ["Dance"],
                "popularity": 80,
                "uri": "spotify:track:4uLU6hMCjMI75M1A2tKUQC"
            }),
            SourceBucket::Top,
        ),
        (
            json!({"id": TRACK_B, "name": "Iron", "genres": ["metal"], "popularity": 20}),
            SourceBucket::Top,
        ),
        (
            json!({"track": {"id": TRACK_D, "name": "Rain", "genres": ["sad"], "popularity": 30}}),
            SourceBucket::Recent,
        ),
        (
            json!({"id": TRACK_LOCAL, "genres": ["pop"], "popularity": 100, "is_local": true}),
            SourceBucket::Recent,
        ),
        (
            json!({"track": {"id": TRACK_A, "genres": ["metal"], "popularity": 5}}),
            SourceBucket::Saved,
        ),
        (
            json!({"track": {"id": TRACK_C, "name": "Blue Note", "genres": ["jazz"], "popularity": 50}}),
            SourceBucket::Saved,
        ),
    ]
}

pub fn fixture_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(fixture_records())
}

pub fn generator_for(mood: Mood) -> PlaylistGenerator {
    PlaylistGenerator::new(
        EngineConfig::default(),
        Arc::new(StubClassifier(mood)),
        Arc::new(fixture_catalog()),
    )
}

/// Writes the fixture records as a `{top, recent, saved}` export.
/// Returns (temp_dir, catalog_path)
pub fn write_catalog_file() -> anyhow::Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let mut export = json!({"top": [], "recent": {"items": []}, "saved": {"items": []}});
    for (record, bucket) in fixture_records() {
        let target = match bucket {
            SourceBucket::Top => export["top"].as_array_mut(),
            SourceBucket::Recent => export["recent"]["items"].as_array_mut(),
            SourceBucket::Saved => export["saved"]["items"].as_array_mut(),
        };
        if let Some(items) = target {
            items.push(record);
        }
    }
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, serde_json::to_string_pretty(&export)?)?;
    Ok((dir, path))
}
