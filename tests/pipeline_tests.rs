//! End-to-end tests for the playlist pipeline
//!
//! Catalog records -> pool -> score -> sample -> assemble, through the
//! public library API.

mod common;

use common::*;
use moodify::catalog::{CandidatePool, JsonFileCatalog, SourceBucket};
use moodify::config::{AppConfig, CliConfig, EngineConfig, FileConfig};
use moodify::generator::{build_playlist, GenerationRequest, PlaylistGenerator};
use moodify::mood::{Behavior, Mood};
use moodify::playlist::{persist_playlist, JsonFilePlaylistSink, PlaylistDraft, StoredPlaylist};
use moodify::scoring::{score_label, ScoringWeights};
use moodify::MoodifyError;
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;

fn fixture_pool() -> CandidatePool {
    CandidatePool::from_records(fixture_records())
}

fn genre_only_config() -> EngineConfig {
    EngineConfig {
        weights: ScoringWeights::new(1.0, 0.0).unwrap(),
        ..EngineConfig::default()
    }
}

#[test]
fn test_pool_filters_and_dedups_by_bucket() {
    let pool = fixture_pool();

    let ids: HashSet<&str> = pool.tracks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, HashSet::from([TRACK_A, TRACK_B, TRACK_C, TRACK_D]));

    // The top record wins over the saved duplicate
    let a = pool.get(TRACK_A).unwrap();
    assert_eq!(a.source_bucket, SourceBucket::Top);
    assert!(a.genres.contains("pop"));
    assert!(a.genres.contains("dance"));
    assert!(!a.genres.contains("metal"));
    assert_eq!(a.popularity, 80.0);

    let d = pool.get(TRACK_D).unwrap();
    assert_eq!(d.source_bucket, SourceBucket::Recent);
    assert!(pool.get(TRACK_LOCAL).is_none());
}

#[test]
fn test_same_seed_same_playlist() {
    let pool = fixture_pool();
    let config = EngineConfig::default();

    let first = build_playlist(&pool, Mood::Happy, 3, Some(SEED), &config).unwrap();
    let second = build_playlist(&pool, Mood::Happy, 3, Some(SEED), &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    let unique: HashSet<&String> = first.track_ids().iter().collect();
    assert_eq!(unique.len(), 3);
}

#[test]
fn test_different_seeds_vary() {
    let pool = fixture_pool();
    let config = EngineConfig::default();

    let playlists: HashSet<Vec<String>> = (1..=30)
        .map(|seed| {
            build_playlist(&pool, Mood::Happy, 4, Some(seed), &config)
                .unwrap()
                .track_ids()
                .to_vec()
        })
        .collect();
    assert!(playlists.len() > 1);
}

#[test]
fn test_only_positive_scores_are_drawn() {
    let pool = fixture_pool();
    let playlist = build_playlist(&pool, Mood::Happy, 3, Some(SEED), &genre_only_config()).unwrap();

    assert_eq!(playlist.track_ids(), [TRACK_A.to_string()]);
}

#[test]
fn test_all_zero_scores_fall_back_to_uniform() {
    let pool = fixture_pool();
    // No fixture track carries a hip hop genre
    let playlist =
        build_playlist(&pool, Mood::Anxious, 10, Some(SEED), &genre_only_config()).unwrap();

    assert_eq!(playlist.len(), pool.len());
}

#[test]
fn test_empty_pool_yields_empty_playlist() {
    let pool = CandidatePool::from_records(Vec::new());
    let playlist =
        build_playlist(&pool, Mood::Happy, 10, Some(SEED), &EngineConfig::default()).unwrap();
    assert!(playlist.is_empty());
}

#[test]
fn test_unknown_mood_label_is_rejected() {
    let pool = fixture_pool();
    let config = EngineConfig::default();
    let track = pool.get(TRACK_A).unwrap();

    let err = score_label(track, "ecstatic", &config.genre_profile, &config.weights).unwrap_err();
    assert_eq!(err, MoodifyError::UnknownMood("ecstatic".to_string()));

    let score = score_label(track, "Happy", &config.genre_profile, &config.weights).unwrap();
    assert!((score - 20.8).abs() < 1e-9);
}

#[tokio::test]
async fn test_generate_match_mood() {
    let generator = generator_for(Mood::Angry);
    let request = GenerationRequest::new("leave me alone")
        .with_seed(SEED)
        .with_size(2);

    let generated = generator.generate(&request).await.unwrap();
    let again = generator.generate(&request).await.unwrap();

    assert_eq!(generated.detected_mood, Mood::Angry);
    assert_eq!(generated.target_mood, Mood::Angry);
    assert_eq!(generated.playlist.len(), 2);
    assert_eq!(generated, again);
    let names: Vec<String> = generated.tracks.iter().map(|t| t.summary().to_string()).collect();
    assert_eq!(names.len(), 2);
}

#[tokio::test]
async fn test_generate_change_mood() {
    let generator = generator_for(Mood::Sad);
    let request = GenerationRequest::new("rainy day")
        .with_behavior(Behavior::ChangeMood)
        .with_seed(SEED)
        .with_size(1);

    let generated = generator.generate(&request).await.unwrap();

    assert_eq!(generated.detected_mood, Mood::Sad);
    assert_eq!(generated.target_mood, Mood::Happy);
    assert_eq!(generated.behavior, Behavior::ChangeMood);
    assert_eq!(generated.playlist.len(), 1);
}

#[tokio::test]
async fn test_generate_from_catalog_file_and_config() {
    let (_dir, catalog_path) = write_catalog_file().unwrap();

    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"
weight_genre = 1.0
weight_popularity = 0.0
default_playlist_size = 5

[genre_profile]
relaxed = ["jazz", "sad"]
"#
    )
    .unwrap();
    let file_config = FileConfig::load(config_file.path()).unwrap();
    let app_config = AppConfig::resolve(&CliConfig::default(), Some(file_config)).unwrap();

    let generator = PlaylistGenerator::new(
        app_config.engine,
        Arc::new(StubClassifier(Mood::Relaxed)),
        Arc::new(JsonFileCatalog::new(catalog_path).with_limit(app_config.candidate_limit)),
    );
    let generated = generator
        .generate(&GenerationRequest::new("slow sunday").with_seed(SEED))
        .await
        .unwrap();

    let ids: HashSet<&str> = generated.playlist.track_ids().iter().map(String::as_str).collect();
    assert_eq!(ids, HashSet::from([TRACK_C, TRACK_D]));
}

#[tokio::test]
async fn test_missing_catalog_file_is_catalog_error() {
    let generator = PlaylistGenerator::new(
        EngineConfig::default(),
        Arc::new(StubClassifier(Mood::Happy)),
        Arc::new(JsonFileCatalog::new("/nonexistent/catalog.json")),
    );
    let err = generator
        .generate(&GenerationRequest::new("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, MoodifyError::Catalog(_)));
}

#[tokio::test]
async fn test_persist_generated_playlist() {
    let generator = generator_for(Mood::Happy);
    let request = GenerationRequest::new("sunny afternoon")
        .with_seed(SEED)
        .with_size(4);
    let generated = generator.generate(&request).await.unwrap();
    assert_eq!(generated.playlist.len(), 4);

    let draft = PlaylistDraft::new(
        &generated.playlist,
        &generated.tracks,
        generated.detected_mood,
        generated.behavior,
        &request.text,
    );
    assert_eq!(draft.name, "Moodify: happy (Match)");
    // Only A carries a valid track uri; the other fixture ids are dropped
    assert_eq!(draft.uris, vec!["spotify:track:4uLU6hMCjMI75M1A2tKUQC".to_string()]);

    let dir = tempfile::TempDir::new().unwrap();
    let sink = JsonFilePlaylistSink::new(dir.path());
    let saved = persist_playlist(&sink, &draft).await.unwrap();

    let location = saved.location.unwrap();
    let stored: StoredPlaylist =
        serde_json::from_str(&std::fs::read_to_string(location).unwrap()).unwrap();
    assert_eq!(stored.id, saved.id);
    assert_eq!(stored.description, "Generated from prompt: sunny afternoon");
    assert_eq!(stored.uris, draft.uris);
}

#[cfg(feature = "mock")]
mod mocked {
    use super::*;
    use moodify::catalog::MockTrackCatalogProvider;

    #[tokio::test]
    async fn test_catalog_fetched_once_per_request() {
        let mut catalog = MockTrackCatalogProvider::new();
        catalog
            .expect_fetch_candidates()
            .times(1)
            .returning(|| Ok(fixture_records()));

        let generator = PlaylistGenerator::new(
            EngineConfig::default(),
            Arc::new(StubClassifier(Mood::Relaxed)),
            Arc::new(catalog),
        );
        let generated = generator
            .generate(&GenerationRequest::new("x").with_seed(SEED).with_size(1))
            .await
            .unwrap();
        assert_eq!(generated.playlist.len(), 1);
    }
}
