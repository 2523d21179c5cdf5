use anyhow::{Context, Result};
use clap::Parser;
use moodify::catalog::JsonFileCatalog;
use moodify::classifier::build_classifier;
use moodify::config::{AppConfig, ClassifierKind, CliConfig, FileConfig};
use moodify::generator::{GenerationRequest, PlaylistGenerator};
use moodify::mood::Behavior;
use moodify::playlist::{persist_playlist, JsonFilePlaylistSink, PlaylistDraft};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a JSON catalog export with "top", "recent" and "saved" buckets.
    #[clap(long, value_parser = parse_path)]
    pub catalog: PathBuf,

    /// How the listener feels, in their own words.
    #[clap(long)]
    pub text: String,

    /// Steer away from the detected mood instead of matching it.
    #[clap(long)]
    pub change_mood: bool,

    /// Sampling seed. 0 picks a random seed.
    #[clap(long, default_value_t = 0)]
    pub seed: u64,

    /// Number of tracks in the playlist. Defaults to the configured size.
    #[clap(long, allow_hyphen_values = true)]
    pub size: Option<i64>,

    /// Path to TOML config file.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory where the playlist is written as JSON.
    #[clap(long, value_parser = parse_path)]
    pub output: Option<PathBuf>,

    /// Mood classifier to use.
    #[clap(long, value_enum)]
    pub classifier: Option<ClassifierKind>,

    /// Base URL of the LLM endpoint.
    #[clap(long)]
    pub llm_base_url: Option<String>,

    /// LLM model name.
    #[clap(long)]
    pub llm_model: Option<String>,

    /// API key for OpenAI-compatible endpoints.
    #[clap(long)]
    pub api_key: Option<String>,

    /// Weight of genre relevance in the score.
    #[clap(long)]
    pub weight_genre: Option<f64>,

    /// Weight of popularity in the score.
    #[clap(long)]
    pub weight_popularity: Option<f64>,

    /// Maximum number of records taken from each catalog bucket.
    #[clap(long)]
    pub candidate_limit: Option<usize>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            weight_genre: self.weight_genre,
            weight_popularity: self.weight_popularity,
            playlist_size: self.size,
            candidate_limit: self.candidate_limit,
            classifier: self.classifier,
            llm_base_url: self.llm_base_url.clone(),
            llm_model: self.llm_model.clone(),
            llm_api_key: self.api_key.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    let catalog = JsonFileCatalog::new(&cli_args.catalog).with_limit(app_config.candidate_limit);
    info!("Reading catalog from {:?}", catalog.path());
    let classifier = build_classifier(&app_config.classifier);
    let generator = PlaylistGenerator::new(app_config.engine, classifier, Arc::new(catalog));

    let behavior = if cli_args.change_mood {
        Behavior::ChangeMood
    } else {
        Behavior::MatchMood
    };
    let mut request = GenerationRequest::new(cli_args.text.clone()).with_behavior(behavior);
    if cli_args.seed != 0 {
        request = request.with_seed(cli_args.seed);
    }

    let generated = generator
        .generate(&request)
        .await
        .context("Failed to generate playlist")?;

    println!(
        "Detected mood: {} -> playlist mood: {}",
        generated.detected_mood, generated.target_mood
    );
    if generated.tracks.is_empty() {
        println!("No tracks available for this mood.");
    }
    for (i, track) in generated.tracks.iter().enumerate() {
        println!("{:>2}. {}", i + 1, track.summary());
    }

    if let Some(dir) = &cli_args.output {
        let draft = PlaylistDraft::new(
            &generated.playlist,
            &generated.tracks,
            generated.detected_mood,
            generated.behavior,
            &cli_args.text,
        );
        let sink = JsonFilePlaylistSink::new(dir);
        let saved = persist_playlist(&sink, &draft)
            .await
            .context("Failed to save playlist")?;
        match saved.location {
            Some(location) => println!("Saved playlist {} to {}", saved.id, location),
            None => println!("Saved playlist {}", saved.id),
        }
    }

    Ok(())
}
