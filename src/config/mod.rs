mod file_config;

pub use file_config::{ClassifierConfig, FileConfig};

use crate::catalog::DEFAULT_CANDIDATE_LIMIT;
use crate::mood::GenreProfile;
use crate::scoring::{PopularityScale, SampleSize, ScoringWeights};
use anyhow::{anyhow, Result};
use clap::ValueEnum;
use std::time::Duration;

pub const DEFAULT_PLAYLIST_SIZE: usize = 10;

/// Values given on the command line. Anything set here wins over the
/// config file.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub weight_genre: Option<f64>,
    pub weight_popularity: Option<f64>,
    pub playlist_size: Option<i64>,
    pub candidate_limit: Option<usize>,
    pub classifier: Option<ClassifierKind>,
    pub llm_base_url: Option<String>,
    pub llm_model: Option<String>,
    pub llm_api_key: Option<String>,
}

/// Everything the scoring and sampling engine needs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub weights: ScoringWeights,
    pub default_playlist_size: usize,
    pub popularity_scale: PopularityScale,
    pub genre_profile: GenreProfile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            default_playlist_size: DEFAULT_PLAYLIST_SIZE,
            popularity_scale: PopularityScale::default(),
            genre_profile: GenreProfile::builtin(),
        }
    }
}

impl EngineConfig {
    pub fn weight_genre(&self) -> f64 {
        self.weights.genre
    }

    pub fn weight_popularity(&self) -> f64 {
        self.weights.popularity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ClassifierKind {
    #[default]
    Keyword,
    Ollama,
    #[value(name = "openai")]
    OpenAI,
}

impl ClassifierKind {
    fn default_base_url(&self) -> &'static str {
        match self {
            ClassifierKind::Keyword | ClassifierKind::Ollama => "http://localhost:11434",
            ClassifierKind::OpenAI => "https://api.openai.com/v1",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            ClassifierKind::Keyword | ClassifierKind::Ollama => "llama3.1:8b",
            ClassifierKind::OpenAI => "gpt-4o-mini",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierSettings {
    pub kind: ClassifierKind,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        let kind = ClassifierKind::default();
        Self {
            kind,
            base_url: kind.default_base_url().to_string(),
            model: kind.default_model().to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub classifier: ClassifierSettings,
    pub candidate_limit: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and an optional TOML file.
    /// CLI values override TOML values, which override built-in defaults.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let weights = ScoringWeights::new(
            cli.weight_genre
                .or(file.weight_genre)
                .unwrap_or(ScoringWeights::default().genre),
            cli.weight_popularity
                .or(file.weight_popularity)
                .unwrap_or(ScoringWeights::default().popularity),
        )?;

        let default_playlist_size = match cli.playlist_size.or(file.default_playlist_size) {
            Some(n) => SampleSize::try_from(n)?.get(),
            None => DEFAULT_PLAYLIST_SIZE,
        };

        let popularity_scale = match file.popularity_scale.as_deref() {
            Some(s) => parse_popularity_scale(s)
                .ok_or_else(|| anyhow!("Unknown popularity_scale: {}", s))?,
            None => PopularityScale::default(),
        };

        let genre_profile = match &file.genre_profile {
            Some(overrides) => GenreProfile::builtin().with_overrides(overrides)?,
            None => GenreProfile::builtin(),
        };

        let candidate_limit = cli
            .candidate_limit
            .or(file.candidate_limit)
            .unwrap_or(DEFAULT_CANDIDATE_LIMIT);

        let classifier = resolve_classifier(cli, file.classifier.unwrap_or_default())?;

        Ok(Self {
            engine: EngineConfig {
                weights,
                default_playlist_size,
                popularity_scale,
                genre_profile,
            },
            classifier,
            candidate_limit,
        })
    }
}

fn resolve_classifier(cli: &CliConfig, file: ClassifierConfig) -> Result<ClassifierSettings> {
    let kind = match (cli.classifier, file.kind.as_deref()) {
        (Some(kind), _) => kind,
        (None, Some(s)) => {
            ClassifierKind::from_str(s, true).map_err(|_| anyhow!("Unknown classifier kind: {}", s))?
        }
        (None, None) => ClassifierKind::default(),
    };

    Ok(ClassifierSettings {
        kind,
        base_url: cli
            .llm_base_url
            .clone()
            .or(file.base_url)
            .unwrap_or_else(|| kind.default_base_url().to_string()),
        model: cli
            .llm_model
            .clone()
            .or(file.model)
            .unwrap_or_else(|| kind.default_model().to_string()),
        api_key: cli.llm_api_key.clone().or(file.api_key),
        timeout: Duration::from_secs(file.timeout_sec.unwrap_or(30)),
    })
}

fn parse_popularity_scale(s: &str) -> Option<PopularityScale> {
    match s.trim().to_lowercase().as_str() {
        "fixed" => Some(PopularityScale::Fixed),
        "pool_max" | "pool-max" => Some(PopularityScale::PoolMax),
        _ => None,
    }
}
