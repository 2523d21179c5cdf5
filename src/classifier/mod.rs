//! Mood classification of free text.
//!
//! Classification is a collaborator of the playlist engine: anything that
//! turns text into one of the six moods can drive it.

mod keyword;
pub mod llm;
mod llm_classifier;

pub use keyword::KeywordClassifier;
pub use llm_classifier::{parse_mood_reply, LlmMoodClassifier};

use crate::config::{ClassifierKind, ClassifierSettings};
use crate::error::Result;
use crate::mood::Mood;
use async_trait::async_trait;
use llm::{CompletionOptions, OllamaProvider, OpenAIProvider};
use std::sync::Arc;
use tracing::info;

/// Maps free text to a mood.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait MoodClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Mood>;
}

/// Build the classifier selected by configuration.
pub fn build_classifier(settings: &ClassifierSettings) -> Arc<dyn MoodClassifier> {
    match settings.kind {
        ClassifierKind::Keyword => {
            info!("Using keyword mood classifier");
            Arc::new(KeywordClassifier::new())
        }
        ClassifierKind::Ollama => {
            info!(base_url = %settings.base_url, model = %settings.model, "Using Ollama mood classifier");
            let provider = OllamaProvider::new(settings.base_url.clone(), settings.model.clone());
            Arc::new(LlmMoodClassifier::new(Arc::new(provider)).with_options(options_for(settings)))
        }
        ClassifierKind::OpenAI => {
            info!(base_url = %settings.base_url, model = %settings.model, "Using OpenAI-compatible mood classifier");
            let provider = OpenAIProvider::new(
                settings.base_url.clone(),
                settings.model.clone(),
                settings.api_key.clone(),
            );
            Arc::new(LlmMoodClassifier::new(Arc::new(provider)).with_options(options_for(settings)))
        }
    }
}

fn options_for(settings: &ClassifierSettings) -> CompletionOptions {
    CompletionOptions {
        timeout: settings.timeout,
        ..CompletionOptions::default()
    }
}
