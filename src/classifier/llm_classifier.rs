use super::llm::{CompletionOptions, FinishReason, LlmProvider, Message};
use super::MoodClassifier;
use crate::error::{MoodifyError, Result};
use crate::mood::{map_emotion_label, Mood};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

const SYSTEM_PROMPT: &str = "You classify the emotional state described in the user's message. \
Answer with exactly one word from this list: happy, sad, relaxed, anxious, angry, neutral.";

/// Mood classifier backed by a chat-completion model.
///
/// The reply is read as an emotion label, so answers such as "joy" or
/// "Sadness." still resolve. A reply that names no known emotion fails with
/// [`MoodifyError::UnknownMood`].
pub struct LlmMoodClassifier {
    provider: Arc<dyn LlmProvider>,
    options: CompletionOptions,
}

impl LlmMoodClassifier {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            options: CompletionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }
}

/// Resolve a model reply to a mood: the whole reply first, then each word.
pub fn parse_mood_reply(reply: &str) -> Option<Mood> {
    let cleaned = reply
        .trim()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if let Some(mood) = map_emotion_label(&cleaned) {
        return Some(mood);
    }
    cleaned
        .split(|c: char| !c.is_alphanumeric() && c != '/')
        .find_map(map_emotion_label)
}

#[async_trait]
impl MoodClassifier for LlmMoodClassifier {
    async fn classify(&self, text: &str) -> Result<Mood> {
        let messages = [Message::system(SYSTEM_PROMPT), Message::user(text)];

        let response = self
            .provider
            .complete(&messages, &self.options)
            .await
            .map_err(|e| MoodifyError::Classifier(format!("{} provider: {}", self.provider.name(), e)))?;

        if response.finish_reason == FinishReason::MaxTokens {
            warn!(
                provider = self.provider.name(),
                "LLM reply was cut at the token limit"
            );
        }
        let total_tokens = response.usage.map(|u| u.total_tokens);

        let reply = response.message.content;
        match parse_mood_reply(&reply) {
            Some(mood) => {
                debug!(
                    provider = self.provider.name(),
                    model = self.provider.model(),
                    mood = %mood,
                    total_tokens = ?total_tokens,
                    "LLM classification"
                );
                Ok(mood)
            }
            None => {
                warn!(reply = %reply, "LLM reply did not name a known mood");
                Err(MoodifyError::UnknownMood(reply.trim().to_string()))
            }
        }
    }
}
