//! LLM provider abstraction layer.
//!
//! Trait-based abstraction over chat-completion backends so the mood
//! classifier can run against Ollama or any OpenAI-compatible service.

mod ollama;
mod openai;
mod provider;
mod types;

pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
pub use provider::{CompletionOptions, LlmError, LlmProvider};
pub use types::{CompletionResponse, FinishReason, Message, MessageRole, TokenUsage};

#[cfg(feature = "mock")]
pub use provider::MockLlmProvider;
