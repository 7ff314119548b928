//! Completion provider abstraction for the hosted model API.
//!
//! A single trait seam so the chat handler stays independent of the wire
//! format, with a consistent request/response shape.

mod openai;

pub use openai::OpenAiProvider;

use async_trait::async_trait;

use crate::session::Message;

/// Unified interface for completion providers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Send the full ordered conversation and return the reply text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;
}

/// A completion request: the model and the full trimmed history,
/// system message first.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

/// Error from a completion provider.
#[derive(Debug, Clone)]
pub struct ProviderError {
    pub provider: String,
    pub model: String,
    pub message: String,
    pub status_code: Option<u16>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.provider, self.model, self.message)
    }
}

impl std::error::Error for ProviderError {}
