mod openai;

pub use openai::OpenAICompletionModel;

use async_trait::async_trait;
use thiserror::Error;

/// Failures from a chat completion provider. Recoverable in the same way as
/// [`EmbedderError`](crate::providers::embeddings::EmbedderError).
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("Provider error -> HTTP Status {0}: {1}")]
    ProviderError(u16, String),
    #[error("RequestError: {0}")]
    RequestError(String),
    #[error("ParseError: {0}")]
    ParseError(String),
}

/// Sends a single user prompt to a chat model and returns the generated
/// prose. The responder has no conversation history; one prompt, one reply.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: usize) -> Result<String, CompletionError>;
}
