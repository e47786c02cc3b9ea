mod openai;

pub use openai::OpenAIEmbeddingModel;

use async_trait::async_trait;
use thiserror::Error;

/// Failures from an embedding provider. Recoverable: the orchestrator falls
/// back to an unranked reply when one of these surfaces during ranking.
#[derive(Debug, Clone, Error)]
pub enum EmbedderError {
    #[error("RequestError: {0}")]
    RequestError(String),
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("Provider error -> HTTP Status {0}: {1}")]
    ProviderError(u16, String),
}

/// Converts a text string into a fixed-length embedding vector via an
/// external model call.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    async fn embed(&self, data: &str) -> Result<Vec<f64>, EmbedderError>;
}
