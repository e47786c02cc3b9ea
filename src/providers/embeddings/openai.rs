use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use super::{EmbedderError, EmbeddingModel};

pub struct OpenAIEmbeddingModel {
    api_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl OpenAIEmbeddingModel {
    /// `base_url` is the provider root (e.g. `https://api.openai.com/v1`);
    /// the embeddings path is appended here.
    pub fn new(client: Client, api_key: String, base_url: &str, model: String) -> Self {
        Self {
            api_url: format!("{}/embeddings", base_url.trim_end_matches('/')),
            api_key,
            model,
            client,
        }
    }
}

#[derive(Deserialize)]
struct OpenAIEmbeddingResponse {
    pub data: Vec<OpenAIEmbeddingData>,
}

#[derive(Deserialize)]
struct OpenAIEmbeddingData {
    pub embedding: Vec<f64>,
}

#[async_trait]
impl EmbeddingModel for OpenAIEmbeddingModel {
    async fn embed(&self, data: &str) -> Result<Vec<f64>, EmbedderError> {
        let request_body = json!({
            "input": data,
            "model": self.model,
        });
        debug!(model = %self.model, input_len = data.len(), "Requesting embedding");
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Embedding request failed");
                EmbedderError::RequestError(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            let response = response
                .json::<OpenAIEmbeddingResponse>()
                .await
                .map_err(|e| EmbedderError::ParseError(e.to_string()))?;

            response
                .data
                .into_iter()
                .next()
                .map(|d| d.embedding)
                .ok_or_else(|| {
                    EmbedderError::ParseError("Response contained no embeddings".to_string())
                })
        } else {
            let error_message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_message, "Embedding API returned error");

            Err(EmbedderError::ProviderError(status.into(), error_message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn simple_openai_embed_request() {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap();
        let model = OpenAIEmbeddingModel::new(
            Client::new(),
            api_key,
            "https://api.openai.com/v1",
            "text-embedding-3-small".to_string(),
        );

        let response = model.embed("test").await;

        assert!(response.is_ok());
        assert!(!response.unwrap().is_empty());
    }
}
