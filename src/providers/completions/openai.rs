use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

use super::{CompletionError, CompletionModel};

pub struct OpenAICompletionModel {
    api_url: String,
    api_key: String,
    model: String,
    client: Client,
}

#[derive(Serialize)]
struct OpenAIMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl OpenAICompletionModel {
    /// `base_url` is the provider root (e.g. `https://api.openai.com/v1`);
    /// the chat completions path is appended here.
    pub fn new(client: Client, api_key: String, base_url: &str, model: String) -> Self {
        Self {
            api_url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            model,
            client,
        }
    }
}

#[async_trait]
impl CompletionModel for OpenAICompletionModel {
    async fn complete(&self, prompt: &str, max_tokens: usize) -> Result<String, CompletionError> {
        let messages = vec![OpenAIMessage {
            role: "user",
            content: prompt,
        }];
        let request_body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": max_tokens,
        });
        debug!(model = %self.model, prompt_len = prompt.len(), "Sending completion request");

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Completion request failed");
                CompletionError::RequestError(e.to_string())
            })?;

        let status = response.status();
        debug!(%status, "Received API response");

        if status.is_success() {
            let response_json: serde_json::Value = response.json().await.map_err(|e| {
                error!(error = ?e, "Failed to parse response JSON");
                CompletionError::ParseError(e.to_string())
            })?;

            let content = response_json["choices"][0]["message"]["content"]
                .as_str()
                .ok_or_else(|| {
                    CompletionError::ParseError("Missing content in response".to_string())
                })?;

            Ok(content.trim().to_string())
        } else {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error (failed to read response body)".to_string());
            error!(status = %status, error = %error_msg, "API returned error response");

            Err(CompletionError::ProviderError(status.into(), error_msg))
        }
    }
}
