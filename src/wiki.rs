use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::document::Document;

/// Failures from the wiki search. Fatal: the job aborts rather than reply
/// without having looked at the docs.
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("RequestError: {0}")]
    RequestError(String),
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("Search failed -> HTTP Status {0}: {1}")]
    SearchFailed(u16, String),
}

/// Searches Confluence content with a CQL text-containment query.
pub struct ConfluenceClient {
    base_url: String,
    user: String,
    token: String,
    client: Client,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Document>,
}

impl ConfluenceClient {
    pub fn new(client: Client, base_url: &str, user: String, token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user,
            token,
            client,
        }
    }

    /// Returns up to `limit` pages whose text contains `query`, in backend
    /// order. Bodies come back in storage format, along with version info.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Document>, WikiError> {
        let url = format!("{}/rest/api/content/search", self.base_url);
        let cql = format!("text ~ \"{query}\"");
        debug!(%cql, limit, "Searching Confluence");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("cql", cql.as_str()),
                ("limit", &limit.to_string()),
                ("expand", "body.storage,version"),
            ])
            .basic_auth(&self.user, Some(&self.token))
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Confluence request failed");
                WikiError::RequestError(e.to_string())
            })?;

        let status = response.status();
        if status == 401 || status == 403 {
            error!(%status, "Confluence rejected the credentials");
            return Err(WikiError::Unauthorized);
        }
        if !status.is_success() {
            let error_message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(%status, error = %error_message, "Confluence search returned error");
            return Err(WikiError::SearchFailed(status.into(), error_message));
        }

        let parsed = response
            .json::<SearchResponse>()
            .await
            .map_err(|e| WikiError::ParseError(e.to_string()))?;
        debug!(result_count = parsed.results.len(), "Confluence search done");

        Ok(parsed.results)
    }
}
