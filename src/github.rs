use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, info};

/// Failures while publishing the comment. Fatal: there is nothing useful to
/// do if the reply cannot be posted.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Issue #{1} not found in {0}")]
    IssueNotFound(String, u64),
    #[error("RequestError: {0}")]
    RequestError(String),
    #[error("Publish failed -> HTTP Status {0}: {1}")]
    PublishFailed(u16, String),
}

/// Appends comments to GitHub issues through the REST API.
pub struct IssueCommenter {
    api_url: String,
    token: String,
    client: Client,
}

impl IssueCommenter {
    pub fn new(client: Client, api_url: &str, token: String) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            client,
        }
    }

    /// Posts `body` as a new comment on `repo_full_name` (`owner/repo`)
    /// issue number `number`.
    pub async fn post_comment(
        &self,
        repo_full_name: &str,
        number: u64,
        body: &str,
    ) -> Result<(), GitHubError> {
        let url = format!(
            "{}/repos/{}/issues/{}/comments",
            self.api_url, repo_full_name, number
        );
        debug!(repo = %repo_full_name, number, comment_len = body.len(), "Posting issue comment");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "confluence-responder")
            .json(&json!({ "body": body }))
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Comment request failed");
                GitHubError::RequestError(e.to_string())
            })?;

        let status = response.status();
        if status == 401 || status == 403 {
            error!(%status, "GitHub rejected the token");
            return Err(GitHubError::Unauthorized);
        }
        if status == 404 {
            return Err(GitHubError::IssueNotFound(repo_full_name.to_string(), number));
        }
        if !status.is_success() {
            let error_message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(%status, error = %error_message, "GitHub returned error response");
            return Err(GitHubError::PublishFailed(status.into(), error_message));
        }

        info!(repo = %repo_full_name, number, "Posted comment");
        Ok(())
    }
}
