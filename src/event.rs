use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Failed to read event payload from `{0}`: {1}")]
    Read(String, #[source] std::io::Error),
    #[error("Failed to parse event payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The issue event payload GitHub Actions writes to `GITHUB_EVENT_PATH`.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueEvent {
    pub issue: Issue,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub number: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// `owner/repo`
    pub full_name: String,
}

impl IssueEvent {
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, EventError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| EventError::Read(path.display().to_string(), e))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl Issue {
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    /// The wiki search query: the title, or the leading slice of the body
    /// when the title is empty.
    pub fn search_query(&self, query_max_chars: usize) -> String {
        if self.title.is_empty() {
            crate::normalize::truncate_chars(self.body(), query_max_chars).to_string()
        } else {
            self.title.clone()
        }
    }

    /// The text that gets embedded for ranking, untruncated.
    pub fn embedding_text(&self) -> String {
        format!("{}\n{}", self.title, self.body())
    }
}
