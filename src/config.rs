use std::time::Duration;

use thiserror::Error;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-small";

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Missing required env var `{0}`")]
    MissingVar(String),
    #[error("Failed to parse env var `{0}`: {1}")]
    InvalidVar(String, String),
}

/// Runtime configuration, read once at startup and threaded into each
/// component constructor. Nothing else reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the serialized event payload, set by the CI runner.
    pub event_path: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub chat_model: String,
    pub embed_model: String,
    pub github_token: String,
    pub github_api_url: String,
    pub confluence_base_url: String,
    pub confluence_user: String,
    pub confluence_token: String,
    /// How many pages to request from the wiki search.
    pub search_limit: usize,
    /// How many ranked pages end up in the prompt (and the fallback list).
    pub top_k: usize,
    /// Page text is truncated to this many chars before embedding.
    pub doc_embed_max_chars: usize,
    /// Page text is truncated to this many chars inside the prompt.
    pub doc_prompt_max_chars: usize,
    /// Chars of issue body used as the search query when the title is empty.
    pub query_max_chars: usize,
    pub max_reply_tokens: usize,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            event_path: required("GITHUB_EVENT_PATH")?,
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_base_url: optional("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            chat_model: optional("OPENAI_CHAT_MODEL", DEFAULT_CHAT_MODEL),
            embed_model: optional("OPENAI_EMBED_MODEL", DEFAULT_EMBED_MODEL),
            github_token: required("GITHUB_TOKEN")?,
            github_api_url: optional("GITHUB_API_URL", DEFAULT_GITHUB_API_URL),
            confluence_base_url: required("CONFLUENCE_BASE")?,
            confluence_user: required("CONFLUENCE_USER")?,
            confluence_token: required("CONFLUENCE_TOKEN")?,
            search_limit: parsed("SEARCH_LIMIT", 5)?,
            top_k: parsed("TOP_K", 2)?,
            doc_embed_max_chars: parsed("DOC_EMBED_MAX_CHARS", 3000)?,
            doc_prompt_max_chars: parsed("DOC_PROMPT_MAX_CHARS", 1000)?,
            query_max_chars: parsed("QUERY_MAX_CHARS", 120)?,
            max_reply_tokens: parsed("MAX_REPLY_TOKENS", 400)?,
            http_timeout: Duration::from_secs(parsed("HTTP_TIMEOUT_SECS", 30)?),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidVar(name.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}
