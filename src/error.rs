use crate::{
    config::ConfigError, event::EventError, github::GitHubError,
    providers::completions::CompletionError, providers::embeddings::EmbedderError,
    wiki::WikiError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error")]
    Config(#[from] ConfigError),
    #[error("Event error")]
    Event(#[from] EventError),
    #[error("Wiki error")]
    Wiki(#[from] WikiError),
    #[error("Embedder error")]
    Embedder(#[from] EmbedderError),
    #[error("Completion error")]
    Completion(#[from] CompletionError),
    #[error("GitHub error")]
    GitHub(#[from] GitHubError),
    #[error("HTTP client error")]
    Http(#[from] reqwest::Error),
}
