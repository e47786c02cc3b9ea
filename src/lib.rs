//! # Confluence Responder
//!
//! One-shot automation job that replies to newly opened GitHub issues with
//! pointers into a Confluence wiki.
//!
//! The flow is strictly linear, one pass per triggering event:
//!
//! 1. Read the Actions event payload (`GITHUB_EVENT_PATH`).
//! 2. Search Confluence for pages matching the issue title.
//! 3. Embed the issue and each candidate page, rank pages by cosine
//!    similarity, and keep the top matches.
//! 4. Ask a chat model for a concise reply referencing those pages.
//! 5. Post the reply as an issue comment.
//!
//! Wiki search and comment publishing failures are fatal (the surrounding
//! scheduler logs them); embedding or generation failures degrade to a
//! plain list of page titles so the issue still gets an answer.

/// Explicit runtime configuration, built once from the environment
pub mod config;

/// Document types shared across search, ranking and reply building
pub mod document;

/// Error types for all library operations
pub mod error;

/// Triggering event payload (GitHub Actions issue event)
pub mod event;

/// Issue comment publishing
pub mod github;

/// Markup stripping for wiki page bodies
pub mod normalize;

/// Builtin completion and embedding model providers
pub mod providers;

/// Cosine similarity ranking of candidate documents
pub mod ranking;

/// Prompt construction and the canned comment texts
pub mod reply;

/// The linear orchestrator
pub mod responder;

/// Confluence content search client
pub mod wiki;

pub use error::Error;
