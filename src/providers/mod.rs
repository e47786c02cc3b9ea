/// Text embedding providers
pub mod embeddings;

/// Chat completion providers
pub mod completions;
