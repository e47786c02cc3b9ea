use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::document::Document;
use crate::error::Error;
use crate::event::{Issue, IssueEvent};
use crate::github::IssueCommenter;
use crate::normalize::{strip_markup, truncate_chars};
use crate::providers::completions::{CompletionError, CompletionModel};
use crate::providers::embeddings::{EmbedderError, EmbeddingModel};
use crate::ranking;
use crate::reply::{self, NO_MATCH_COMMENT};
use crate::wiki::ConfluenceClient;

/// Tunables for the ranking and reply stage, taken from [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct ComposeOptions {
    pub top_k: usize,
    pub doc_embed_max_chars: usize,
    pub doc_prompt_max_chars: usize,
    pub max_reply_tokens: usize,
}

impl From<&Config> for ComposeOptions {
    fn from(config: &Config) -> Self {
        Self {
            top_k: config.top_k,
            doc_embed_max_chars: config.doc_embed_max_chars,
            doc_prompt_max_chars: config.doc_prompt_max_chars,
            max_reply_tokens: config.max_reply_tokens,
        }
    }
}

/// A failure anywhere in the ranking/generation stage. The two kinds stay
/// distinct, but both trigger the same unranked fallback comment.
#[derive(Debug, Clone, thiserror::Error)]
enum ComposeError {
    #[error(transparent)]
    Embedder(#[from] EmbedderError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Runs the whole semantic path: embed the issue, embed each page, rank by
/// cosine, prompt the chat model with the top pages.
async fn semantic_reply(
    issue: &Issue,
    documents: &[Document],
    embedder: &dyn EmbeddingModel,
    completion: &dyn CompletionModel,
    opts: ComposeOptions,
) -> Result<String, ComposeError> {
    let issue_embedding = embedder.embed(&issue.embedding_text()).await?;

    let mut candidates = Vec::with_capacity(documents.len());
    for document in documents {
        let text = strip_markup(document.raw_body());
        let embedding = embedder
            .embed(truncate_chars(&text, opts.doc_embed_max_chars))
            .await?;
        candidates.push((document.clone(), embedding));
    }

    let top = ranking::top_k(&issue_embedding, candidates, opts.top_k);
    info!(
        selected = top.len(),
        best_score = top.first().map(|s| s.score),
        "Ranked candidate pages"
    );

    let prompt = reply::build_prompt(issue, &top, opts.doc_prompt_max_chars);
    Ok(completion.complete(&prompt, opts.max_reply_tokens).await?)
}

/// Turns the search results into the comment text. Zero results short-circuit
/// to the fixed no-match message without touching either model; a provider
/// failure degrades to the unranked title list.
pub async fn compose_comment(
    issue: &Issue,
    documents: &[Document],
    embedder: &dyn EmbeddingModel,
    completion: &dyn CompletionModel,
    opts: ComposeOptions,
) -> String {
    if documents.is_empty() {
        info!("No matching pages, replying with the no-match message");
        return NO_MATCH_COMMENT.to_string();
    }

    match semantic_reply(issue, documents, embedder, completion, opts).await {
        Ok(comment) => comment,
        Err(e) => {
            warn!(error = %e, "Semantic search failed, falling back to unranked titles");
            reply::fallback_comment(
                documents
                    .iter()
                    .take(opts.top_k)
                    .map(|d| d.title.as_str()),
            )
        }
    }
}

/// The linear orchestrator: one pass per triggering event, then exit.
pub struct Responder {
    wiki: ConfluenceClient,
    commenter: IssueCommenter,
    embedder: Box<dyn EmbeddingModel>,
    completion: Box<dyn CompletionModel>,
    search_limit: usize,
    opts: ComposeOptions,
}

impl Responder {
    pub fn new(
        wiki: ConfluenceClient,
        commenter: IssueCommenter,
        embedder: Box<dyn EmbeddingModel>,
        completion: Box<dyn CompletionModel>,
        config: &Config,
    ) -> Self {
        Self {
            wiki,
            commenter,
            embedder,
            completion,
            search_limit: config.search_limit,
            opts: ComposeOptions::from(config),
        }
    }

    /// Search, rank, generate, publish. Wiki and publish failures propagate
    /// (fatal); ranking/generation failures are absorbed by the fallback.
    #[instrument(skip(self, event), fields(repo = %event.repository.full_name, issue = event.issue.number))]
    pub async fn run(&self, event: &IssueEvent, query_max_chars: usize) -> Result<(), Error> {
        let query = event.issue.search_query(query_max_chars);
        let documents = self.wiki.search(&query, self.search_limit).await?;
        info!(found = documents.len(), "Wiki search finished");

        let comment = compose_comment(
            &event.issue,
            &documents,
            self.embedder.as_ref(),
            self.completion.as_ref(),
            self.opts,
        )
        .await;

        self.commenter
            .post_comment(&event.repository.full_name, event.issue.number, &comment)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::event::Issue;

    const OPTS: ComposeOptions = ComposeOptions {
        top_k: 2,
        doc_embed_max_chars: 3000,
        doc_prompt_max_chars: 1000,
        max_reply_tokens: 400,
    };

    fn issue() -> Issue {
        Issue {
            title: "Login fails".to_string(),
            body: Some("Users see 500 on /login".to_string()),
            number: 42,
        }
    }

    /// Returns canned vectors keyed on substrings of the input, counting
    /// calls so tests can assert the model was never touched.
    struct StubEmbedder {
        by_substring: Vec<(&'static str, Vec<f64>)>,
        fallback: Vec<f64>,
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubEmbedder {
        fn new(by_substring: Vec<(&'static str, Vec<f64>)>, fallback: Vec<f64>) -> Self {
            Self {
                by_substring,
                fallback,
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                by_substring: vec![],
                fallback: vec![],
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl EmbeddingModel for StubEmbedder {
        async fn embed(&self, data: &str) -> Result<Vec<f64>, EmbedderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(EmbedderError::ProviderError(401, "bad key".to_string()));
            }
            Ok(self
                .by_substring
                .iter()
                .find(|(needle, _)| data.contains(needle))
                .map(|(_, v)| v.clone())
                .unwrap_or_else(|| self.fallback.clone()))
        }
    }

    /// Echoes the prompt back so tests can inspect what would be sent.
    struct StubCompletion {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubCompletion {
        fn echo() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl CompletionModel for StubCompletion {
        async fn complete(
            &self,
            prompt: &str,
            _max_tokens: usize,
        ) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CompletionError::ProviderError(500, "boom".to_string()));
            }
            Ok(prompt.to_string())
        }
    }

    #[tokio::test]
    async fn zero_documents_short_circuit() {
        let embedder = StubEmbedder::new(vec![], vec![1.0]);
        let completion = StubCompletion::echo();

        let comment = compose_comment(&issue(), &[], &embedder, &completion, OPTS).await;

        assert_eq!(comment, NO_MATCH_COMMENT);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn embedding_failure_falls_back_to_titles() {
        let embedder = StubEmbedder::failing();
        let completion = StubCompletion::echo();
        let documents = vec![
            Document::fixture("Auth troubleshooting", "<p>a</p>"),
            Document::fixture("Deploy guide", "<p>b</p>"),
            Document::fixture("Style guide", "<p>c</p>"),
        ];

        let comment = compose_comment(&issue(), &documents, &embedder, &completion, OPTS).await;

        assert_eq!(
            comment,
            "Couldn't run semantic search, but these pages may help:\n\
             - Auth troubleshooting\n\
             - Deploy guide"
        );
        assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn generation_failure_falls_back_to_titles() {
        let embedder = StubEmbedder::new(vec![], vec![1.0, 0.0]);
        let completion = StubCompletion::failing();
        let documents = vec![Document::fixture("Auth troubleshooting", "<p>a</p>")];

        let comment = compose_comment(&issue(), &documents, &embedder, &completion, OPTS).await;

        assert!(comment.starts_with("Couldn't run semantic search"));
        assert!(comment.contains("- Auth troubleshooting"));
    }

    #[tokio::test]
    async fn higher_cosine_document_ranks_first_in_prompt() {
        // issue embeds to (1, 0); the auth page is nearly parallel to it,
        // the style guide nearly orthogonal.
        let embedder = StubEmbedder::new(
            vec![
                ("Users see 500", vec![1.0, 0.0]),
                ("single sign-on", vec![0.9, 0.1]),
                ("naming conventions", vec![0.1, 0.9]),
            ],
            vec![0.0, 0.0],
        );
        let completion = StubCompletion::echo();
        // fetch order deliberately puts the weaker match first
        let documents = vec![
            Document::fixture("Style guide", "<p>naming conventions</p>"),
            Document::fixture("Auth troubleshooting", "<p>single sign-on</p>"),
        ];

        let prompt = compose_comment(&issue(), &documents, &embedder, &completion, OPTS).await;

        let auth = prompt.find("Auth troubleshooting").unwrap();
        let style = prompt.find("Style guide").unwrap();
        assert!(auth < style, "higher-cosine page should come first");
        // query + 2 documents
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 3);
        assert_eq!(completion.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn top_k_limits_prompt_documents() {
        let embedder = StubEmbedder::new(
            vec![
                ("Users see 500", vec![1.0, 0.0]),
                ("alpha", vec![1.0, 0.0]),
                ("beta", vec![0.9, 0.1]),
                ("gamma", vec![0.1, 0.9]),
            ],
            vec![0.0, 0.0],
        );
        let completion = StubCompletion::echo();
        let documents = vec![
            Document::fixture("Gamma page", "<p>gamma</p>"),
            Document::fixture("Alpha page", "<p>alpha</p>"),
            Document::fixture("Beta page", "<p>beta</p>"),
        ];

        let prompt = compose_comment(&issue(), &documents, &embedder, &completion, OPTS).await;

        assert!(prompt.contains("Alpha page"));
        assert!(prompt.contains("Beta page"));
        assert!(!prompt.contains("Gamma page"));
    }
}
