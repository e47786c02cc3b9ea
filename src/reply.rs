use crate::document::ScoredDocument;
use crate::event::Issue;
use crate::normalize::{strip_markup, truncate_chars};

/// Posted when the wiki search comes back empty.
pub const NO_MATCH_COMMENT: &str =
    "I couldn't find matching Confluence docs. Could you add more details?";

/// Builds the single user prompt sent to the chat model: the issue, the
/// selected pages (normalized, truncated), and the fixed instruction.
pub fn build_prompt(issue: &Issue, top_docs: &[ScoredDocument], doc_max_chars: usize) -> String {
    let docs = top_docs
        .iter()
        .map(|scored| {
            let text = strip_markup(scored.document.raw_body());
            format!(
                "Title: {}\n{}",
                scored.document.title,
                truncate_chars(&text, doc_max_chars)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a helpful assistant. The user opened this issue:\n\
         Title: {}\n\
         Body: {}\n\
         \n\
         From Confluence docs:\n\
         {}\n\
         \n\
         Write a concise reply to the issue referencing the docs and suggesting next steps. \
         Keep it short (<= 300 words).\n",
        issue.title,
        issue.body(),
        docs
    )
}

/// Posted when embedding or generation fails after the search found pages:
/// an unranked list of the first few titles in fetch order.
pub fn fallback_comment<'a>(titles: impl Iterator<Item = &'a str>) -> String {
    let listed = titles
        .map(|t| format!("- {t}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Couldn't run semantic search, but these pages may help:\n{listed}")
}
