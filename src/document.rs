use serde::Deserialize;

/// A wiki page as returned by the content search, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    pub title: String,
    /// Storage-format markup of the page body.
    pub body: DocumentBody,
    #[serde(default)]
    pub version: Option<DocumentVersion>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentBody {
    pub storage: StorageBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageBody {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentVersion {
    pub number: u64,
}

impl Document {
    /// The raw storage markup of the page body.
    pub fn raw_body(&self) -> &str {
        &self.body.storage.value
    }

    #[cfg(test)]
    pub(crate) fn fixture(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: DocumentBody {
                storage: StorageBody {
                    value: body.to_string(),
                },
            },
            version: Some(DocumentVersion { number: 1 }),
        }
    }
}

/// A candidate document with its similarity against the issue embedding.
/// Ephemeral, discarded after top-k selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f64,
}
