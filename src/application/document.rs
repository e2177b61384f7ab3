//! # Document Store
//!
//! Loads the source document once at startup. The resulting `Document` is immutable and shared
//! read-only with every answer task. Loading never fails: any problem yields an empty document.

use std::path::Path;
use std::sync::Arc;

use crate::domain::traits::TextExtractor;
use crate::strings::logs;

/// Extracted text of the source document, pages concatenated in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    text: String,
    pages: usize,
}

impl Document {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pages(pages: Vec<String>) -> Self {
        Self {
            pages: pages.len(),
            text: pages.concat(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

pub struct DocumentStore {
    extractor: Arc<dyn TextExtractor>,
}

impl DocumentStore {
    pub fn new(extractor: Arc<dyn TextExtractor>) -> Self {
        Self { extractor }
    }

    /// Extract `path`. Missing files, parse errors and extractor panics are logged and
    /// produce an empty document so the bot can still start.
    pub async fn load(&self, path: &Path) -> Document {
        if !path.exists() {
            tracing::error!("{}", logs::document_missing(&path.display().to_string()));
            return Document::empty();
        }

        let extractor = self.extractor.clone();
        let owned = path.to_path_buf();
        let result = tokio::task::spawn_blocking(move || extractor.extract_pages(&owned)).await;

        match result {
            Ok(Ok(pages)) => {
                let document = Document::from_pages(pages);
                tracing::info!(
                    "{}",
                    logs::document_loaded(document.pages(), document.text().chars().count())
                );
                if document.is_empty() {
                    tracing::warn!("{}", logs::DOCUMENT_NO_TEXT);
                }
                document
            }
            Ok(Err(e)) => {
                tracing::error!("{}", logs::document_extract_fail(&e));
                Document::empty()
            }
            Err(e) => {
                tracing::error!("{}", logs::document_extract_fail(&e.to_string()));
                Document::empty()
            }
        }
    }
}
