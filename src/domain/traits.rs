//! # Domain Traits
//!
//! Abstract interfaces for the external collaborators (chat transport, QnA model, PDF parser).
//! Allows for pluggable implementations in the Infrastructure layer and test doubles.

use async_trait::async_trait;
use std::path::Path;

use crate::domain::types::{ChatId, Inference, OutgoingMessage, Photo};

/// Abstract interface for a Chat Provider (e.g., Telegram)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a text message to a conversation
    async fn send_message(&self, chat_id: ChatId, message: &OutgoingMessage)
    -> Result<(), String>;

    /// Send a photo, using the message text as its caption
    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: Photo,
        caption: &OutgoingMessage,
    ) -> Result<(), String>;

    /// Acknowledge a menu selection so the client stops its progress indicator
    async fn acknowledge(&self, selection_id: &str) -> Result<(), String>;

    /// Send a "typing" indicator
    async fn typing(&self, chat_id: ChatId) -> Result<(), String>;
}

/// Abstract interface for an extractive question-answering model
#[async_trait]
pub trait QnaProvider: Send + Sync {
    /// Find the span of `context` that best answers `question`
    async fn infer(&self, question: &str, context: &str) -> Result<Inference, String>;
}

/// Abstract interface for a document text extractor
pub trait TextExtractor: Send + Sync {
    /// Extract the text of every page, in page order
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, String>;
}
