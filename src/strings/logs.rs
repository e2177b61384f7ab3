//! # Log Lines
//!
//! Operator-facing log messages. User-facing texts live in `messages`.

use crate::domain::types::ChatId;
use std::time::Duration;

// Startup
pub const STARTING: &str = "Starting Sputnik...";

pub fn config_loaded(path: &str) -> String {
    format!("Configuration loaded from {path}")
}

pub fn missing_token(env: &str) -> String {
    format!("Access token not found. Set {env} in the environment or .env file.")
}

pub fn bot_identity(username: &str) -> String {
    format!("Authorized as @{username}")
}

pub fn get_me_fail(err: &str) -> String {
    format!("Could not verify bot identity (continuing): {err}")
}

pub fn ready_summary(pages: usize, qna_enabled: bool, delay: Duration) -> String {
    format!("Document pages: {pages}, QnA enabled: {qna_enabled}, answer delay: {delay:?}")
}

pub const POLLING_START: &str = "Bot started and ready to answer questions!";

pub fn polling_fail(err: &str, retry_secs: u64) -> String {
    format!("Polling for updates failed: {err}. Retrying in {retry_secs}s")
}

pub const SHUTDOWN: &str = "Shutting down...";

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

// Document
pub fn document_missing(path: &str) -> String {
    format!("PDF file not found at: {path}")
}

pub fn document_loaded(pages: usize, chars: usize) -> String {
    format!("Text extracted from PDF: {pages} pages, {chars} characters")
}

pub const DOCUMENT_NO_TEXT: &str =
    "PDF contains no extractable text; questions will be answered from an empty context";

pub fn document_extract_fail(err: &str) -> String {
    format!("Failed to extract text from PDF: {err}")
}

// QnA
pub fn qna_ready(url: &str) -> String {
    format!("QnA model ready at {url}")
}

pub const QNA_DISABLED_CONFIG: &str = "QnA disabled in configuration; every answer will be the fallback";

pub fn qna_init_fail(err: &str) -> String {
    format!("Failed to initialise QnA model, answering disabled: {err}")
}

pub const QNA_DISABLED_ANSWER: &str = "QnA model unavailable, returning fallback answer";
pub const EMPTY_CONTEXT: &str = "Document text is empty, returning empty answer";

pub fn inference_fail(err: &str) -> String {
    format!("Error while processing question: {err}")
}

// Responder
pub fn answer_ready(chat_id: ChatId, answer: &str, score: f32) -> String {
    format!("Answer for {chat_id}: {answer} (score: {score:.3})")
}

pub fn answer_delivery_fail(chat_id: ChatId, err: &str) -> String {
    format!("Failed to deliver answer to {chat_id}: {err}")
}

pub const RESPONDER_STOPPED: &str = "Deferred responder is no longer accepting questions";

// Handlers
pub fn logo_missing(path: &str, err: &str) -> String {
    format!("Logo {path} unavailable, sending text-only welcome: {err}")
}

pub fn button_pressed(chat_id: ChatId, data: &str) -> String {
    format!("Button pressed in {chat_id}: {data}")
}

pub fn unknown_selection(data: &str) -> String {
    format!("No handler for button payload '{data}'")
}

pub fn ack_fail(selection_id: &str, err: &str) -> String {
    format!("Failed to acknowledge selection {selection_id}: {err}")
}

pub fn question_received(chat_id: ChatId, question: &str) -> String {
    format!("Question received from {chat_id}: {question}")
}

pub fn question_ignored(chat_id: ChatId, text: &str) -> String {
    format!("Ignoring non-question text from {chat_id}: '{text}'")
}

pub fn typing_fail(chat_id: ChatId, err: &str) -> String {
    format!("Failed to send typing indicator to {chat_id}: {err}")
}

pub fn unknown_command(name: &str) -> String {
    format!("No handler for command '/{name}'")
}

pub fn foreign_command(name: &str, addressee: &str) -> String {
    format!("Ignoring '/{name}' addressed to @{addressee}")
}

pub fn route_fail(chat_id: ChatId, err: &str) -> String {
    format!("Failed to handle event from {chat_id}: {err}")
}
