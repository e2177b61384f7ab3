//! # Questions
//!
//! Handles free-text messages: shows the typing indicator, then hands the question to the
//! deferred responder. Text carrying the command prefix never reaches the question flow.

use crate::application::responder::DeferredResponder;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{COMMAND_PREFIX, ChatId};
use crate::strings::logs;
use anyhow::Result;

pub async fn handle_question(
    chat: &dyn ChatProvider,
    responder: &DeferredResponder,
    chat_id: ChatId,
    text: &str,
) -> Result<()> {
    let question = text.trim();
    if question.is_empty() || question.starts_with(COMMAND_PREFIX) {
        tracing::debug!("{}", logs::question_ignored(chat_id, question));
        return Ok(());
    }

    tracing::info!("{}", logs::question_received(chat_id, question));

    // A missing indicator is cosmetic; the question still gets answered
    if let Err(e) = chat.typing(chat_id).await {
        tracing::warn!("{}", logs::typing_fail(chat_id, &e));
    }

    responder.schedule(question, chat_id)
}
