//! # Menu Selections
//!
//! Handles presses on the inline options offered by `/start`.
//! Every press is acknowledged once, whatever its payload.

use crate::domain::traits::ChatProvider;
use crate::domain::types::{ChatId, OutgoingMessage};
use crate::strings::{logs, messages};
use anyhow::Result;

pub async fn handle_selection(
    chat: &dyn ChatProvider,
    chat_id: ChatId,
    selection_id: &str,
    data: &str,
) -> Result<()> {
    if let Err(e) = chat.acknowledge(selection_id).await {
        tracing::warn!("{}", logs::ack_fail(selection_id, &e));
    }
    tracing::info!("{}", logs::button_pressed(chat_id, data));

    let text = match data {
        messages::FUNCTIONS_DATA => messages::FUNCTIONS,
        messages::CONTACTS_DATA => messages::CONTACTS,
        other => {
            tracing::warn!("{}", logs::unknown_selection(other));
            return Ok(());
        }
    };

    chat.send_message(chat_id, &OutgoingMessage::markdown(text))
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
