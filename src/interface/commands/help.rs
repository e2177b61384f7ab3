//! # Help Command
//!
//! Handles the `/help` command.
//! Displays the list of available commands to the user.

use crate::domain::traits::ChatProvider;
use crate::domain::types::{ChatId, OutgoingMessage};
use anyhow::Result;

pub async fn handle_help(chat: &dyn ChatProvider, chat_id: ChatId) -> Result<()> {
    chat.send_message(chat_id, &OutgoingMessage::markdown(crate::strings::help::MAIN))
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
