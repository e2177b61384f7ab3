//! # Conversation Router
//!
//! Routes incoming events to the appropriate handler (in `interface/commands`).
//! The router keeps no per-conversation state: every event is handled on its own, and a
//! failing handler is logged here so it never reaches the event loop.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::responder::DeferredResponder;
use crate::domain::traits::ChatProvider;
use crate::domain::types::Event;
use crate::interface::commands;
use crate::strings::logs;

pub struct ConversationRouter {
    chat: Arc<dyn ChatProvider>,
    responder: DeferredResponder,
    logo_path: PathBuf,
    /// Our own `@username`; commands addressed to any other bot are ignored
    bot_username: Option<String>,
}

impl ConversationRouter {
    pub fn new(
        chat: Arc<dyn ChatProvider>,
        responder: DeferredResponder,
        logo_path: PathBuf,
    ) -> Self {
        Self {
            chat,
            responder,
            logo_path,
            bot_username: None,
        }
    }

    pub fn with_bot_username(mut self, username: Option<String>) -> Self {
        self.bot_username = username;
        self
    }

    /// Unaddressed commands are ours. Without a known identity every addressee is accepted.
    fn is_addressed_to_us(&self, addressee: Option<&str>) -> bool {
        match (addressee, self.bot_username.as_deref()) {
            (Some(addressee), Some(ours)) => addressee.eq_ignore_ascii_case(ours),
            _ => true,
        }
    }

    pub async fn route(&self, event: Event) {
        let chat_id = event.chat_id();
        if let Err(e) = self.dispatch(event).await {
            tracing::error!("{}", logs::route_fail(chat_id, &e.to_string()));
        }
    }

    async fn dispatch(&self, event: Event) -> Result<()> {
        let chat: &dyn ChatProvider = &*self.chat;

        match event {
            Event::Command {
                chat_id,
                name,
                addressee,
                args,
            } => {
                if !self.is_addressed_to_us(addressee.as_deref()) {
                    tracing::debug!(
                        "{}",
                        logs::foreign_command(&name, addressee.as_deref().unwrap_or_default())
                    );
                    return Ok(());
                }
                tracing::info!(
                    "Router dispatching cmd='{}' args='{}' chat='{}'",
                    name,
                    args,
                    chat_id
                );
                match name.as_str() {
                    "start" => commands::start::handle_start(chat, chat_id, &self.logo_path).await,
                    "help" => commands::help::handle_help(chat, chat_id).await,
                    _ => {
                        tracing::debug!("{}", logs::unknown_command(&name));
                        Ok(())
                    }
                }
            }
            Event::Selection {
                chat_id,
                selection_id,
                data,
            } => commands::menu::handle_selection(chat, chat_id, &selection_id, &data).await,
            Event::Text { chat_id, text } => {
                commands::question::handle_question(chat, &self.responder, chat_id, &text).await
            }
        }
    }
}
