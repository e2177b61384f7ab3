//! # Start Command
//!
//! Handles the `/start` command.
//! Greets the user and offers the main menu, with the logo attached when it can be read.

use crate::domain::traits::ChatProvider;
use crate::domain::types::{ChatId, Menu, MenuOption, OutgoingMessage, Photo};
use crate::strings::{logs, messages};
use anyhow::{Result, anyhow};
use std::path::Path;

/// The two options offered with the welcome message.
pub fn main_menu() -> Menu {
    Menu::new(vec![
        MenuOption::new(messages::FUNCTIONS_LABEL, messages::FUNCTIONS_DATA),
        MenuOption::new(messages::CONTACTS_LABEL, messages::CONTACTS_DATA),
    ])
}

/// Sends exactly one welcome: photo + caption if the logo is readable, text otherwise.
/// A failed photo send is reported, not retried as text.
pub async fn handle_start(chat: &dyn ChatProvider, chat_id: ChatId, logo_path: &Path) -> Result<()> {
    let welcome = OutgoingMessage::markdown(messages::WELCOME).with_menu(main_menu());

    let sent = match load_logo(logo_path).await {
        Some(photo) => chat.send_photo(chat_id, photo, &welcome).await,
        None => chat.send_message(chat_id, &welcome).await,
    };
    sent.map_err(|e| anyhow!(e))
}

async fn load_logo(path: &Path) -> Option<Photo> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Some(Photo {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "logo.png".to_string()),
            bytes,
        }),
        Err(e) => {
            tracing::error!("{}", logs::logo_missing(&path.display().to_string(), &e.to_string()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{RecordingChat, Sent};

    const CHAT: ChatId = ChatId(100);

    #[tokio::test]
    async fn test_logo_present_sends_one_photo() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        std::fs::write(&logo, [0x89, b'P', b'N', b'G']).unwrap();
        let chat = RecordingChat::new();

        handle_start(&chat, CHAT, &logo).await.unwrap();

        assert_eq!(
            chat.sent(),
            vec![Sent::Photo {
                chat_id: CHAT,
                file_name: "logo.png".to_string(),
                caption: OutgoingMessage::markdown(messages::WELCOME).with_menu(main_menu()),
            }]
        );
    }

    #[tokio::test]
    async fn test_logo_missing_falls_back_to_text() {
        let dir = tempfile::tempdir().unwrap();
        let chat = RecordingChat::new();

        handle_start(&chat, CHAT, &dir.path().join("logo.png")).await.unwrap();

        assert_eq!(
            chat.sent(),
            vec![Sent::Message {
                chat_id: CHAT,
                message: OutgoingMessage::markdown(messages::WELCOME).with_menu(main_menu()),
            }]
        );
    }

    #[tokio::test]
    async fn test_failed_photo_is_not_resent_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        std::fs::write(&logo, b"img").unwrap();
        let chat = RecordingChat::failing();

        assert!(handle_start(&chat, CHAT, &logo).await.is_err());
        assert_eq!(chat.sent().len(), 1);
        assert!(matches!(chat.sent()[0], Sent::Photo { .. }));
    }

    #[test]
    fn test_main_menu_options() {
        let menu = main_menu();
        let data: Vec<&str> = menu.options.iter().map(|o| o.data.as_str()).collect();
        assert_eq!(data, vec!["functions", "contacts"]);
    }
}
