//! Telegram Bot API wire types
//!
//! Only the fields the bot reads or writes are modelled; unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::domain::types::{ChatId, Event, Menu};

/// Envelope of every Bot API response
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

impl Update {
    /// Classify the update. Updates the bot does not act on yield `None`.
    pub fn into_event(self) -> Option<Event> {
        if let Some(query) = self.callback_query {
            let chat_id = query
                .message
                .as_ref()
                .map(|m| m.chat.id)
                .unwrap_or(query.from.id);
            return Some(Event::Selection {
                chat_id: ChatId(chat_id),
                selection_id: query.id,
                data: query.data.unwrap_or_default(),
            });
        }

        let message = self.message?;
        if message.from.as_ref().is_some_and(|u| u.is_bot) {
            return None;
        }
        let text = message.text?;
        Some(Event::from_text(ChatId(message.chat.id), &text))
    }
}

#[derive(Debug, Serialize)]
pub struct GetUpdates {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl From<&Menu> for InlineKeyboardMarkup {
    fn from(menu: &Menu) -> Self {
        Self {
            inline_keyboard: menu
                .options
                .iter()
                .map(|option| {
                    vec![InlineKeyboardButton {
                        text: option.label.clone(),
                        callback_data: option.data.clone(),
                    }]
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
pub struct SendChatAction {
    pub chat_id: i64,
    pub action: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackQuery<'a> {
    pub callback_query_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::MenuOption;

    fn update(json: &str) -> Update {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_text_message_becomes_question() {
        let event = update(
            r#"{"update_id":1,"message":{"message_id":5,"chat":{"id":77,"type":"private"},
                "from":{"id":9,"is_bot":false,"first_name":"A"},"text":"Какой график работы?"}}"#,
        )
        .into_event();
        assert_eq!(
            event,
            Some(Event::Text {
                chat_id: ChatId(77),
                text: "Какой график работы?".to_string()
            })
        );
    }

    #[test]
    fn test_command_message() {
        let event = update(
            r#"{"update_id":2,"message":{"message_id":6,"chat":{"id":77},"text":"/start"}}"#,
        )
        .into_event();
        assert!(matches!(event, Some(Event::Command { ref name, .. }) if name == "start"));
    }

    #[test]
    fn test_callback_query_becomes_selection() {
        let event = update(
            r#"{"update_id":3,"callback_query":{"id":"cb-1","from":{"id":9,"is_bot":false},
                "message":{"message_id":7,"chat":{"id":-100}},"data":"contacts"}}"#,
        )
        .into_event();
        assert_eq!(
            event,
            Some(Event::Selection {
                chat_id: ChatId(-100),
                selection_id: "cb-1".to_string(),
                data: "contacts".to_string()
            })
        );
    }

    #[test]
    fn test_ignored_updates() {
        // no text (sticker, photo, ...)
        assert_eq!(
            update(r#"{"update_id":4,"message":{"message_id":8,"chat":{"id":1}}}"#).into_event(),
            None
        );
        // other bots
        assert_eq!(
            update(
                r#"{"update_id":5,"message":{"message_id":9,"chat":{"id":1},
                    "from":{"id":2,"is_bot":true},"text":"hi"}}"#
            )
            .into_event(),
            None
        );
        assert_eq!(update(r#"{"update_id":6}"#).into_event(), None);
    }

    #[test]
    fn test_menu_renders_one_button_per_row() {
        let menu = Menu::new(vec![
            MenuOption::new("Функции", "functions"),
            MenuOption::new("Контакты", "contacts"),
        ]);
        let json = serde_json::to_value(InlineKeyboardMarkup::from(&menu)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"inline_keyboard": [
                [{"text": "Функции", "callback_data": "functions"}],
                [{"text": "Контакты", "callback_data": "contacts"}]
            ]})
        );
    }

    #[test]
    fn test_send_message_omits_empty_fields() {
        let body = SendMessage {
            chat_id: 1,
            text: "hi",
            parse_mode: None,
            reply_markup: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"chat_id": 1, "text": "hi"})
        );
    }
}
