//! # Telegram Service Adapter
//!
//! Implements the `ChatProvider` trait for the Telegram Bot API over plain HTTPS.
//! Also owns long polling: `next_events` wraps `getUpdates` and hands back classified events.

pub mod types;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::time::Duration;

use crate::domain::config::TelegramConfig;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{ChatId, Event, OutgoingMessage, Photo};
use types::{
    AnswerCallbackQuery, ApiResponse, GetUpdates, InlineKeyboardMarkup, SendChatAction,
    SendMessage, Update, User,
};

const PARSE_MODE: &str = "Markdown";

#[derive(Clone)]
pub struct TelegramService {
    http: Client,
    /// `{api_url}/bot{token}`; never logged
    base_url: String,
    poll_timeout: u64,
}

impl TelegramService {
    pub fn new(config: &TelegramConfig, token: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: format!("{}/bot{}", config.api_url.trim_end_matches('/'), token),
            poll_timeout: config.poll_timeout_secs,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Call a Bot API method with a JSON body
    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call_with(method, self.http.post(self.method_url(method)).json(body))
            .await
    }

    async fn call_with<T>(&self, method: &str, request: reqwest::RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        // reqwest errors carry the URL, which carries the token
        let response = request
            .send()
            .await
            .map_err(|e| anyhow!("{} request failed: {}", method, e.without_url()))?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| anyhow!("{} returned an unreadable response: {}", method, e.without_url()))?;

        unwrap_envelope(method, envelope)
    }

    /// Identity of the bot behind the token
    pub async fn get_me(&self) -> Result<User> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long-poll for the next batch of updates, advancing `offset` past everything received.
    pub async fn next_events(&self, offset: &mut i64) -> Result<Vec<Event>> {
        let body = GetUpdates {
            offset: *offset,
            timeout: self.poll_timeout,
            allowed_updates: vec!["message", "callback_query"],
        };
        // The server holds the request for up to `poll_timeout`
        let request = self
            .http
            .post(self.method_url("getUpdates"))
            .timeout(Duration::from_secs(self.poll_timeout + 10))
            .json(&body);

        let updates: Vec<Update> = self.call_with("getUpdates", request).await?;
        Ok(collect_events(updates, offset))
    }

    async fn send_message_inner(&self, chat_id: ChatId, message: &OutgoingMessage) -> Result<()> {
        let body = SendMessage {
            chat_id: chat_id.0,
            text: &message.text,
            parse_mode: message.markdown.then_some(PARSE_MODE),
            reply_markup: message.menu.as_ref().map(InlineKeyboardMarkup::from),
        };
        let _: IgnoredAny = self.call("sendMessage", &body).await?;
        Ok(())
    }

    async fn send_photo_inner(
        &self,
        chat_id: ChatId,
        photo: Photo,
        caption: &OutgoingMessage,
    ) -> Result<()> {
        let mut form = Form::new()
            .text("chat_id", chat_id.0.to_string())
            .text("caption", caption.text.clone());
        if caption.markdown {
            form = form.text("parse_mode", PARSE_MODE);
        }
        if let Some(menu) = &caption.menu {
            form = form.text(
                "reply_markup",
                serde_json::to_string(&InlineKeyboardMarkup::from(menu))?,
            );
        }
        form = form.part("photo", Part::bytes(photo.bytes).file_name(photo.file_name));

        let request = self.http.post(self.method_url("sendPhoto")).multipart(form);
        let _: IgnoredAny = self.call_with("sendPhoto", request).await?;
        Ok(())
    }
}

fn unwrap_envelope<T>(method: &str, envelope: ApiResponse<T>) -> Result<T> {
    if !envelope.ok {
        return Err(anyhow!(
            "{} failed ({}): {}",
            method,
            envelope.error_code.unwrap_or_default(),
            envelope.description.unwrap_or_default()
        ));
    }
    envelope
        .result
        .ok_or_else(|| anyhow!("{} returned no result", method))
}

/// Convert updates into events and move `offset` past the highest update id.
fn collect_events(updates: Vec<Update>, offset: &mut i64) -> Vec<Event> {
    let mut events = Vec::with_capacity(updates.len());
    for update in updates {
        *offset = (*offset).max(update.update_id + 1);
        if let Some(event) = update.into_event() {
            events.push(event);
        }
    }
    events
}

#[async_trait]
impl ChatProvider for TelegramService {
    async fn send_message(
        &self,
        chat_id: ChatId,
        message: &OutgoingMessage,
    ) -> Result<(), String> {
        tracing::info!("Bot sending message to {}: {}", chat_id, message.text);
        self.send_message_inner(chat_id, message)
            .await
            .map_err(|e| e.to_string())
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: Photo,
        caption: &OutgoingMessage,
    ) -> Result<(), String> {
        tracing::info!("Bot sending photo {} to {}", photo.file_name, chat_id);
        self.send_photo_inner(chat_id, photo, caption)
            .await
            .map_err(|e| e.to_string())
    }

    async fn acknowledge(&self, selection_id: &str) -> Result<(), String> {
        let body = AnswerCallbackQuery {
            callback_query_id: selection_id,
        };
        self.call::<_, IgnoredAny>("answerCallbackQuery", &body)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn typing(&self, chat_id: ChatId) -> Result<(), String> {
        let body = SendChatAction {
            chat_id: chat_id.0,
            action: "typing",
        };
        self.call::<_, IgnoredAny>("sendChatAction", &body)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url() {
        let config = TelegramConfig {
            api_url: "https://api.telegram.org/".to_string(),
            ..Default::default()
        };
        let service = TelegramService::new(&config, "123:abc").unwrap();
        assert_eq!(
            service.method_url("getUpdates"),
            "https://api.telegram.org/bot123:abc/getUpdates"
        );
    }

    #[test]
    fn test_unwrap_envelope() {
        let ok: ApiResponse<i64> = serde_json::from_str(r#"{"ok":true,"result":5}"#).unwrap();
        assert_eq!(unwrap_envelope("m", ok).unwrap(), 5);

        let failed: ApiResponse<i64> = serde_json::from_str(
            r#"{"ok":false,"error_code":403,"description":"Forbidden: bot was blocked by the user"}"#,
        )
        .unwrap();
        let err = unwrap_envelope("sendMessage", failed).unwrap_err().to_string();
        assert!(err.contains("403"));
        assert!(err.contains("blocked"));
    }

    #[test]
    fn test_collect_events_advances_offset() {
        let updates: Vec<Update> = serde_json::from_str(
            r#"[
                {"update_id":10,"message":{"message_id":1,"chat":{"id":1},"text":"вопрос"}},
                {"update_id":11,"message":{"message_id":2,"chat":{"id":1}}},
                {"update_id":12,"callback_query":{"id":"q","from":{"id":1},"data":"functions"}}
            ]"#,
        )
        .unwrap();
        let mut offset = 0;
        let events = collect_events(updates, &mut offset);
        assert_eq!(offset, 13);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_collect_events_keeps_offset_on_empty_batch() {
        let mut offset = 42;
        assert!(collect_events(Vec::new(), &mut offset).is_empty());
        assert_eq!(offset, 42);
    }
}
