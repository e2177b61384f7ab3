//! Test doubles for the domain traits.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::traits::{ChatProvider, QnaProvider, TextExtractor};
use crate::domain::types::{ChatId, Inference, OutgoingMessage, Photo};

/// Everything a `RecordingChat` was asked to deliver, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Message {
        chat_id: ChatId,
        message: OutgoingMessage,
    },
    Photo {
        chat_id: ChatId,
        file_name: String,
        caption: OutgoingMessage,
    },
    Ack(String),
    Typing(ChatId),
}

#[derive(Default)]
pub struct RecordingChat {
    sent: Mutex<Vec<Sent>>,
    fail_sends: bool,
}

impl RecordingChat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records calls but reports every message/photo delivery as failed.
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn messages_to(&self, chat_id: ChatId) -> Vec<OutgoingMessage> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Message { chat_id: c, message } if c == chat_id => Some(message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, entry: Sent) {
        self.sent.lock().unwrap().push(entry);
    }

    fn delivery_result(&self) -> Result<(), String> {
        if self.fail_sends {
            Err("Forbidden: bot was blocked by the user".to_string())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChatProvider for RecordingChat {
    async fn send_message(
        &self,
        chat_id: ChatId,
        message: &OutgoingMessage,
    ) -> Result<(), String> {
        self.record(Sent::Message {
            chat_id,
            message: message.clone(),
        });
        self.delivery_result()
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: Photo,
        caption: &OutgoingMessage,
    ) -> Result<(), String> {
        self.record(Sent::Photo {
            chat_id,
            file_name: photo.file_name,
            caption: caption.clone(),
        });
        self.delivery_result()
    }

    async fn acknowledge(&self, selection_id: &str) -> Result<(), String> {
        self.record(Sent::Ack(selection_id.to_string()));
        Ok(())
    }

    async fn typing(&self, chat_id: ChatId) -> Result<(), String> {
        self.record(Sent::Typing(chat_id));
        Ok(())
    }
}

/// QnA double: answers with the question itself, a fixed span, or an error.
pub enum StubQna {
    Echo,
    Fixed(Inference),
    Failing(String),
}

pub struct CountingQna {
    pub inner: StubQna,
    pub calls: AtomicUsize,
}

impl CountingQna {
    pub fn new(inner: StubQna) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QnaProvider for CountingQna {
    async fn infer(&self, question: &str, _context: &str) -> Result<Inference, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.inner {
            StubQna::Echo => Ok(Inference {
                answer: question.to_string(),
                score: 0.9,
            }),
            StubQna::Fixed(inference) => Ok(inference.clone()),
            StubQna::Failing(e) => Err(e.clone()),
        }
    }
}

pub enum StubExtractor {
    Pages(Vec<String>),
    Failing(String),
    Panicking,
}

impl StubExtractor {
    pub fn pages(pages: &[&str]) -> Self {
        Self::Pages(pages.iter().map(|p| p.to_string()).collect())
    }

    pub fn failing(message: &str) -> Self {
        Self::Failing(message.to_string())
    }
}

impl TextExtractor for StubExtractor {
    fn extract_pages(&self, _path: &Path) -> Result<Vec<String>, String> {
        match self {
            StubExtractor::Pages(pages) => Ok(pages.clone()),
            StubExtractor::Failing(e) => Err(e.clone()),
            StubExtractor::Panicking => panic!("malformed content stream"),
        }
    }
}
