//! # Domain Types
//!
//! Common data structures and enums used across the application logic.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

pub const COMMAND_PREFIX: char = '/';

/// Identifier of a conversation on the chat transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inbound user action, already classified by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `/name args`; a `/name@BotName` suffix is split off into `addressee`
    Command {
        chat_id: ChatId,
        name: String,
        addressee: Option<String>,
        args: String,
    },
    /// A press on one of the inline options attached to a bot message
    Selection {
        chat_id: ChatId,
        selection_id: String,
        data: String,
    },
    /// Plain text that does not start with the command prefix
    Text { chat_id: ChatId, text: String },
}

impl Event {
    /// Classifies a text message as a command or a free-text question.
    pub fn from_text(chat_id: ChatId, text: &str) -> Self {
        let trimmed = text.trim();
        if !trimmed.starts_with(COMMAND_PREFIX) {
            return Event::Text {
                chat_id,
                text: trimmed.to_string(),
            };
        }

        match command_regex().captures(trimmed) {
            Some(caps) => Event::Command {
                chat_id,
                name: caps[1].to_lowercase(),
                addressee: caps.get(2).map(|m| m.as_str().to_string()),
                args: caps
                    .get(3)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            },
            // Prefixed but malformed ("/", "/ hi"): still a command, just one nobody handles
            None => Event::Command {
                chat_id,
                name: String::new(),
                addressee: None,
                args: trimmed[COMMAND_PREFIX.len_utf8()..].trim().to_string(),
            },
        }
    }

    pub fn chat_id(&self) -> ChatId {
        match self {
            Event::Command { chat_id, .. }
            | Event::Selection { chat_id, .. }
            | Event::Text { chat_id, .. } => *chat_id,
        }
    }
}

fn command_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^/([A-Za-z0-9_]+)(?:@([A-Za-z0-9_]+))?(?:\s+([\s\S]*))?$")
            .expect("Invalid command pattern")
    })
}

/// A selectable inline option: the label shown and the payload sent back on press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    pub data: String,
}

impl MenuOption {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Inline options attached to a message, one option per row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Menu {
    pub options: Vec<MenuOption>,
}

impl Menu {
    pub fn new(options: Vec<MenuOption>) -> Self {
        Self { options }
    }
}

/// A message the bot wants delivered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutgoingMessage {
    pub text: String,
    /// Interpret `*bold*` / `_emphasis_` markup
    pub markdown: bool,
    pub menu: Option<Menu>,
}

impl OutgoingMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: true,
            menu: None,
        }
    }

    pub fn with_menu(mut self, menu: Menu) -> Self {
        self.menu = Some(menu);
        self
    }
}

/// Image bytes plus the file name reported to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Raw output of the question-answering capability.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub answer: String,
    pub score: f32,
}

/// Best-effort answer span and its confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text: String,
    pub confidence: f32,
    /// Set when the answer is a substitute for a failed inference
    pub failed: bool,
}

impl Answer {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            text: text.into().trim().to_string(),
            confidence,
            failed: false,
        }
    }

    /// Nothing to answer from.
    pub fn empty() -> Self {
        Self::new("", 0.0)
    }

    /// Substitute for an inference that could not be performed.
    pub fn fallback() -> Self {
        Self {
            failed: true,
            ..Self::empty()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A question waiting for its delayed answer. Carries everything the worker needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuestion {
    pub question: String,
    pub chat_id: ChatId,
}

impl PendingQuestion {
    pub fn new(question: impl Into<String>, chat_id: ChatId) -> Self {
        Self {
            question: question.into(),
            chat_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAT: ChatId = ChatId(42);

    #[test]
    fn test_plain_text_is_question() {
        assert_eq!(
            Event::from_text(CHAT, "  What is the vacation policy?\n"),
            Event::Text {
                chat_id: CHAT,
                text: "What is the vacation policy?".to_string()
            }
        );
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(
            Event::from_text(CHAT, "/start"),
            Event::Command {
                chat_id: CHAT,
                name: "start".to_string(),
                addressee: None,
                args: String::new()
            }
        );
        assert_eq!(
            Event::from_text(CHAT, "/Help@SputnikBot extra words"),
            Event::Command {
                chat_id: CHAT,
                name: "help".to_string(),
                addressee: Some("SputnikBot".to_string()),
                args: "extra words".to_string()
            }
        );
    }

    #[test]
    fn test_prefixed_text_never_becomes_question() {
        for text in ["/unknown", "/", "/ spaced", "/отпуск"] {
            assert!(
                matches!(Event::from_text(CHAT, text), Event::Command { .. }),
                "{text} classified as question"
            );
        }
    }

    #[test]
    fn test_answer_confidence_is_clamped() {
        assert_eq!(Answer::new("x", 1.7).confidence, 1.0);
        assert_eq!(Answer::new("x", -0.2).confidence, 0.0);
        assert_eq!(Answer::new("x", f32::NAN).confidence, 0.0);
        assert_eq!(Answer::new("  span \n", 0.5).text, "span");
    }

    #[test]
    fn test_fallback_answer() {
        let answer = Answer::fallback();
        assert!(answer.is_empty());
        assert!(answer.failed);
        assert_eq!(answer.confidence, 0.0);
        assert!(!Answer::empty().failed);
    }
}
