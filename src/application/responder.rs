//! # Deferred Responder
//!
//! Answers questions after a fixed delay. `schedule` pushes a `PendingQuestion` onto a queue;
//! a dispatcher task gives every record its own timer task, so answers run concurrently with
//! each other and with the event loop. Nothing is retried or cancelled once enqueued.

use anyhow::{Result, anyhow};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::application::answer::AnswerEngine;
use crate::application::document::Document;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{Answer, ChatId, OutgoingMessage, PendingQuestion};
use crate::strings::{logs, messages};

/// Answers one `PendingQuestion` and delivers the reply. Holds only shared read-only handles.
#[derive(Clone)]
pub struct AnswerWorker {
    engine: Arc<AnswerEngine>,
    document: Arc<Document>,
    chat: Arc<dyn ChatProvider>,
    min_confidence: f32,
}

impl AnswerWorker {
    pub fn new(
        engine: Arc<AnswerEngine>,
        document: Arc<Document>,
        chat: Arc<dyn ChatProvider>,
        min_confidence: f32,
    ) -> Self {
        Self {
            engine,
            document,
            chat,
            min_confidence,
        }
    }

    pub async fn run(&self, task: PendingQuestion) {
        let answer = self
            .engine
            .answer(&task.question, self.document.text())
            .await;
        tracing::info!(
            "{}",
            logs::answer_ready(task.chat_id, &answer.text, answer.confidence)
        );

        let reply = format_reply(&answer, self.min_confidence);
        if let Err(e) = self.chat.send_message(task.chat_id, &reply).await {
            tracing::error!("{}", logs::answer_delivery_fail(task.chat_id, &e));
        }
    }
}

/// Turn an answer into the message the user sees.
pub fn format_reply(answer: &Answer, min_confidence: f32) -> OutgoingMessage {
    if answer.failed {
        return OutgoingMessage::plain(messages::ANSWER_FAILED);
    }
    if answer.is_empty() || answer.confidence < min_confidence {
        return OutgoingMessage::plain(messages::ANSWER_NOT_FOUND);
    }
    OutgoingMessage::markdown(messages::answer(&answer.text))
}

struct Scheduled {
    task: PendingQuestion,
    delay: Duration,
}

#[derive(Clone)]
pub struct DeferredResponder {
    queue: mpsc::UnboundedSender<Scheduled>,
    delay: Duration,
}

impl DeferredResponder {
    /// Start the dispatcher on the current runtime. It stops when every handle is dropped.
    pub fn spawn(worker: AnswerWorker, delay: Duration) -> Self {
        let (queue, mut rx) = mpsc::unbounded_channel::<Scheduled>();

        tokio::spawn(async move {
            while let Some(Scheduled { task, delay }) = rx.recv().await {
                let worker = worker.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    worker.run(task).await;
                });
            }
            tracing::debug!("{}", logs::RESPONDER_STOPPED);
        });

        Self { queue, delay }
    }

    /// Answer `question` in `chat_id` after the configured delay.
    pub fn schedule(&self, question: impl Into<String>, chat_id: ChatId) -> Result<()> {
        self.schedule_after(question, chat_id, self.delay)
    }

    pub fn schedule_after(
        &self,
        question: impl Into<String>,
        chat_id: ChatId,
        delay: Duration,
    ) -> Result<()> {
        let task = PendingQuestion::new(question, chat_id);
        self.queue
            .send(Scheduled { task, delay })
            .map_err(|_| anyhow!(logs::RESPONDER_STOPPED))
    }
}
