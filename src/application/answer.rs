//! # Answer Engine
//!
//! Stateless wrapper around the extractive QnA capability. Never fails: an empty context
//! short-circuits to the empty answer, and any provider error becomes the fallback answer.

use std::sync::Arc;

use crate::domain::traits::QnaProvider;
use crate::domain::types::Answer;
use crate::strings::logs;

#[derive(Clone)]
pub struct AnswerEngine {
    provider: Option<Arc<dyn QnaProvider>>,
}

impl AnswerEngine {
    pub fn new(provider: Arc<dyn QnaProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// An engine whose capability failed to initialise; answers with the fallback.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn answer(&self, question: &str, context: &str) -> Answer {
        let Some(provider) = &self.provider else {
            tracing::warn!("{}", logs::QNA_DISABLED_ANSWER);
            return Answer::fallback();
        };

        if context.trim().is_empty() {
            tracing::warn!("{}", logs::EMPTY_CONTEXT);
            return Answer::empty();
        }

        match provider.infer(question, context).await {
            Ok(inference) => Answer::new(inference.answer, inference.score),
            Err(e) => {
                tracing::error!("{}", logs::inference_fail(&e));
                Answer::fallback()
            }
        }
    }
}
