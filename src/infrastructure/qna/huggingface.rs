//! Hugging Face inference provider for extractive question answering
//!
//! Sends `{ "inputs": { "question", "context" } }` to the model endpoint and reads back
//! the best span with its score.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Error;
use crate::domain::config::QnaConfig;
use crate::domain::traits::QnaProvider;
use crate::domain::types::Inference;

const PROVIDER: &str = "huggingface";

/// Request body
#[derive(Debug, Serialize)]
struct QaRequest<'a> {
    inputs: QaInputs<'a>,
}

#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

/// A single predicted span
#[derive(Debug, Deserialize)]
struct QaSpan {
    answer: String,
    score: f32,
}

/// Depending on the deployment the span comes back bare or wrapped in a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QaResponse {
    Single(QaSpan),
    Ranked(Vec<QaSpan>),
}

pub struct HuggingFaceQna {
    http: Client,
    url: String,
    api_key: Option<String>,
}

impl HuggingFaceQna {
    /// Build the provider. Fails only if the HTTP client cannot be constructed.
    pub fn new(config: &QnaConfig, api_key: Option<String>) -> Result<Self, Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::new(PROVIDER, format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: model_url(&config.endpoint, &config.model),
            api_key,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request(&self, question: &str, context: &str) -> Result<Inference, Error> {
        let body = QaRequest {
            inputs: QaInputs { question, context },
        };

        let mut request = self.http.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::new(PROVIDER, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::new(PROVIDER, format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::new(PROVIDER, error_message(status.as_u16(), &text)));
        }

        parse_response(&text)
    }
}

#[async_trait]
impl QnaProvider for HuggingFaceQna {
    async fn infer(&self, question: &str, context: &str) -> Result<Inference, String> {
        self.request(question, context)
            .await
            .map_err(|e| e.to_string())
    }
}

fn model_url(endpoint: &str, model: &str) -> String {
    format!("{}/models/{}", endpoint.trim_end_matches('/'), model)
}

fn parse_response(text: &str) -> Result<Inference, Error> {
    let parsed: QaResponse = serde_json::from_str(text)
        .map_err(|e| Error::new(PROVIDER, format!("Failed to parse response: {}", e)))?;

    let span = match parsed {
        QaResponse::Single(span) => span,
        QaResponse::Ranked(spans) => spans
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| Error::new(PROVIDER, "No answer in response"))?,
    };

    Ok(Inference {
        answer: span.answer,
        score: span.score,
    })
}

/// Pull the message out of `{"error": "..."}` / `{"error": {"message": "..."}}` bodies.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(error) = json.get("error") {
            if let Some(msg) = error.as_str() {
                return format!("HTTP {}: {}", status, msg);
            }
            if let Some(msg) = error.get("message").and_then(|m| m.as_str()) {
                return format!("HTTP {}: {}", status, msg);
            }
        }
    }
    format!("HTTP {}: {}", status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_url() {
        assert_eq!(
            model_url("https://router.huggingface.co/hf-inference/", "distilbert"),
            "https://router.huggingface.co/hf-inference/models/distilbert"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = QaRequest {
            inputs: QaInputs {
                question: "Сколько дней отпуска?",
                context: "Отпуск 28 дней.",
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["inputs"]["question"], "Сколько дней отпуска?");
        assert_eq!(json["inputs"]["context"], "Отпуск 28 дней.");
    }

    #[test]
    fn test_parse_single_span() {
        let inference =
            parse_response(r#"{"score":0.82,"start":7,"end":14,"answer":"28 дней"}"#).unwrap();
        assert_eq!(inference.answer, "28 дней");
        assert!((inference.score - 0.82).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_ranked_spans_takes_best() {
        let inference = parse_response(
            r#"[{"score":0.1,"answer":"weak"},{"score":0.7,"answer":"strong"}]"#,
        )
        .unwrap();
        assert_eq!(inference.answer, "strong");
    }

    #[test]
    fn test_parse_failures() {
        assert!(parse_response("[]").is_err());
        assert!(parse_response("not json").is_err());
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(503, r#"{"error":"Model is currently loading","estimated_time":20.0}"#),
            "HTTP 503: Model is currently loading"
        );
        assert_eq!(
            error_message(400, r#"{"error":{"message":"bad input"}}"#),
            "HTTP 400: bad input"
        );
        assert_eq!(error_message(502, "Bad Gateway"), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_provider_builds_url_from_config() {
        let config = QnaConfig::default();
        let provider = HuggingFaceQna::new(&config, None).unwrap();
        assert_eq!(
            provider.url(),
            "https://router.huggingface.co/hf-inference/models/distilbert-base-uncased-distilled-squad"
        );
    }
}
