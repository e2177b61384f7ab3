//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Every section is optional: a missing file yields the defaults, so the bot can run
//! with nothing but the access token in the environment.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "data/config.yaml";

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub qna: QnaConfig,
    #[serde(default)]
    pub responder: ResponderConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telegram Bot API connection settings.
#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    /// Environment variable holding the bot access token
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
    /// Long-polling timeout passed to `getUpdates`
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
    /// Pause before polling again after a failed `getUpdates`
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            api_url: default_telegram_api_url(),
            poll_timeout_secs: default_poll_timeout(),
            retry_delay_secs: default_retry_delay(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_token_env() -> String {
    "TELEGRAM_API_TOKEN".to_string()
}
fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}
fn default_poll_timeout() -> u64 {
    30
}
fn default_retry_delay() -> u64 {
    5
}
fn default_request_timeout() -> u64 {
    60
}

/// Source document the answers are extracted from.
#[derive(Debug, Deserialize, Clone)]
pub struct DocumentConfig {
    #[serde(default = "default_document_path")]
    pub path: PathBuf,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: default_document_path(),
        }
    }
}

fn default_document_path() -> PathBuf {
    PathBuf::from("Documents/Коллективный договор.pdf")
}

/// Extractive question-answering service.
#[derive(Debug, Deserialize, Clone)]
pub struct QnaConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_qna_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_qna_model")]
    pub model: String,
    /// Optional environment variable with the inference API key
    #[serde(default = "default_qna_key_env")]
    pub api_key_env: Option<String>,
    #[serde(default = "default_qna_timeout")]
    pub timeout_secs: u64,
    /// Answers scoring below this are reported as "not found"
    #[serde(default)]
    pub min_confidence: f32,
}

impl Default for QnaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_qna_endpoint(),
            model: default_qna_model(),
            api_key_env: default_qna_key_env(),
            timeout_secs: default_qna_timeout(),
            min_confidence: 0.0,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_qna_endpoint() -> String {
    "https://router.huggingface.co/hf-inference".to_string()
}
fn default_qna_model() -> String {
    "distilbert-base-uncased-distilled-squad".to_string()
}
fn default_qna_key_env() -> Option<String> {
    Some("HF_API_TOKEN".to_string())
}
fn default_qna_timeout() -> u64 {
    120
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResponderConfig {
    /// Artificial latency between a question and its answer
    #[serde(default = "default_answer_delay")]
    pub answer_delay_ms: u64,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            answer_delay_ms: default_answer_delay(),
        }
    }
}

impl ResponderConfig {
    pub fn answer_delay(&self) -> Duration {
        Duration::from_millis(self.answer_delay_ms)
    }
}

fn default_answer_delay() -> u64 {
    1000
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Image attached to the welcome message, if present
    #[serde(default = "default_logo_path")]
    pub logo_path: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            logo_path: default_logo_path(),
        }
    }
}

fn default_logo_path() -> PathBuf {
    PathBuf::from("static/logo.png")
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            file: default_log_file(),
        }
    }
}

fn default_log_dir() -> String {
    "data".to_string()
}
fn default_log_file() -> String {
    "session.log".to_string()
}

impl AppConfig {
    /// Reads the YAML file at `path`. A missing file means "all defaults";
    /// a file that exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Resolves the bot access token through `lookup` (normally the process environment).
    pub fn resolve_token<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(&self.telegram.token_env) {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => bail!(crate::strings::logs::missing_token(&self.telegram.token_env)),
        }
    }

    /// Resolves the optional inference API key. Absence is not an error.
    pub fn resolve_qna_key<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.qna
            .api_key_env
            .as_deref()
            .and_then(|name| lookup(name))
            .filter(|key| !key.trim().is_empty())
    }
}
