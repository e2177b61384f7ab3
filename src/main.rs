//! # Main Entry Point
//!
//! Wires the bot together:
//! - Domain: Configuration and Types
//! - Infrastructure: Telegram, PDF extraction, QnA model
//! - Application: Document Store, Answer Engine, Deferred Responder, Router
//! - Interface: Command Handlers
//!
//! Then long-polls Telegram until Ctrl-C.

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;

use crate::application::answer::AnswerEngine;
use crate::application::document::DocumentStore;
use crate::application::responder::{AnswerWorker, DeferredResponder};
use crate::application::router::ConversationRouter;
use crate::domain::config::{AppConfig, DEFAULT_CONFIG_PATH, LoggingConfig};
use crate::domain::traits::ChatProvider;
use crate::infrastructure::pdf::PdfExtractor;
use crate::infrastructure::qna::HuggingFaceQna;
use crate::infrastructure::telegram::TelegramService;
use crate::strings::logs;

/// Employee support bot answering questions from a PDF document.
#[derive(Debug, Parser)]
#[command(name = "sputnik", version)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Environment & Configuration
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let loaded = AppConfig::load(&cli.config);

    // 2. Logging Setup (default location if the config itself is broken)
    let _guard = init_logging(&logging_config(&loaded))?;
    tracing::info!("{}", logs::STARTING);
    let config = loaded.inspect_err(|e| tracing::error!("{:#}", e))?;
    tracing::info!("{}", logs::config_loaded(&cli.config.display().to_string()));

    // Nothing is processed without a token
    let token = config
        .resolve_token(|name| std::env::var(name).ok())
        .inspect_err(|e| tracing::error!("{}", e))?;

    // 3. Infrastructure
    let telegram = Arc::new(TelegramService::new(&config.telegram, &token)?);
    let bot_username = match telegram.get_me().await {
        Ok(me) => {
            tracing::info!(
                "{}",
                logs::bot_identity(me.username.as_deref().unwrap_or("unknown"))
            );
            me.username
        }
        Err(e) => {
            tracing::warn!("{}", logs::get_me_fail(&e.to_string()));
            None
        }
    };

    // 4. Document & Answer Engine
    let document = DocumentStore::new(Arc::new(PdfExtractor))
        .load(&config.document.path)
        .await;
    let engine = build_answer_engine(&config);
    tracing::info!(
        "{}",
        logs::ready_summary(document.pages(), engine.is_enabled(), config.responder.answer_delay())
    );

    // 5. Application Components
    let chat: Arc<dyn ChatProvider> = telegram.clone();
    let worker = AnswerWorker::new(
        Arc::new(engine),
        Arc::new(document),
        chat.clone(),
        config.qna.min_confidence,
    );
    let responder = DeferredResponder::spawn(worker, config.responder.answer_delay());
    let router = Arc::new(
        ConversationRouter::new(chat, responder, config.assets.logo_path.clone())
            .with_bot_username(bot_username),
    );

    // 6. Event Loop
    run_event_loop(
        &telegram,
        router,
        Duration::from_secs(config.telegram.retry_delay_secs),
    )
    .await;

    Ok(())
}

/// Logging settings from the loaded config, or the defaults when loading failed.
fn logging_config(loaded: &Result<AppConfig>) -> LoggingConfig {
    loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default()
}

fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let dir = std::path::Path::new(&config.dir);
    if !dir.exists() {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", config.dir))?;
    }

    // Clear previous session log
    let log_path = dir.join(&config.file);
    if log_path.exists() {
        let _ = fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(&config.dir, &config.file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,reqwest=warn,hyper=warn"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(guard)
}

/// A disabled or unbuildable QnA model degrades the bot instead of stopping it.
fn build_answer_engine(config: &AppConfig) -> AnswerEngine {
    if !config.qna.enabled {
        tracing::warn!("{}", logs::QNA_DISABLED_CONFIG);
        return AnswerEngine::disabled();
    }

    let api_key = config.resolve_qna_key(|name| std::env::var(name).ok());
    match HuggingFaceQna::new(&config.qna, api_key) {
        Ok(provider) => {
            tracing::info!("{}", logs::qna_ready(provider.url()));
            AnswerEngine::new(Arc::new(provider))
        }
        Err(e) => {
            tracing::error!("{}", logs::qna_init_fail(&e.to_string()));
            AnswerEngine::disabled()
        }
    }
}

/// Receive events one batch at a time; every event is handled on its own task so a slow
/// send never holds up the next update.
async fn run_event_loop(
    telegram: &TelegramService,
    router: Arc<ConversationRouter>,
    retry_delay: Duration,
) {
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut listening = true;
    let mut offset = 0;

    tracing::info!("{}", logs::POLLING_START);

    loop {
        let batch = tokio::select! {
            signal = &mut shutdown, if listening => {
                if shutdown_requested(signal, &mut listening) {
                    break;
                }
                continue;
            }
            batch = telegram.next_events(&mut offset) => batch,
        };

        match batch {
            Ok(events) => {
                for event in events {
                    let router = router.clone();
                    tokio::spawn(async move { router.route(event).await });
                }
            }
            Err(e) => {
                tracing::error!(
                    "{}",
                    logs::polling_fail(&e.to_string(), retry_delay.as_secs())
                );
                if pause_before_retry(&mut shutdown, &mut listening, retry_delay).await {
                    break;
                }
            }
        }
    }
}

/// Sleep for `delay` unless shutdown arrives first. Returns `true` when shutting down.
async fn pause_before_retry<S>(shutdown: &mut S, listening: &mut bool, delay: Duration) -> bool
where
    S: Future<Output = std::io::Result<()>> + Unpin,
{
    tokio::select! {
        signal = shutdown, if *listening => shutdown_requested(signal, listening),
        _ = tokio::time::sleep(delay) => false,
    }
}

/// A failed signal listener is disabled so the loop keeps serving without it.
fn shutdown_requested(signal: std::io::Result<()>, listening: &mut bool) -> bool {
    match signal {
        Ok(()) => {
            tracing::info!("{}", logs::SHUTDOWN);
            true
        }
        Err(e) => {
            tracing::error!("{}", logs::shutdown_fail(&e.to_string()));
            *listening = false;
            false
        }
    }
}
