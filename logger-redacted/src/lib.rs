//! Structured logging with automatic credential and PII redaction
//!
//! The session engine handles bearer tokens, refresh tokens and user email
//! addresses. None of them may reach a log sink in clear text. This crate
//! provides:
//!
//! - [`init_tracing`]: installs the `tracing` subscriber used by binaries
//! - [`PiiRedactor`] and [`redact`]: regex-based redaction of emails,
//!   bearer credentials and JWT-shaped tokens, with optional hash-based
//!   correlation so the same value redacts to the same marker
//! - `redacted_info!` / `redacted_warn!`: log macros that redact the
//!   formatted message
//!
//! # Example
//!
//! ```rust
//! use logger_redacted::redact;
//!
//! let line = redact("login attempt for admin@x.com with Bearer t1");
//! assert!(!line.contains("admin@x.com"));
//! assert!(line.contains("Bearer [REDACTED]"));
//! ```

pub mod config;
pub mod macros;
pub mod redactor;

pub use config::*;
pub use redactor::*;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Keeps the background file writer alive; drop it at process exit to flush
#[must_use = "dropping the guard stops the file writer"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global `tracing` subscriber described by `config`
///
/// `RUST_LOG` overrides `config.log_level` when set.
///
/// # Errors
///
/// Fails when the filter directive does not parse or a subscriber is
/// already installed.
pub fn init_tracing(config: &LoggerConfig) -> Result<LoggingGuard, LoggerError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| LoggerError::InvalidFilter(e.to_string()))?,
    };

    let (writer, file_guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{}.log", config.service_name));
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(config.service_name.clone(), writer))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(writer))
            .try_init()
    };

    result.map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

    Ok(LoggingGuard { _file_guard: file_guard })
}
