//! Logging for the CareLog engine with automatic PII redaction
//!
//! Two pieces:
//!
//! - [`init_logging`] installs the global `tracing` subscriber (env-filter plus a
//!   pretty or JSON formatter on stderr) from a [`LoggerConfig`].
//! - [`redact`] scrubs emails and phone numbers from a string before it is
//!   attached to a log event. Values are replaced by a short SHA-256 token so the
//!   same address can still be correlated across lines.
//!
//! Field-encrypted data never reaches a log line in plaintext; callers that must
//! mention an identifier pass it through [`redact`] first.
//!
//! # Example
//!
//! ```rust
//! use logger_redacted::redact;
//!
//! let line = redact("login failed for alice@x.com");
//! assert!(!line.contains("alice@x.com"));
//! ```

pub mod config;
pub mod redactor;

pub use config::*;
pub use redactor::*;

use error_common::CarelogError;
use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

lazy_static! {
    static ref DEFAULT_REDACTOR: PiiRedactor = PiiRedactor::default();
}

static REDACTION_ENABLED: AtomicBool = AtomicBool::new(true);

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Global logger already initialised: {0}")]
    AlreadyInitialized(String),
}

impl From<LoggerError> for CarelogError {
    fn from(err: LoggerError) -> Self {
        CarelogError::Configuration(err.to_string())
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level` when set.
pub fn init_logging(config: &LoggerConfig) -> Result<(), LoggerError> {
    REDACTION_ENABLED.store(config.redaction_enabled, Ordering::Relaxed);

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| LoggerError::InvalidFilter {
            filter: config.level.clone(),
            reason: e.to_string(),
        })?,
    };

    let result = match config.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init(),
    };

    result.map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}

/// Redact PII from `text` with the default redactor.
///
/// Returns the input unchanged when redaction was disabled via
/// [`LoggerConfig::redaction_enabled`].
pub fn redact(text: &str) -> String {
    if REDACTION_ENABLED.load(Ordering::Relaxed) {
        DEFAULT_REDACTOR.redact(text)
    } else {
        text.to_string()
    }
}
