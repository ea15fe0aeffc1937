//! Logging initialisation for d3gem.
//!
//! Installs a global `tracing` subscriber writing to `stderr`, so that the
//! gem report on `stdout` stays clean.

use std::env;
use std::io;
use std::io::IsTerminal;
use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

const LOG_FORMAT_ENV: &str = "D3GEM_LOG_FORMAT";
const LOG_LEVEL_DEFAULT: &str = "warn";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log format variable contained invalid UTF-8 data.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying failure.
        #[source]
        source: env::VarError,
    },

    /// Unsupported log format requested via `D3GEM_LOG_FORMAT`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Raw value supplied by the user.
        provided: String,
    },

    /// Failed to install the global tracing subscriber.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Installs global logging if it has not already been installed.
///
/// Logs are human-readable unless `D3GEM_LOG_FORMAT=json`. The log level is
/// taken from `RUST_LOG` and defaults to warnings.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    match install_subscriber() {
        // Someone else owns the global subscriber; keep theirs.
        Ok(()) | Err(LoggingError::InstallFailed {..}) => {}
        Err(error) => return Err(error),
    }

    let _ = INITIALISED.set(());

    Ok(())
}

fn install_subscriber() -> Result<(), LoggingError> {
    let use_json = match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => parse_log_format(&raw)?,
        Err(env::VarError::NotPresent) => false,
        Err(error @ env::VarError::NotUnicode(_)) => {
            return Err(LoggingError::InvalidUnicode {name: LOG_FORMAT_ENV, source: error});
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(LOG_LEVEL_DEFAULT));

    let fmt_layer = tracing_subscriber::fmt::layer()
    .with_span_events(FmtSpan::CLOSE)
    .with_ansi(io::stderr().is_terminal())
    .with_writer(io::stderr);

    let fmt_layer = if use_json {
        fmt_layer
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .boxed()
    }
    else {
        fmt_layer.boxed()
    };

    tracing_subscriber::registry()
    .with(env_filter)
    .with(fmt_layer)
    .try_init()
    .map_err(|source| LoggingError::InstallFailed {source})
}

fn parse_log_format(raw: &str) -> Result<bool, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" => Ok(false),
        "json" => Ok(true),
        other => Err(LoggingError::UnsupportedFormat {provided: other.to_string()}),
    }
}
