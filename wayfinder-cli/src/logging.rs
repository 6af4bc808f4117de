//! Structured logging for the wayfinder binary.
//!
//! Diagnostics go to stderr so the rendered summary on stdout stays clean.
//! `RUST_LOG` selects the filter; without it only wayfinder's own crates log
//! at `info` and everything else at `warn`. `WAYFINDER_LOG_FORMAT` picks
//! `human` (default) or `json` output. Span close events carry their timing,
//! which is how map loading and route searches are measured.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, filter::ParseError, fmt::format::FmtSpan, layer::SubscriberExt,
};

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "WAYFINDER_LOG_FORMAT";

/// Environment variable holding filter directives.
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

/// Directives used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str =
    "warn,wayfinder_core=info,wayfinder_cli=info,wayfinder_providers_text=info";

static INSTALLED: OnceLock<LogFormat> = OnceLock::new();

/// Output format of the installed subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// One JSON object per event, including the current span and span list.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

/// Errors raised while installing structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// An environment variable held invalid UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// `WAYFINDER_LOG_FORMAT` named an unknown format.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Normalised value supplied by the user.
        provided: String,
    },
    /// `RUST_LOG` held directives that do not parse.
    #[error("invalid filter directives in `RUST_LOG`: {source}")]
    InvalidFilter {
        /// Parse failure reported by `tracing_subscriber`.
        #[source]
        source: ParseError,
    },
    /// Another global subscriber was already installed.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing`.
        #[source]
        source: tracing::subscriber::SetGlobalDefaultError,
    },
    /// Another `log` logger was already installed.
    #[error("failed to bridge the `log` facade: {source}")]
    BridgeFailed {
        /// Error raised by the `log` crate.
        #[source]
        source: tracing_log::log::SetLoggerError,
    },
}

/// Installs the global subscriber on first call and returns the chosen
/// format. Later calls return the format installed first.
///
/// # Errors
/// Returns [`LoggingError`] when either environment variable is invalid or a
/// global subscriber or `log` logger is already installed.
pub fn init_logging() -> Result<LogFormat, LoggingError> {
    if let Some(format) = INSTALLED.get() {
        return Ok(*format);
    }

    let format = format_from(env::var(LOG_FORMAT_ENV))?;
    let filter = filter_from(env::var(LOG_FILTER_ENV))?;
    install(format, filter)?;
    Ok(*INSTALLED.get_or_init(|| format))
}

fn install(format: LogFormat, filter: EnvFilter) -> Result<(), LoggingError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let fmt_layer = match format {
        LogFormat::Human => fmt_layer.compact().boxed(),
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|source| LoggingError::InstallFailed { source })?;
    LogTracer::init().map_err(|source| LoggingError::BridgeFailed { source })
}

fn format_from(raw: Result<String, env::VarError>) -> Result<LogFormat, LoggingError> {
    match raw {
        Ok(value) => value.parse(),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(source) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
            source,
        }),
    }
}

fn filter_from(raw: Result<String, env::VarError>) -> Result<EnvFilter, LoggingError> {
    let directives = match raw {
        Ok(value) if !value.trim().is_empty() => value,
        Ok(_) | Err(env::VarError::NotPresent) => DEFAULT_FILTER.to_owned(),
        Err(source) => {
            return Err(LoggingError::InvalidUnicode {
                name: LOG_FILTER_ENV,
                source,
            });
        }
    };
    EnvFilter::try_new(directives).map_err(|source| LoggingError::InvalidFilter { source })
}
