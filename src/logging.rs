//! # Structured Logging
//!
//! Provides structured logging via the `tracing` ecosystem. The link core
//! itself only emits events (enqueue, delivery, retransmit hold); this
//! module is the host-side setup that turns those events into output.
//!
//! - Multiple output formats (JSON, Pretty, Compact)
//! - Log level filtering, overridable via `RUST_LOG`
//! - One-shot global initialization
//!
//! ## Example
//!
//! ```rust,ignore
//! use secded_link::logging::{init_logging, LogConfig, LogLevel};
//!
//! let config = LogConfig {
//!     level: LogLevel::Debug,
//!     ..Default::default()
//! };
//! init_logging(&config);
//!
//! tracing::info!(depth = 16, "link ready");
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level (most verbose; includes per-tick events)
    Trace,
    /// Debug level (protocol decisions: rejects, nacks)
    Debug,
    /// Info level (default)
    #[default]
    Info,
    /// Warning level
    Warn,
    /// Error level (least verbose)
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (machine-readable)
    Json,
    /// Pretty format (human-readable, colored)
    #[default]
    Pretty,
    /// Compact format (minimal, one line per event)
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include source location (file:line)
    pub source_location: bool,
    /// Module filter (e.g., "secded_link=trace")
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            source_location: false,
            filter: None,
        }
    }
}

impl LogConfig {
    /// Development configuration (verbose, pretty, with locations).
    pub fn development() -> Self {
        Self {
            level: LogLevel::Trace,
            source_location: true,
            ..Default::default()
        }
    }

    /// Quiet configuration (errors only).
    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Error,
            format: LogFormat::Compact,
            ..Default::default()
        }
    }
}

/// Initialize the global logging subscriber.
///
/// Should be called once at application startup; subsequent calls are
/// silently ignored. The filter is taken from the explicit `filter`
/// string if present, else the `RUST_LOG` environment variable, else the
/// configured level.
pub fn init_logging(config: &LogConfig) {
    let filter = if let Some(ref custom) = config.filter {
        EnvFilter::try_new(custom)
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
    };

    let result = match config.format {
        LogFormat::Json => {
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .json()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            );
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Pretty => {
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .pretty()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            );
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .compact()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            );
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    // A subscriber may already be installed (tests, embedding hosts)
    let _ = result;
}
