//! Log output for the widget.
//!
//! Compact lines on stderr by default. Setting `DESKTOP_COUNTDOWN_LOG_FORMAT=json`
//! switches to JSON lines; `RUST_LOG` replaces the level filter.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable selecting the log line format.
pub const LOG_FORMAT_ENV: &str = "DESKTOP_COUNTDOWN_LOG_FORMAT";

const WORKSPACE_TARGETS: [&str; 2] = ["countdown_core", "desktop_countdown"];

#[derive(Debug, Error)]
#[error("failed to set global tracing subscriber: {0}")]
pub struct TracingError(#[from] tracing::subscriber::SetGlobalDefaultError);

/// How each log line is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// `json` in any case selects JSON lines, anything else is compact.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Compact
        }
    }

    fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level for the workspace crates when `RUST_LOG` is unset.
    pub level: Level,
    pub format: LogFormat,
    pub include_location: bool,
    pub include_timestamp: bool,
}

impl TracingConfig {
    /// Release builds: info level, timestamps, no source locations.
    #[must_use]
    pub fn widget() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::from_env(),
            include_location: false,
            include_timestamp: true,
        }
    }

    /// Debug builds: debug level with file and line, no timestamps.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: Level::DEBUG,
            format: LogFormat::from_env(),
            include_location: true,
            include_timestamp: false,
        }
    }
}

/// Installs the global subscriber. Call once, before anything logs.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.level)));

    let layer = match config.format {
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_file(config.include_location)
                .with_line_number(config.include_location);
            if config.include_timestamp {
                layer.boxed()
            } else {
                layer.without_time().boxed()
            }
        }
        LogFormat::Json => fmt::layer()
            .json()
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(env_filter).with(layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn default_directive(level: Level) -> String {
    WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
