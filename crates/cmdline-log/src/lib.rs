//! Logging setup for cmdline programs.
//!
//! Logs always go to stderr so they never mix with command output.

use std::io::{self, IsTerminal};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable names.
pub mod vars {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    pub const CMDLINE_LOG_LEVEL: &str = "CMDLINE_LOG_LEVEL";
    /// Output format (`pretty`, `compact`, `json`).
    pub const CMDLINE_LOG_FORMAT: &str = "CMDLINE_LOG_FORMAT";
    /// Include source file and line (`true` or `1`).
    pub const CMDLINE_LOG_SOURCE: &str = "CMDLINE_LOG_SOURCE";
    /// Fallback level variable.
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Include source location.
    pub source_location: bool,
    /// `RUST_LOG` directives used when no level variable was given.
    pub directives: Option<String>,
}

/// Log level.
///
/// Defaults to `Error`: usage text already goes to stderr and warnings
/// would interleave with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    #[default]
    Error,
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
            LogLevel::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
            LogLevel::Info => tracing_subscriber::filter::LevelFilter::INFO,
            LogLevel::Warn => tracing_subscriber::filter::LevelFilter::WARN,
            LogLevel::Error => tracing_subscriber::filter::LevelFilter::ERROR,
        }
    }
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format.
    Pretty,
    /// Compact single-line format.
    #[default]
    Compact,
    /// JSON structured format.
    Json,
}

impl LogFormat {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// `CMDLINE_LOG_LEVEL` wins over `RUST_LOG`. A `RUST_LOG` that is not a
    /// bare level is kept as filter directives. Unparsable values keep the
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match lookup(vars::CMDLINE_LOG_LEVEL)
            .as_deref()
            .and_then(LogLevel::parse)
        {
            Some(level) => config.level = level,
            None => {
                let rust_log = lookup(vars::RUST_LOG).filter(|d| !d.trim().is_empty());
                if let Some(directives) = rust_log {
                    match LogLevel::parse(&directives) {
                        Some(level) => config.level = level,
                        None => config.directives = Some(directives),
                    }
                }
            }
        }

        if let Some(format) = lookup(vars::CMDLINE_LOG_FORMAT)
            .as_deref()
            .and_then(LogFormat::parse)
        {
            config.format = format;
        }

        if let Some(source) = lookup(vars::CMDLINE_LOG_SOURCE) {
            config.source_location = source.eq_ignore_ascii_case("true") || source == "1";
        }

        config
    }

    /// The filter string handed to `EnvFilter`.
    pub fn filter_directives(&self) -> String {
        match &self.directives {
            Some(directives) => directives.clone(),
            None => self.level.as_str().to_string(),
        }
    }
}

/// Initialize logging with the given configuration.
///
/// Directives that `EnvFilter` rejects fall back to the configured level.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::try_new(config.filter_directives())
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);
    let ansi = io::stderr().is_terminal();

    match config.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(io::stderr)
                    .with_ansi(ansi)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(io::stderr)
                    .with_ansi(ansi)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
    }
    .map_err(|e| LogError::InitError(e.to_string()))
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),
}
