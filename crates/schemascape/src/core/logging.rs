//! Logging infrastructure for schema processing
//!
//! Structured logging through `tracing`. Parsers emit `warn!` events for
//! statements they skip, the normalizer emits them for references it drops,
//! and every pipeline stage opens a span so a slow layout or a noisy parse
//! can be isolated with a filter.
//!
//! # Usage
//!
//! ```rust,no_run
//! use schemascape::core::logging::init_logging;
//!
//! // Initialize with default settings
//! init_logging(None, None).ok();
//!
//! // Or with custom level and format
//! init_logging(Some("debug"), Some("pretty")).ok();
//! ```
//!
//! # Log Formats
//!
//! - `compact`: Single-line format, good for production
//! - `pretty`: Multi-line format with colors, good for development
//! - `json`: JSON format, good for log aggregation systems
//!
//! # Environment Variables
//!
//! - `SCHEMASCAPE_LOG_LEVEL`: Set log level (trace|debug|info|warn|error|off)
//! - `SCHEMASCAPE_LOG_FORMAT`: Set log format (compact|pretty|json)
//! - `RUST_LOG`: Standard tracing-subscriber filter, used when the above is unset
//!
//! # Filtering Logs
//!
//! ```bash
//! # Only the SQL parser at debug level
//! RUST_LOG="schemascape::plugins::sql=debug" schemascape parse schema.sql
//!
//! # Everything at info, the force-directed layout at trace
//! RUST_LOG="info,schemascape::layout::force=trace" schemascape layout schema.sql
//! ```
//!
//! In WASM builds events go to the browser console through `tracing-wasm`;
//! the level and format arguments are ignored there.

use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

#[cfg(target_arch = "wasm32")]
use tracing_wasm::WASMLayerConfig;

pub const LOG_LEVEL_ENV: &str = "SCHEMASCAPE_LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "SCHEMASCAPE_LOG_FORMAT";

const DEFAULT_LEVEL: &str = "info";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Pick the filter directive: explicit argument, then `SCHEMASCAPE_LOG_LEVEL`,
/// then `RUST_LOG`, then `info`.
pub fn resolve_level(level: Option<&str>) -> String {
    level
        .map(|s| s.to_string())
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Pick the output format: explicit argument, then `SCHEMASCAPE_LOG_FORMAT`,
/// then compact.
pub fn resolve_format(format: Option<&str>) -> Result<LogFormat, String> {
    match format
        .map(|s| s.to_string())
        .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
    {
        Some(name) => LogFormat::from_str(&name).map_err(|e| format!("Invalid log format: {}", e)),
        None => Ok(LogFormat::default()),
    }
}

/// Initialize the tracing subscriber with the given log level and format
///
/// Returns an error if the format is unknown or a global subscriber is
/// already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = (level, format);
        tracing_wasm::set_as_global_default_with_config(WASMLayerConfig::default());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let log_level = resolve_level(level);
        let filter = if log_level == "off" {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
        };

        match resolve_format(format)? {
            LogFormat::Compact => {
                Registry::default()
                    .with(filter)
                    .with(
                        fmt::Layer::default()
                            .with_writer(std::io::stderr)
                            .with_target(false)
                            .with_level(true)
                            .with_file(false)
                            .with_line_number(false)
                            .with_span_events(FmtSpan::NONE),
                    )
                    .try_init()?;
            }
            LogFormat::Pretty => {
                Registry::default()
                    .with(filter)
                    .with(
                        fmt::Layer::default()
                            .with_writer(std::io::stderr)
                            .with_target(true)
                            .with_level(true)
                            .with_file(true)
                            .with_line_number(true)
                            .with_span_events(FmtSpan::ACTIVE)
                            .pretty(),
                    )
                    .try_init()?;
            }
            LogFormat::Json => {
                Registry::default()
                    .with(filter)
                    .with(
                        fmt::Layer::default()
                            .with_writer(std::io::stderr)
                            .with_target(true)
                            .with_level(true)
                            .with_file(true)
                            .with_line_number(true)
                            .with_span_events(FmtSpan::ACTIVE)
                            .json(),
                    )
                    .try_init()?;
            }
        }

        Ok(())
    }
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
