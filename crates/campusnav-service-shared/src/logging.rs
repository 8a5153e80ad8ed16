//! Structured logging setup for campus navigation services.
//!
//! Environment variables read by [`LoggingConfig::from_env`]:
//!
//! - `LOG_FORMAT`: `json` (default) or `text`/`pretty`
//! - `RUST_LOG`: level filter (default `info`)
//! - `SERVICE_NAME`: service name recorded on startup
//!
//! ```no_run
//! use campusnav_service_shared::logging::{init_logging, LoggingConfig};
//!
//! let config = LoggingConfig::from_env().with_service("route");
//! init_logging(&config);
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Text,
}

impl LogFormat {
    /// Parse a format name. Unrecognised names fall back to `Json`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Fallback filter when `RUST_LOG` is not a valid directive.
    pub level: String,
    pub service: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
            service: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let format = std::env::var("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let service = std::env::var("SERVICE_NAME")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self {
            format,
            level,
            service,
        }
    }

    /// Set the service name unless `SERVICE_NAME` already provided one.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        if self.service.is_none() {
            self.service = Some(service.into());
        }
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Install the global tracing subscriber.
///
/// Returns `false` when a subscriber was already installed (for example by a
/// test harness); the existing one is left in place.
///
/// JSON output looks like:
///
/// ```json
/// {"timestamp":"2026-03-02T10:00:00Z","level":"INFO","fields":{"message":"snapshot swapped","generation":1},"target":"campusnav_lib::snapshot"}
/// ```
pub fn init_logging(config: &LoggingConfig) -> bool {
    let registry = tracing_subscriber::registry().with(config.filter());

    let installed = match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).try_init().is_ok(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init()
            .is_ok(),
    };

    if installed {
        tracing::info!(
            service = config.service.as_deref().unwrap_or("campusnav"),
            format = ?config.format,
            "logging initialised"
        );
    }
    installed
}
