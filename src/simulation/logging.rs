//! Logging and tracing configuration
//!
//! Centralized `tracing-subscriber` setup for the simulator binary.

use std::io;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Boxed error returned by subscriber initialization
pub type LoggingInitError = Box<dyn std::error::Error + Send + Sync>;

/// Prefix of the daily rolling log files
pub const LOG_FILE_PREFIX: &str = "lounge-attendant-simulator";

/// Logging configuration
///
/// Console output is always pretty-printed to stderr. When a directory is
/// set, JSON lines are also written to a daily rolling file there.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the crate's own targets
    pub level: Level,
    /// Directory for rolling log files
    pub log_directory: Option<String>,
    /// Whether span open/close events are logged
    pub enable_span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: Level::INFO, log_directory: None, enable_span_events: false }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Also write JSON logs under `directory`
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_directory = Some(directory.into());
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), self.level)
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Initialize the global tracing subscriber
    ///
    /// Fails if a global subscriber is already installed.
    pub fn init(self) -> Result<(), LoggingInitError> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()));

        let (file_layer, file_guard) = match &self.log_directory {
            Some(dir) => {
                let (writer, guard) = non_blocking(rolling::daily(dir, LOG_FILE_PREFIX));
                let layer =
                    fmt::layer().json().with_writer(writer).with_span_events(self.span_events());
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        let console_layer =
            fmt::layer().pretty().with_writer(io::stderr).with_span_events(self.span_events());

        Registry::default().with(env_filter).with(file_layer).with(console_layer).try_init()?;

        // The writer flushes on drop; it must outlive the process
        if let Some(guard) = file_guard {
            std::mem::forget(guard);
        }

        info!(level = %self.level, to_file = self.log_directory.is_some(), "logging initialized");
        Ok(())
    }

    /// Initialize verbose logging (INFO level with span events)
    pub fn init_verbose() -> Result<(), LoggingInitError> {
        Self::new().with_level(Level::INFO).with_span_events().init()
    }

    /// Initialize debug logging (DEBUG level with span events)
    pub fn init_debug() -> Result<(), LoggingInitError> {
        Self::new().with_level(Level::DEBUG).with_span_events().init()
    }
}

/// Structured log event tagged with the simulation component
#[macro_export]
macro_rules! sim_event {
    ($level:ident, $message:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::$level!(
            message = $message,
            component = "simulation",
            $($key = $value,)*
        );
    };
    ($level:ident, $message:expr) => {
        tracing::$level!(
            message = $message,
            component = "simulation",
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::new();
        assert_eq!(config.level, Level::INFO);
        assert!(config.log_directory.is_none());
        assert!(!config.enable_span_events);
        assert_eq!(config.span_events(), FmtSpan::NONE);
    }

    #[test]
    fn test_logging_config_builder() {
        let config = LoggingConfig::new()
            .with_level(Level::DEBUG)
            .with_file_logging("lounge_logs")
            .with_span_events();

        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.log_directory.as_deref(), Some("lounge_logs"));
        assert_eq!(config.span_events(), FmtSpan::NEW | FmtSpan::CLOSE);
    }

    #[test]
    fn test_default_directive_targets_crate() {
        let config = LoggingConfig::new().with_level(Level::DEBUG);
        assert_eq!(config.default_directive(), "lounge_attendant_simulator=DEBUG");
    }
}
