//! Structured logging for the pre-colonial vegetation atlas
//!
//! # Features
//!
//! - **JSONL Output**: Structured JSON lines on stderr (default)
//! - **Pretty Output**: Human-readable console format for development
//! - **File Output**: JSONL to a daily, hourly or single file via tracing-appender
//! - **RUST_LOG**: Overrides the configured level when set
//!
//! # Quick Start
//!
//! ```ignore
//! use evc_logging::{AtlasSubscriberBuilder, LogConfig};
//!
//! // JSONL to stderr
//! let _guard = AtlasSubscriberBuilder::new().init()?;
//!
//! // Pretty output while developing
//! let _guard = AtlasSubscriberBuilder::new()
//!     .with_config(LogConfig::development())
//!     .init()?;
//! ```
//!
//! Keep the returned guard alive while logging to a file; dropping it
//! flushes the writer.

pub mod config;

pub use config::{ConsoleConfig, FileConfig, JsonlConfig, LogConfig, RotationStrategy};
pub use tracing_appender::non_blocking::WorkerGuard;

use std::fs::{self, File};

use thiserror::Error;
use tracing::Subscriber;
use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Errors setting up logging
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Failed to prepare log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Global subscriber already set: {0}")]
    AlreadyInitialized(String),
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Builder for configuring and initializing the atlas logging subscriber
///
/// By default console output uses JSONL. Use [`LogConfig::development()`]
/// for pretty output.
#[derive(Debug, Clone, Default)]
pub struct AtlasSubscriberBuilder {
    config: LogConfig,
}

impl AtlasSubscriberBuilder {
    /// Create a new subscriber builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific configuration
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.default_level = level.into();
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config.console.enabled = enabled;
        self
    }

    /// Configure file output
    pub fn with_file_output(mut self, config: FileConfig) -> Self {
        self.config.file = Some(config);
        self
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Build the subscriber without installing it
    ///
    /// # Errors
    ///
    /// Returns an error if the log directory or file cannot be created.
    pub fn build(
        &self,
    ) -> Result<(impl Subscriber + Send + Sync + 'static, Option<WorkerGuard>), LogError> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.config.default_level));

        let mut layers: Vec<BoxedLayer> = Vec::new();
        let mut guard = None;

        if self.config.console.enabled {
            if self.config.console.pretty {
                layers.push(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(self.config.console.ansi)
                        .with_target(true)
                        .with_writer(std::io::stderr)
                        .boxed(),
                );
            } else {
                layers.push(self.jsonl_layer(std::io::stderr));
            }
        }

        if let Some(file_config) = &self.config.file {
            let (writer, file_guard) = file_writer(file_config)?;
            layers.push(self.jsonl_layer(writer));
            guard = Some(file_guard);
        }

        let subscriber = Registry::default().with(layers).with(env_filter);
        Ok((subscriber, guard))
    }

    /// Install the subscriber globally
    ///
    /// # Errors
    ///
    /// Returns an error if file output cannot be prepared or a global
    /// subscriber has already been set.
    pub fn init(self) -> Result<Option<WorkerGuard>, LogError> {
        let (subscriber, guard) = self.build()?;
        subscriber
            .try_init()
            .map_err(|e| LogError::AlreadyInitialized(e.to_string()))?;
        Ok(guard)
    }

    fn jsonl_layer<W>(&self, writer: W) -> BoxedLayer
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let jsonl = &self.config.jsonl;
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(jsonl.include_spans)
            .flatten_event(jsonl.flatten_events)
            .with_file(jsonl.include_location)
            .with_line_number(jsonl.include_location)
            .with_writer(writer)
            .boxed()
    }
}

/// Non-blocking writer for the configured file, truncating single files
fn file_writer(config: &FileConfig) -> Result<(NonBlocking, WorkerGuard), LogError> {
    fs::create_dir_all(&config.directory)?;
    match config.rotation.appender_rotation() {
        Some(rotation) => {
            let appender = RollingFileAppender::new(rotation, &config.directory, &config.prefix);
            Ok(tracing_appender::non_blocking(appender))
        }
        None => {
            let file = File::create(config.single_file_path())?;
            Ok(tracing_appender::non_blocking(file))
        }
    }
}

/// Initialize logging for testing (minimal output, ignores repeat calls)
pub fn init_testing() {
    let _ = AtlasSubscriberBuilder::new()
        .with_config(LogConfig::testing())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creation() {
        let builder = AtlasSubscriberBuilder::new();
        assert_eq!(builder.config().default_level, "info");
        assert!(!builder.config().console.pretty); // JSONL by default
    }

    #[test]
    fn test_builder_with_config() {
        let builder = AtlasSubscriberBuilder::new().with_config(LogConfig::development());
        assert_eq!(builder.config().default_level, "debug");
        assert!(builder.config().console.pretty);
    }

    #[test]
    fn test_builder_overrides() {
        let builder = AtlasSubscriberBuilder::new()
            .with_level("trace")
            .with_console(false)
            .with_file_output(FileConfig::new("logs"));
        assert_eq!(builder.config().default_level, "trace");
        assert!(!builder.config().console.enabled);
        assert!(builder.config().file.is_some());
    }

    #[test]
    fn test_console_only_has_no_guard() {
        let (_subscriber, guard) = AtlasSubscriberBuilder::new().build().unwrap();
        assert!(guard.is_none());
    }

    #[test]
    fn test_file_output_writes_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let file_config =
            FileConfig::new(dir.path().join("nested")).with_rotation(RotationStrategy::Never);
        let path = file_config.single_file_path();

        let (subscriber, guard) = AtlasSubscriberBuilder::new()
            .with_console(false)
            .with_level("info")
            .with_file_output(file_config)
            .build()
            .unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(code = "132", count = 7, "Plants loaded");
            tracing::debug!("filtered out");
        });
        drop(guard);

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);

        let event: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(event["message"], "Plants loaded");
        assert_eq!(event["code"], "132");
        assert_eq!(event["count"], 7);
        assert_eq!(event["level"], "INFO");
    }

    #[test]
    fn test_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"").unwrap();

        let result = AtlasSubscriberBuilder::new()
            .with_file_output(FileConfig::new(blocker.join("logs")))
            .build();
        assert!(matches!(result, Err(LogError::Io(_))));
    }
}
