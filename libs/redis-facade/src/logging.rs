//! Logging setup for programs built on the facade

use crate::error::{FacadeError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `redis_facade=debug,warn`
    pub level: String,
    /// Console output format
    pub format: LogFormat,
    /// Enable ANSI colors in console output
    pub ansi: bool,
    /// Also write to a daily-rolling file at this path
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            ansi: true,
            file: None,
        }
    }
}

impl LogConfig {
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    fn filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.level)
            .map_err(|e| FacadeError::config(format!("Invalid log level '{}': {}", self.level, e)))
    }
}

/// Install the global subscriber
///
/// Returns the file writer guard when file output is enabled; keep it alive
/// for as long as logs should be flushed.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let mut layers = Vec::new();

    let console = match config.format {
        LogFormat::Json => fmt::layer().json().with_target(true).boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_ansi(config.ansi)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_ansi(config.ansi)
            .with_target(true)
            .boxed(),
    };
    layers.push(console.with_filter(config.filter()?).boxed());

    let mut guard = None;
    if let Some(path) = &config.file {
        let (dir, file_name) = split_log_path(path)?;
        std::fs::create_dir_all(&dir).map_err(|e| {
            FacadeError::config(format!("Cannot create log directory {}: {}", dir.display(), e))
        })?;

        let appender = tracing_appender::rolling::daily(&dir, file_name);
        let (writer, file_guard) = tracing_appender::non_blocking(appender);
        guard = Some(file_guard);

        let file_layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_filter(config.filter()?)
            .boxed();
        layers.push(file_layer);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| FacadeError::config(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}

/// Initialize logging for tests
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            FacadeError::config(format!("Log file path has no file name: {}", path.display()))
        })?
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}
