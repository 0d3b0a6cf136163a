//! Logging setup.
//!
//! The terminal belongs to the UI, so all output goes to a daily-rotated
//! file under `<data_local_dir>/sprintdeck/logs/`. `RUST_LOG` overrides the
//! default filter, e.g. `RUST_LOG=sprintdeck=debug`. `settings.log_format`
//! picks plain text or JSON lines.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*, registry::LookupSpan, Layer};

use crate::config::LogFormat;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "sprintdeck=info,warn";

/// File name prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "sprintdeck.log";

/// Install the global subscriber writing `format` lines to `dir`, or to the
/// default log directory when `None`. Returns the directory in use.
pub fn init(dir: Option<&Path>, format: LogFormat) -> anyhow::Result<PathBuf> {
    let log_dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => default_log_directory()?,
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let subscriber = tracing_subscriber::registry()
        .with(file_layer(format, file_appender))
        .with(filter_from(std::env::var("RUST_LOG").ok().as_deref()));

    tracing::subscriber::set_global_default(subscriber)
        .context("installing the tracing subscriber")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), ?format, "sprintdeck starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(log_dir)
}

/// The fmt layer for the log file in the configured format.
fn file_layer<S>(format: LogFormat, writer: RollingFileAppender) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Build the filter from a `RUST_LOG`-style directive, falling back to
/// [`DEFAULT_LOG_FILTER`].
fn filter_from(directive: Option<&str>) -> EnvFilter {
    directive
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// `<data_local_dir>/sprintdeck/logs`.
pub fn default_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir =
        dirs::data_local_dir().context("could not determine the local data directory")?;
    Ok(base_dir.join("sprintdeck").join("logs"))
}

/// Record a clean shutdown.
pub fn shutdown() {
    tracing::info!("sprintdeck shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_directory_layout() {
        if let Ok(dir) = default_log_directory() {
            assert!(dir.ends_with("sprintdeck/logs"));
        }
    }

    #[test]
    fn test_filter_falls_back_to_default() {
        assert_eq!(filter_from(None).to_string(), EnvFilter::new(DEFAULT_LOG_FILTER).to_string());
        assert_eq!(
            filter_from(Some("  ")).to_string(),
            EnvFilter::new(DEFAULT_LOG_FILTER).to_string()
        );
    }

    #[test]
    fn test_json_format_writes_objects() {
        let dir = tempfile::tempdir().unwrap();
        let appender = RollingFileAppender::new(Rotation::NEVER, dir.path(), "test.log");
        let subscriber = tracing_subscriber::registry().with(file_layer(LogFormat::Json, appender));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(board = 7, "Fetched sprints");
        });

        let written = std::fs::read_to_string(dir.path().join("test.log")).unwrap();
        let line = written.lines().next().unwrap();
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(event["fields"]["message"], "Fetched sprints");
        assert_eq!(event["fields"]["board"], 7);
    }

    #[test]
    fn test_text_format_writes_plain_lines() {
        let dir = tempfile::tempdir().unwrap();
        let appender = RollingFileAppender::new(Rotation::NEVER, dir.path(), "test.log");
        let subscriber = tracing_subscriber::registry().with(file_layer(LogFormat::Text, appender));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(board = 7, "Fetched sprints");
        });

        let written = std::fs::read_to_string(dir.path().join("test.log")).unwrap();
        assert!(written.contains("Fetched sprints board=7"));
        assert!(!written.trim_start().starts_with('{'));
    }

    #[test]
    fn test_filter_uses_directive() {
        let filter = filter_from(Some("sprintdeck=debug"));
        assert!(filter.to_string().contains("sprintdeck=debug"));
    }
}
