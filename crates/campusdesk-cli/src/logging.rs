//! Tracing bootstrap for the `campusdesk` binary.
//!
//! Console output goes to stderr so `--json` output on stdout stays clean.
//! The optional log file rolls daily under the data directory.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use campusdesk_core::config::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Overrides both the console and the file filter.
pub const LOG_ENV: &str = "RUST_LOG";

const LOG_FILE_PREFIX: &str = "campusdesk.log";

/// Keeps the background file writer alive; dropping it flushes pending lines.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

fn filter_or(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::try_new(fallback).unwrap_or_else(|_| EnvFilter::new("info")))
}

pub fn init(settings: &LoggingSettings, log_dir: &Path, verbose: bool) -> Result<LogGuard> {
    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter_or(if verbose { "debug" } else { "warn" }));

    let (file_layer, guard) = if settings.file {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
        let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter_or(&settings.level));
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(LogGuard { _file: guard })
}
