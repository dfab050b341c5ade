//! Logging and tracing setup for the CLI.
//!
//! Console events go to stderr. JSONL events are also written to a
//! daily-rotated file through a non-blocking writer; the log location is
//! resolved from `DRAFTWISE_LOG_PATH`, then `DRAFTWISE_LOG_DIR`, then the
//! config file's `log_dir`, then the platform data directory. The returned
//! guard must stay alive for the life of the process so buffered events are
//! flushed on exit.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Resolved file-logging destination.
#[derive(Debug, Default)]
pub struct ObservabilityConfig {
    /// Explicit log file path (takes precedence over `log_dir`).
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated JSONL logs.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve from environment variables, falling back to the config
    /// file's `log_dir` and then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_path = std::env::var_os("DRAFTWISE_LOG_PATH").map(PathBuf::from);
        let log_dir = std::env::var_os("DRAFTWISE_LOG_DIR")
            .map(PathBuf::from)
            .or(config_log_dir)
            .or_else(|| {
                draftwise_core::config::user_data_local_dir()
                    .map(|dir| dir.join("logs").into_std_path_buf())
            });
        Self { log_path, log_dir }
    }
}

/// Build the log filter from CLI verbosity flags and the configured level.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` forces `error`, and each
/// `-v` steps past the config level: one for `debug`, two for `trace`.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// Returns the appender guard when file logging is active; dropping it
/// flushes and stops the background writer.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match file_writer(config)? {
        Some((writer, guard)) => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

fn file_writer(config: &ObservabilityConfig) -> anyhow::Result<Option<(NonBlocking, WorkerGuard)>> {
    if let Some(ref path) = config.log_path {
        let parent = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        return Ok(Some(tracing_appender::non_blocking(file)));
    }

    if let Some(ref dir) = config.log_dir {
        // Log file trouble should never block the command itself.
        if std::fs::create_dir_all(dir).is_err() {
            return Ok(None);
        }
        let appender = tracing_appender::rolling::daily(dir, "draftwise.jsonl");
        return Ok(Some(tracing_appender::non_blocking(appender)));
    }

    Ok(None)
}
