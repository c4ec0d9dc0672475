//! Tracing subscriber setup for the `taskboard` binary.
//!
//! Filter precedence: `TASKBOARD_LOG` environment variable, then `--verbose`
//! (debug), then `[logging].level`. Output goes to stderr, or to
//! `[logging].file` through a non-blocking writer.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LOG_ENV_VAR, LoggingSection};

/// Filter to use given the config and CLI flags, ignoring the environment.
pub fn default_directive(config: &LoggingSection, verbose: bool) -> String {
    if verbose {
        "debug".to_string()
    } else {
        config.level.clone()
    }
}

fn build_filter(config: &LoggingSection, verbose: bool) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV_VAR) {
        return Ok(filter);
    }
    let directive = default_directive(config, verbose);
    EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{}'", directive))
}

/// Install the global subscriber.
///
/// The returned guard flushes the log file when dropped; keep it alive
/// until the program exits.
pub fn init(config: &LoggingSection, verbose: bool) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(config, verbose)?;

    let (writer, guard) = match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (tracing_subscriber::fmt::writer::BoxMakeWriter::new(writer), Some(guard))
        }
        None => (
            tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stderr),
            None,
        ),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(config.file.is_none());

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}
