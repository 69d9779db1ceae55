// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Log initialization.
//!
//! Every balance read and transaction hash is written as one timestamped
//! line to the configured log file. Warnings are echoed to stderr as well;
//! errors are not, since the binary prints the returned error itself.

use std::fs;
use std::path::Path;

use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    filter::filter_fn, fmt, fmt::MakeWriter, prelude::*, registry::LookupSpan, EnvFilter, Layer,
};

use crate::config::{LogFormat, LoggingConfig};

/// Error type for logging setup.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to prepare log file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Install the global subscriber.
///
/// Returns a guard that must be kept alive until exit; dropping it flushes
/// buffered lines to the file.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard, LoggingError> {
    let (writer, guard) = file_writer(&config.file)?;

    build_subscriber(config, writer, std::io::stderr)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(guard)
}

/// Non-blocking appender for `path`, creating parent directories.
///
/// The file is never rotated; new lines are appended.
pub fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard), LoggingError> {
    let io_err = |source| LoggingError::Io {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_err)?;

    let file_name = path.file_name().ok_or_else(|| {
        io_err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "log path has no file name",
        ))
    })?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Subscriber with a file layer and a console layer for warnings.
pub fn build_subscriber<W>(
    config: &LoggingConfig,
    writer: NonBlocking,
    console: W,
) -> impl Subscriber + Send + Sync + for<'a> LookupSpan<'a>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(writer)
            .boxed(),
    };

    let console_layer = fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(console)
        .with_filter(filter_fn(|meta| *meta.level() == Level::WARN));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
}
