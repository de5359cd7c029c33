//! Process-wide `tracing` setup: JSON lines to a rolling file under
//! `logging.dir`, with warnings mirrored to stderr.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};
use uuid::Uuid;

use crate::config::{Config, LoggingConfig, LoggingRotation};

const LOG_FILE_PREFIX: &str = "budget";
const LOG_FILE_SUFFIX: &str = "log";

/// Dropping the guard flushes buffered lines and stops the writer thread.
#[must_use = "logs stop being written once the guard is dropped"]
pub struct LoggingGuard {
    _writer: WorkerGuard,
}

impl From<LoggingRotation> for Rotation {
    fn from(rotation: LoggingRotation) -> Self {
        match rotation {
            LoggingRotation::Daily => Rotation::DAILY,
            LoggingRotation::Hourly => Rotation::HOURLY,
        }
    }
}

pub fn init_tracing(config: &Config) -> Result<LoggingGuard> {
    let logging = &config.logging;
    let filter = file_filter(&logging.filter)?;
    let log_dir = std::path::absolute(&logging.dir)
        .with_context(|| format!("cannot resolve logging.dir {}", logging.dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(rolling_appender(&log_dir, logging)?);

    // The only spans are the per-request ones opened by the HTTP trace layer,
    // so the innermost span is enough context for each line.
    let file_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .with_span_list(false)
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter);
    let stderr_layer = logging.stderr_warn_enabled.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(LevelFilter::WARN)
    });

    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    tracing::info!(
        target: "logging",
        run_id = %Uuid::now_v7(),
        log_dir = %log_dir.display(),
        rotation = ?logging.rotation,
        retained_files = retained_file_count(logging),
        host = %config.server.host,
        port = config.server.port,
        serves_static = config.server.static_dir.is_some(),
        cors_allow_any = config.server.cors_allow_any,
        "logging_initialized"
    );

    Ok(LoggingGuard { _writer: guard })
}

fn file_filter(directives: &str) -> Result<EnvFilter> {
    if directives.trim().is_empty() {
        bail!("logging.filter cannot be empty");
    }
    EnvFilter::try_new(directives)
        .with_context(|| format!("invalid logging.filter '{directives}'"))
}

/// Files are named `budget.<period>.log`; the appender deletes the oldest
/// once more than `retained_file_count` exist.
fn rolling_appender(log_dir: &Path, logging: &LoggingConfig) -> Result<RollingFileAppender> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create logging directory {}", log_dir.display()))?;
    RollingFileAppender::builder()
        .rotation(logging.rotation.clone().into())
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(retained_file_count(logging))
        .build(log_dir)
        .with_context(|| format!("failed to open log file in {}", log_dir.display()))
}

/// `retention_days` expressed in rotation periods, never less than one file.
fn retained_file_count(logging: &LoggingConfig) -> usize {
    let files_per_day = match logging.rotation {
        LoggingRotation::Daily => 1,
        LoggingRotation::Hourly => 24,
    };
    logging.retention_days.saturating_mul(files_per_day).max(1)
}
