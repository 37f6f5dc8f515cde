//! # Telemetry
//!
//! Process-wide tracing setup: a compact console layer, a shared rolling
//! file that receives every event, and an application-only rolling file
//! filtered to the workspace's own crates. Initialization is idempotent:
//! a second call is a no-op, so a single event is never written twice to
//! the same sink.

use anyhow::Result;
use std::path::Path;
use std::sync::OnceLock;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// How many rotated files each sink retains.
const MAX_LOG_FILES: usize = 5;

// Dropping the guards would lose buffered log lines, so they live for the
// whole process.
static GUARDS: OnceLock<Vec<WorkerGuard>> = OnceLock::new();

fn rolling_appender(log_dir: &Path, prefix: &str) -> Result<RollingFileAppender> {
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir)?)
}

/// Initializes the global subscriber. Safe to call more than once.
pub fn init(log_dir: impl AsRef<Path>) -> Result<()> {
    if GUARDS.get().is_some() {
        return Ok(());
    }
    let log_dir = log_dir.as_ref();

    let (common_writer, common_guard) =
        tracing_appender::non_blocking(rolling_appender(log_dir, "common")?);
    let (app_writer, app_guard) =
        tracing_appender::non_blocking(rolling_appender(log_dir, "tablechat")?);

    let console_layer = fmt::layer().compact().with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );
    let common_layer = fmt::layer()
        .with_writer(common_writer)
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);
    let app_layer = fmt::layer()
        .with_writer(app_writer)
        .with_ansi(false)
        .with_filter(
            Targets::new()
                .with_target("tablechat", LevelFilter::DEBUG)
                .with_target("tablechat_server", LevelFilter::DEBUG)
                .with_target("tablechat_cli", LevelFilter::DEBUG),
        );

    // try_init tolerates a subscriber installed earlier in the process
    // (e.g. by a test harness).
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(common_layer)
        .with(app_layer)
        .try_init();

    let _ = GUARDS.set(vec![common_guard, app_guard]);
    Ok(())
}
