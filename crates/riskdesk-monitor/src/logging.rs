//! Logging setup.

use std::path::Path;
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use tracing_appender::non_blocking::WorkerGuard;

/// Setup logging with the given level.
///
/// Console output goes to stderr so command output on stdout stays clean.
/// When `file` is set, events are also appended to that file; keep the
/// returned guard alive until exit or buffered lines are lost.
pub fn setup_logging(level: &str, json: bool, file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let (file_writer, guard) = match file.and_then(open_log_file) {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };
    let file_layer = file_writer.map(|writer| fmt::layer().with_writer(writer).with_ansi(false));

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }

    guard
}

fn open_log_file(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    let file_name = path.file_name()?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let appender = tracing_appender::rolling::never(dir, file_name);
    Some(tracing_appender::non_blocking(appender))
}
