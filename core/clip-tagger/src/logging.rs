//! Tracing setup.
//!
//! The terminal belongs to the UI, so logs go to
//! `<data-local-dir>/clip-tagger/logs/clip-tagger.log`. Stderr is used only
//! when that directory can't be created.
//!
//! Level: `info`, or `RUST_LOG` when set. `CLIP_TAGGER_DEBUG_LOG=1` forces
//! `debug`.

use std::env;
use std::path::PathBuf;

use fs_err as fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEBUG_ENV: &str = "CLIP_TAGGER_DEBUG_LOG";
const LOG_FILE_NAME: &str = "clip-tagger.log";

pub fn log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("clip-tagger").join("logs"))
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES")
}

fn env_filter() -> EnvFilter {
    let debug_enabled = env::var(DEBUG_ENV)
        .map(|value| is_truthy(&value))
        .unwrap_or(false);
    if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Installs the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir().filter(|dir| fs::create_dir_all(dir).is_ok());

    let Some(dir) = dir else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(env_filter())
            .init();
        return None;
    };

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();
    tracing::debug!(dir = %dir.display(), "Logging initialized");
    Some(guard)
}
