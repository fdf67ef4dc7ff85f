//! File logging. The terminal belongs to the UI, so nothing is written to
//! stdout or stderr while it runs.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "KVPEEK_LOG";
const LOG_FILE: &str = "kvpeek.log";

/// `KVPEEK_LOG` if set and valid, else `fallback`, else `info`.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Default log location under the user cache directory.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("kvpeek").join(LOG_FILE))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE))
}

/// Install the global subscriber writing to `path`. Keep the guard alive
/// until exit so buffered lines are flushed.
pub fn init(path: &Path, level: &str) -> Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file = path
        .file_name()
        .ok_or_else(|| eyre!("log path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("could not create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("could not install logger: {e}"))?;
    Ok(guard)
}
