//! Logging setup.
//!
//! The terminal browser owns stdout, so tracing output goes to a per-launch
//! file under the snipdex log directory. Old files are pruned so the
//! directory stays bounded.

use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::OnceLock,
    time::SystemTime,
};

use chrono::{DateTime, Local};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

use crate::config::{get_log_dir, Config};
use crate::error::{Result, SnipdexError};

/// Maximum number of log files to retain.
const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "snipdex";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global tracing subscriber.
///
/// Subsequent calls are no-ops. Callers are expected to ignore the error and
/// keep running without logs.
pub fn init(config: &Config) -> Result<()> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = get_log_dir();
    fs::create_dir_all(&log_dir)?;

    let log_file_name = format_log_file_name(Local::now());
    let log_path = log_dir.join(&log_file_name);
    ensure_file_exists(&log_path)?;
    prune_old_logs(&log_dir, MAX_LOG_FILES)?;

    let file_appender = rolling::never(&log_dir, &log_file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().with_ansi(false).with_writer(file_writer);
    let subscriber = Registry::default()
        .with(build_env_filter(&config.log_level))
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| SnipdexError::Logging(e.to_string()))?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!("Logging initialized; log file at {}", log_path.display());
    Ok(())
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_LEVEL))
}

fn format_log_file_name(now: DateTime<Local>) -> String {
    format!("{}-{}.log", LOG_FILE_PREFIX, now.format("%Y-%m-%d_%H-%M-%S"))
}

fn ensure_file_exists(path: &Path) -> Result<()> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(())
}

fn prune_old_logs(dir: &Path, max_files: usize) -> Result<()> {
    let mut entries = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("log"))
        .map(|entry| {
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, entry.path())
        })
        .collect::<Vec<_>>();

    entries.sort_by_key(|(modified, _)| *modified);
    let excess = entries.len().saturating_sub(max_files);
    for (_, path) in entries.into_iter().take(excess) {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::{thread, time::Duration};
    use tempfile::tempdir;

    #[test]
    fn log_filename_has_timestamp_and_prefix() {
        let fixed = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            format_log_file_name(fixed),
            "snipdex-2024-03-09_07-05-01.log"
        );
    }

    #[test]
    fn prune_keeps_newest_files() {
        let dir = tempdir().unwrap();
        for idx in 0..12 {
            ensure_file_exists(&dir.path().join(format!("snipdex-{idx}.log"))).unwrap();
            thread::sleep(Duration::from_millis(10));
        }
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();

        prune_old_logs(dir.path(), 10).unwrap();

        let logs = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("log"))
            .count();
        assert_eq!(logs, 10);
        assert!(!dir.path().join("snipdex-0.log").exists());
        assert!(dir.path().join("snipdex-11.log").exists());
        assert!(dir.path().join("notes.txt").exists());
    }
}
