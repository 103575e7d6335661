//! Tracing setup for the CLI and embedders.
//!
//! Events go to an append-only log file: `log_file` from config, or
//! `$XDG_STATE_HOME/phishguard/phishguard.log`. Filter precedence is
//! `RUST_LOG`, then config `log_filter`, then [`DEFAULT_FILTER`].

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::PhishGuardConfig;

pub const DEFAULT_FILTER: &str = "info,phishguard=debug,phishguard_core=debug";

const LOG_FILE_NAME: &str = "phishguard.log";

/// `$XDG_STATE_HOME/phishguard/phishguard.log` (the prefix dir is not created).
pub fn default_log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("phishguard")?;
    Ok(xdg_dirs.get_state_home().join(LOG_FILE_NAME))
}

fn env_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        configured
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
    })
}

/// Opens `path` for appending, creating parent directories as needed.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log dir {}", parent.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

/// Installs the global subscriber writing to the configured log file.
/// Returns the log path; on error nothing is installed and the caller may
/// fall back to [`init_logging_stderr`].
pub fn init_logging(cfg: &PhishGuardConfig) -> Result<PathBuf> {
    let path = match &cfg.log_file {
        Some(path) => path.clone(),
        None => default_log_path()?,
    };
    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cfg.log_filter.as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;

    tracing::info!(path = %path.display(), "phishguard logging initialized");
    Ok(path)
}

/// Stderr-only logging for when the log file can't be opened.
pub fn init_logging_stderr(cfg: &PhishGuardConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(cfg.log_filter.as_deref()))
        .with_writer(std::io::stderr)
        .try_init();
}
