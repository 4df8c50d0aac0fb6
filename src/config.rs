//! Runtime configuration resolved from the environment.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use crossterm::tty::IsTty;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-db";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "library.sqlite";

pub const DB_PATH_VAR: &str = "LIBRARY_DB_PATH";
pub const LOG_VAR: &str = "LIBRARY_DB_LOG";
const RUST_LOG_VAR: &str = "RUST_LOG";
const NO_COLOR_VAR: &str = "NO_COLOR";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    /// Style terminal output with colours.
    pub color: bool,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Config {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self> {
        let stdout_is_tty = std::io::stdout().is_tty();
        Self::resolve(|key| std::env::var(key).ok(), stdout_is_tty, default_db_path)
    }

    /// Resolve from an arbitrary lookup. `default_path` is consulted only when
    /// no explicit store location is configured.
    pub fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        stdout_is_tty: bool,
        default_path: impl FnOnce() -> Result<PathBuf>,
    ) -> Result<Self> {
        let db_path = match lookup(DB_PATH_VAR).filter(|value| !value.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_path()?,
        };

        let color = stdout_is_tty && lookup(NO_COLOR_VAR).is_none();

        let log_filter = lookup(RUST_LOG_VAR)
            .or_else(|| lookup(LOG_VAR))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Config {
            db_path,
            color,
            log_filter,
        })
    }
}

/// Resolve the absolute path to the store inside the user's home.
pub fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
