//! Server configuration.
//!
//! Read from environment variables:
//! - `TODOSIMPLE_DB_PATH` - SQLite file. Defaults to `todosimple.sqlite3`.
//! - `TODOSIMPLE_HOST` - Bind host. Defaults to `127.0.0.1`.
//! - `TODOSIMPLE_PORT` - Bind port. Defaults to `8080`.
//! - `TODOSIMPLE_LOG_LEVEL` - `trace|debug|info|warn|error`. Defaults to
//!   `debug` in debug builds and `info` in release builds.
//! - `TODOSIMPLE_LOG_DIR` - Log directory. Defaults to `logs` under the
//!   working directory; relative values are resolved against it.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DB_PATH_VAR: &str = "TODOSIMPLE_DB_PATH";
pub const HOST_VAR: &str = "TODOSIMPLE_HOST";
pub const PORT_VAR: &str = "TODOSIMPLE_PORT";
pub const LOG_LEVEL_VAR: &str = "TODOSIMPLE_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "TODOSIMPLE_LOG_DIR";

const DEFAULT_DB_PATH: &str = "todosimple.sqlite3";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: `{value}` ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("cannot determine working directory: {0}")]
    WorkingDir(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Always absolute.
    pub log_dir: PathBuf,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let working_dir = std::env::current_dir()?;
        Self::from_lookup(|key| std::env::var(key).ok(), &working_dir)
    }

    /// Loads configuration through `lookup`, resolving relative log
    /// directories against `working_dir`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        working_dir: &Path,
    ) -> Result<Self, ConfigError> {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db_path = value(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let host = value(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match value(PORT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|err| ConfigError::InvalidValue {
                    key: PORT_VAR,
                    value: raw.clone(),
                    reason: err.to_string(),
                })?,
            None => DEFAULT_PORT,
        };

        let log_level = value(LOG_LEVEL_VAR)
            .unwrap_or_else(|| todosimple_core::default_log_level().to_string());

        let log_dir = working_dir
            .join(value(LOG_DIR_VAR).unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()));

        Ok(Self {
            db_path,
            host,
            port,
            log_level,
            log_dir,
        })
    }

    /// `host:port` string for binding the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
