//! Runtime configuration: where data lives and how money is labelled

use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;

use crate::types::{Result, SpendlogError};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "SPENDLOG_DATA_DIR";
/// Environment variable overriding the currency label
pub const CURRENCY_ENV: &str = "SPENDLOG_CURRENCY";
/// Environment variable holding the tracing filter directives
pub const LOG_ENV: &str = "SPENDLOG_LOG";

pub const DEFAULT_CURRENCY: &str = "THB";

const LOG_FILE: &str = "spendlog.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub currency: String,
}

impl Config {
    /// Resolve from explicit values (flag or environment), falling back to
    /// `~/.spendlog` and the default currency. Creates the data directory.
    pub fn resolve(data_dir: Option<PathBuf>, currency: Option<String>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&data_dir)?;

        let currency = currency
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        Ok(Self { data_dir, currency })
    }

    /// File the TUI writes its log to
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

/// Default data directory (`~/.spendlog`)
pub fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| SpendlogError::Config("Cannot determine home directory".into()))?;
    Ok(base_dirs.home_dir().join(".spendlog"))
}
