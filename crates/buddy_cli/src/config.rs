//! Runtime configuration for the CLI.
//!
//! # Invariants
//! - Resolution order is flag, then environment (via clap), then defaults.
//! - `data_dir` and `log_dir` are absolute after `resolve`.

use anyhow::{Context, Result};
use buddy_core::db::DB_FILE_NAME;
use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "burnout-buddy";
const FALLBACK_DATA_DIR: &str = ".burnout_buddy";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl CliConfig {
    /// Fills unset values with platform defaults.
    pub fn resolve(data_dir: Option<PathBuf>, log_level: Option<String>) -> Result<Self> {
        let data_dir = absolutize(data_dir.unwrap_or_else(default_data_dir))?;
        Ok(Self {
            log_dir: data_dir.join(LOG_DIR_NAME),
            data_dir,
            log_level: log_level
                .unwrap_or_else(|| buddy_core::default_log_level().to_string()),
        })
    }

    /// Path of the journal database file.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(cwd.join(path))
}
