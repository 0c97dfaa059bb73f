use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DATA_FILE: &str = "transactions_data.json";
const LOG_FILE: &str = "app.log";
const BACKUP_DIR: &str = "backups";

/// Stores user-configurable paths and display preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Ledger document. Defaults to `transactions_data.json` in the base directory.
    pub data_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,

    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,

    /// Label appended to amounts in listings.
    #[serde(default = "Config::default_currency")]
    pub currency: String,

    /// Default tracing filter directive, overridden by `RUST_LOG`.
    #[serde(default = "Config::default_log_level")]
    pub log_level: String,

    /// Whether events are appended to the log file.
    #[serde(default = "Config::default_file_logging")]
    pub file_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            log_file: None,
            backup_dir: None,
            backup_retention: Self::default_backup_retention(),
            currency: Self::default_currency(),
            log_level: Self::default_log_level(),
            file_logging: Self::default_file_logging(),
        }
    }
}

impl Config {
    pub fn default_backup_retention() -> usize {
        5
    }

    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_log_level() -> String {
        "info".into()
    }

    pub fn default_file_logging() -> bool {
        true
    }

    pub fn resolve_data_file(&self, base: &Path) -> PathBuf {
        resolve(self.data_file.as_deref(), base, DATA_FILE)
    }

    pub fn resolve_log_file(&self, base: &Path) -> PathBuf {
        resolve(self.log_file.as_deref(), base, LOG_FILE)
    }

    pub fn resolve_backup_dir(&self, base: &Path) -> PathBuf {
        resolve(self.backup_dir.as_deref(), base, BACKUP_DIR)
    }
}

/// Relative overrides are taken relative to `base`.
fn resolve(custom: Option<&Path>, base: &Path, default_name: &str) -> PathBuf {
    match custom {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => base.join(path),
        None => base.join(default_name),
    }
}
