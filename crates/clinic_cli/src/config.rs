//! Runtime settings read from the environment.
//!
//! # Invariants
//! - Paths in the returned config are absolute.
//! - Empty variables count as unset.

use clinic_core::{default_log_level, StorageFormat};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DATA_DIR_VAR: &str = "CLINIC_DATA_DIR";
pub const STORAGE_VAR: &str = "CLINIC_STORAGE";
pub const LOG_LEVEL_VAR: &str = "CLINIC_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "CLINIC_LOG_DIR";

/// Log directory name under the data directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    CurrentDir(std::io::Error),
    UnknownStorageFormat(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CurrentDir(err) => write!(f, "cannot resolve current directory: {err}"),
            Self::UnknownStorageFormat(value) => {
                write!(f, "{STORAGE_VAR} must be `json` or `xml`, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CurrentDir(err) => Some(err),
            Self::UnknownStorageFormat(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    /// `None` means ask at startup.
    pub storage_format: Option<StorageFormat>,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl CliConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_dir = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Self::from_lookup(&base_dir, |key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, resolving relative paths against `base_dir`.
    pub fn from_lookup(
        base_dir: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_dir = read(DATA_DIR_VAR)
            .map(|value| base_dir.join(value))
            .unwrap_or_else(|| base_dir.to_path_buf());

        let storage_format = match read(STORAGE_VAR) {
            Some(value) => Some(
                StorageFormat::from_name(&value)
                    .ok_or(ConfigError::UnknownStorageFormat(value))?,
            ),
            None => None,
        };

        let log_level = read(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string());
        let log_dir = read(LOG_DIR_VAR)
            .map(|value| base_dir.join(value))
            .unwrap_or_else(|| data_dir.join(DEFAULT_LOG_DIR));

        Ok(Self {
            data_dir,
            storage_format,
            log_level,
            log_dir,
        })
    }
}
