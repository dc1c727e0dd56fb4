//! Store configuration.
//!
//! The only knobs are where the database lives and which named record
//! holds the serialized project collection.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default name of the persisted record.
pub const DEFAULT_STORAGE_KEY: &str = "diy-project-store";
/// Default database file name used by [`StoreConfig::in_dir`].
pub const DEFAULT_DB_FILE_NAME: &str = "diy_projects.sqlite3";

/// Location of the persisted project collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
}

impl StoreConfig {
    /// Uses `db_path` with the default storage key.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Uses the default database file name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_DB_FILE_NAME))
    }

    /// Overrides the persisted record name.
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    /// Rejects empty paths and blank keys.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDbPath);
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}

/// Invalid store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDbPath,
    EmptyStorageKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDbPath => write!(f, "db_path cannot be empty"),
            Self::EmptyStorageKey => write!(f, "storage_key cannot be blank"),
        }
    }
}

impl Error for ConfigError {}
