use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::LiberoError;
use crate::storage::FileBasedStorage;

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Session store file; the platform data directory when unset
    pub storage_file: Option<PathBuf>,
    /// Where exported sessions are written; the working directory when unset
    pub export_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn default_path() -> Result<PathBuf, LiberoError> {
        Ok(dirs::config_dir()
            .ok_or(LiberoError::NoConfigDir)?
            .join("libero")
            .join(CONFIG_FILE_NAME))
    }

    /// Load the user's config file, falling back to defaults when it is missing
    pub fn from_local_file() -> Result<Self, LiberoError> {
        Self::from_file(&Self::default_path()?)
    }

    pub fn from_file(config_path: &Path) -> Result<Self, LiberoError> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let file = std::fs::File::open(config_path)
            .map_err(|e| LiberoError::ConfigIOError { source: e })?;
        serde_json::from_reader(file).map_err(|e| LiberoError::ConfigSerializeError { source: e })
    }

    pub fn save(&self) -> Result<(), LiberoError> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), LiberoError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| LiberoError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| LiberoError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| LiberoError::ConfigSerializeError { source: e })
    }

    /// Store file to use, preferring an explicit override
    pub fn resolve_storage_file(&self, cli_override: Option<&Path>) -> Result<PathBuf, LiberoError> {
        match cli_override.or(self.storage_file.as_deref()) {
            Some(path) => Ok(path.to_path_buf()),
            None => FileBasedStorage::default_storage_path(),
        }
    }

    pub fn export_path(&self, file_name: &str) -> PathBuf {
        match &self.export_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}
