// File-based persistence for the session store

use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{PersistedState, SessionPersistence};
use crate::errors::LiberoError;

/// Name of the record holding the whole store
pub const STORAGE_FILE_NAME: &str = "volleyball-training-storage.json";

/// Stores the state as one pretty-printed JSON document. Writes go through a
/// temporary file and an atomic rename; the previous document is kept as a
/// `.backup` copy and used when the primary file can no longer be parsed.
pub struct FileBasedStorage {
    file_path: PathBuf,
}

impl FileBasedStorage {
    /// Create a storage writing to `file_path`, creating parent directories
    pub fn new(file_path: PathBuf) -> Result<Self, LiberoError> {
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| LiberoError::StorageIOError { source: e })?;
            }
        }

        Ok(Self { file_path })
    }

    /// Create storage in the default application data directory
    pub fn new_default() -> Result<Self, LiberoError> {
        Self::new(Self::default_storage_path()?)
    }

    /// Get the default path of the storage file
    pub fn default_storage_path() -> Result<PathBuf, LiberoError> {
        let app_data_dir = dirs::data_dir().ok_or(LiberoError::NoDataDir)?;
        Ok(app_data_dir.join("libero").join(STORAGE_FILE_NAME))
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn backup_path(&self) -> PathBuf {
        self.file_path.with_extension("json.backup")
    }

    fn temp_path(&self) -> PathBuf {
        self.file_path.with_extension("json.tmp")
    }

    /// Attempt to load the state from a specific file
    fn attempt_load_from_file(&self, file_path: &Path) -> Result<PersistedState, LiberoError> {
        let content =
            fs::read_to_string(file_path).map_err(|e| LiberoError::FileOperationError {
                operation: "read_store_file".to_string(),
                reason: format!("Failed to read file: {}", e),
            })?;

        if content.trim().is_empty() {
            return Err(LiberoError::FileOperationError {
                operation: "read_store_file".to_string(),
                reason: "Store file is empty".to_string(),
            });
        }

        serde_json::from_str(&content).map_err(|e| LiberoError::StorageSerializeError { source: e })
    }

    /// Keep a copy of the current file before it gets replaced
    fn create_backup_if_exists(&self) -> Result<(), LiberoError> {
        if self.file_path.exists() {
            let backup_path = self.backup_path();
            fs::copy(&self.file_path, &backup_path).map_err(|e| {
                LiberoError::FileOperationError {
                    operation: "create_backup".to_string(),
                    reason: format!("Failed to create backup: {}", e),
                }
            })?;
            debug!("Created backup: {:?}", backup_path);
        }
        Ok(())
    }

    fn write_atomically(&self, content: &str) -> Result<(), LiberoError> {
        let temp_path = self.temp_path();

        // Write to temporary file first
        {
            let mut temp_file =
                fs::File::create(&temp_path).map_err(|e| LiberoError::FileOperationError {
                    operation: "create_temp_file".to_string(),
                    reason: format!("Failed to create temporary file: {}", e),
                })?;

            temp_file
                .write_all(content.as_bytes())
                .map_err(|e| LiberoError::FileOperationError {
                    operation: "write_temp_file".to_string(),
                    reason: format!("Failed to write to temporary file: {}", e),
                })?;

            temp_file
                .sync_all()
                .map_err(|e| LiberoError::FileOperationError {
                    operation: "sync_temp_file".to_string(),
                    reason: format!("Failed to sync temporary file: {}", e),
                })?;
        }

        fs::rename(&temp_path, &self.file_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            LiberoError::FileOperationError {
                operation: "atomic_move".to_string(),
                reason: format!("Failed to move temporary file to final location: {}", e),
            }
        })
    }
}

impl SessionPersistence for FileBasedStorage {
    fn load(&self) -> Result<Option<PersistedState>, LiberoError> {
        if !self.file_path.exists() {
            debug!("Store file does not exist: {:?}", self.file_path);
            return Ok(None);
        }

        match self.attempt_load_from_file(&self.file_path) {
            Ok(state) => {
                debug!(
                    "Loaded {} session(s) from {:?}",
                    state.sessions.len(),
                    self.file_path
                );
                Ok(Some(state))
            }
            Err(e) => {
                warn!("Failed to load store file: {}", e);

                let backup_path = self.backup_path();
                if backup_path.exists() {
                    if let Ok(state) = self.attempt_load_from_file(&backup_path) {
                        warn!("Loaded store from backup after primary file failed");
                        return Ok(Some(state));
                    }
                }
                Err(e)
            }
        }
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), LiberoError> {
        let content = serde_json::to_string_pretty(state)
            .map_err(|e| LiberoError::StorageSerializeError { source: e })?;

        if let Err(backup_error) = self.create_backup_if_exists() {
            warn!("Failed to create backup: {}", backup_error);
            // Continue with save but log the warning
        }

        self.write_atomically(&content)?;
        debug!(
            "Saved {} session(s) to {:?}",
            state.sessions.len(),
            self.file_path
        );
        Ok(())
    }

    fn clear(&mut self) -> Result<(), LiberoError> {
        for path in [self.file_path.clone(), self.backup_path()] {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| LiberoError::StorageIOError { source: e })?;
            }
        }
        info!("Cleared session store at {:?}", self.file_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Player, TrainingSession};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_state() -> PersistedState {
        let session = TrainingSession::new(
            "1700000000000".to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            vec![Player::new("1", "Kel")],
            vec![Player::new("7", "Carlos")],
        );
        PersistedState {
            sessions: vec![session.clone()],
            current_session: Some(session),
        }
    }

    #[test]
    fn test_file_based_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(STORAGE_FILE_NAME);
        let storage = FileBasedStorage::new(path.clone()).unwrap();

        assert_eq!(storage.file_path(), path.as_path());
        assert!(path.parent().unwrap().exists());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileBasedStorage::new(temp_dir.path().join(STORAGE_FILE_NAME)).unwrap();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_state() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            FileBasedStorage::new(temp_dir.path().join(STORAGE_FILE_NAME)).unwrap();

        let state = create_test_state();
        storage.save(&state).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, Some(state));
        assert!(!storage.temp_path().exists());
    }

    #[test]
    fn test_backup_used_when_primary_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            FileBasedStorage::new(temp_dir.path().join(STORAGE_FILE_NAME)).unwrap();

        let state = create_test_state();
        storage.save(&state).unwrap();
        // Second save moves the first document into the backup
        storage.save(&state).unwrap();
        assert!(storage.backup_path().exists());

        fs::write(storage.file_path(), "{\"sessions\": [").unwrap();
        let loaded = storage.load().unwrap();
        assert_eq!(loaded, Some(state));
    }

    #[test]
    fn test_corrupt_file_without_backup_errors() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileBasedStorage::new(temp_dir.path().join(STORAGE_FILE_NAME)).unwrap();

        fs::write(storage.file_path(), "not json").unwrap();
        assert!(matches!(
            storage.load(),
            Err(LiberoError::StorageSerializeError { .. })
        ));
    }

    #[test]
    fn test_clear_removes_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            FileBasedStorage::new(temp_dir.path().join(STORAGE_FILE_NAME)).unwrap();

        let state = create_test_state();
        storage.save(&state).unwrap();
        storage.save(&state).unwrap();
        storage.clear().unwrap();

        assert!(!storage.file_path().exists());
        assert!(!storage.backup_path().exists());
        assert!(storage.load().unwrap().is_none());
    }
}
