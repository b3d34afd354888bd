use crate::storage::error::{Result as StorageErrorResult, StorageError};
use crate::storage::{AnonymousStore, LoadResult, decode};

use confide_core::Identity;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

const FILE_NAME: &str = "anonymous_user.json";
const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Anonymous identity persisted as a single JSON file in the app data directory.
#[derive(Debug, Clone)]
pub struct FileAnonymousStore {
    dir: PathBuf,
}

impl FileAnonymousStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(FILE_NAME)
    }

    fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AnonymousStore for FileAnonymousStore {
    /// Returns:
    /// - `identity: Some(..)` - loaded successfully
    /// - `identity: None, corruption_error: None` - no guest session saved
    /// - `identity: None, corruption_error: Some(..)` - file exists but is unusable
    fn load(&self) -> StorageErrorResult<LoadResult> {
        let path = self.path();

        if !path.exists() {
            return Ok(LoadResult::empty());
        }

        let contents =
            fs::read_to_string(&path).map_err(|e| StorageError::file_read(path.clone(), e))?;

        let result = decode(&contents);
        match (&result.identity, &result.corruption_error) {
            (Some(identity), _) => info!("Loaded anonymous identity {}", identity.id),
            (None, Some(e)) => warn!("Anonymous identity file corrupted at {path:?}: {e}"),
            (None, None) => {}
        }
        Ok(result)
    }

    /// Temp file, fsync, then atomic rename, so a crash mid-write never leaves
    /// a half-written record behind.
    fn save(&self, identity: &Identity) -> StorageErrorResult<()> {
        let dir = self.dir();
        fs::create_dir_all(dir).map_err(|e| StorageError::dir_creation(dir.to_path_buf(), e))?;

        let final_path = self.path();
        let temp_path = dir.join(format!("{FILE_NAME}.tmp.{}", std::process::id()));

        let json = serde_json::to_string_pretty(identity)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::atomic_rename(final_path.clone(), e)
        })?;

        info!("Saved anonymous identity {}", identity.id);
        Ok(())
    }

    fn clear(&self) -> StorageErrorResult<()> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Removed anonymous identity at {path:?}");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::file_remove(path, e)),
        }
    }

    /// Renames the record to `anonymous_user.json.corrupted.{timestamp}`.
    fn backup_corrupted(&self) -> StorageErrorResult<Option<PathBuf>> {
        let path = self.path();

        if !path.exists() {
            return Ok(None);
        }

        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = self
            .dir()
            .join(format!("{FILE_NAME}.corrupted.{timestamp}"));

        fs::rename(&path, &backup_path)
            .map_err(|e| StorageError::backup_failed(path.clone(), e))?;

        warn!("Backed up corrupted anonymous identity to {backup_path:?}");
        Ok(Some(backup_path))
    }
}
