use crate::{BackendResult, ProviderSession};

use confide_session::StorageError;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

const FILE_NAME: &str = "session.json";

/// Provider session tokens persisted between runs.
#[derive(Debug, Clone)]
pub struct SessionFile {
    dir: PathBuf,
}

impl SessionFile {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(FILE_NAME)
    }

    /// An unreadable record is discarded; the user simply signs in again.
    pub fn load(&self) -> BackendResult<Option<ProviderSession>> {
        let path = self.path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::file_read(path, e).into()),
        };

        match serde_json::from_str::<ProviderSession>(&contents) {
            Ok(session) => {
                debug!("Loaded provider session for {}", session.user.id);
                Ok(Some(session))
            }
            Err(e) => {
                warn!("Discarding unreadable session file {path:?}: {e}");
                self.clear()?;
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &ProviderSession) -> BackendResult<()> {
        let dir = self.dir();
        fs::create_dir_all(dir).map_err(|e| StorageError::dir_creation(dir.to_path_buf(), e))?;

        let final_path = self.path();
        let temp_path = dir.join(format!("{FILE_NAME}.tmp.{}", std::process::id()));
        let json = serde_json::to_string_pretty(session)?;

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

        debug!("Saved provider session for {}", session.user.id);
        Ok(())
    }

    pub fn clear(&self) -> BackendResult<()> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed provider session at {path:?}");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::file_remove(path, e).into()),
        }
    }

    fn dir(&self) -> &Path {
        &self.dir
    }
}
