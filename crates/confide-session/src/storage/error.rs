use std::fmt;
use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Filesystem step that failed while handling a local session file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageAction {
    CreateDir,
    Read,
    Write,
    Replace,
    Remove,
    Backup,
}

impl fmt::Display for StorageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateDir => "create directory",
            Self::Read => "read",
            Self::Write => "write",
            Self::Replace => "replace",
            Self::Remove => "remove",
            Self::Backup => "set aside",
        })
    }
}

/// Errors from the local files holding session state.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to {action} {path}: {source} {location}")]
    Io {
        action: StorageAction,
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to encode session record: {source} {location}")]
    Encode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl StorageError {
    #[track_caller]
    pub fn io(action: StorageAction, path: PathBuf, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn dir_creation(path: PathBuf, source: std::io::Error) -> Self {
        Self::io(StorageAction::CreateDir, path, source)
    }

    #[track_caller]
    pub fn file_read(path: PathBuf, source: std::io::Error) -> Self {
        Self::io(StorageAction::Read, path, source)
    }

    #[track_caller]
    pub fn file_write(path: PathBuf, source: std::io::Error) -> Self {
        Self::io(StorageAction::Write, path, source)
    }

    #[track_caller]
    pub fn file_remove(path: PathBuf, source: std::io::Error) -> Self {
        Self::io(StorageAction::Remove, path, source)
    }

    /// The temp file could not be moved over `to`.
    #[track_caller]
    pub fn atomic_rename(to: PathBuf, source: std::io::Error) -> Self {
        Self::io(StorageAction::Replace, to, source)
    }

    #[track_caller]
    pub fn backup_failed(path: PathBuf, source: std::io::Error) -> Self {
        Self::io(StorageAction::Backup, path, source)
    }

    pub fn action(&self) -> Option<StorageAction> {
        match self {
            Self::Io { action, .. } => Some(*action),
            Self::Encode { .. } => None,
        }
    }

    /// A retry may succeed once a lock or a full disk clears.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.action(),
            Some(StorageAction::Read | StorageAction::Write | StorageAction::Replace)
        )
    }

    /// Hint shown to the user in place of the raw error.
    pub fn recovery_hint(&self) -> &'static str {
        match self.action() {
            Some(StorageAction::Read) => {
                "Could not read the saved session. Check the data directory permissions."
            }
            Some(StorageAction::Remove | StorageAction::Backup) => {
                "Could not clear the saved session. Check the data directory permissions."
            }
            _ => "Could not save the session. Check free disk space and the data directory.",
        }
    }
}

impl From<serde_json::Error> for StorageError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Encode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
