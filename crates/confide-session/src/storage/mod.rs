pub mod error;
pub mod file_store;
pub mod memory_store;

use crate::storage::error::Result as StorageErrorResult;

use confide_core::Identity;

use std::path::PathBuf;

/// Outcome of reading the local anonymous record.
#[derive(Debug, Default)]
pub struct LoadResult {
    pub identity: Option<Identity>,
    /// Present if a record exists but could not be used
    pub corruption_error: Option<String>,
}

impl LoadResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn found(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            corruption_error: None,
        }
    }

    pub fn corrupted(message: impl Into<String>) -> Self {
        Self {
            identity: None,
            corruption_error: Some(message.into()),
        }
    }
}

/// Device-local slot holding at most one anonymous identity.
pub trait AnonymousStore: Send + Sync {
    fn load(&self) -> StorageErrorResult<LoadResult>;

    fn save(&self, identity: &Identity) -> StorageErrorResult<()>;

    /// Removes the record. Clearing an empty slot is not an error.
    fn clear(&self) -> StorageErrorResult<()>;

    /// Moves an unusable record out of the way, returning where it went.
    fn backup_corrupted(&self) -> StorageErrorResult<Option<PathBuf>> {
        self.clear()?;
        Ok(None)
    }
}

/// Parses a stored record, rejecting anything that is not an anonymous identity.
pub(crate) fn decode(contents: &str) -> LoadResult {
    match serde_json::from_str::<Identity>(contents) {
        Ok(identity) if crate::anonymous::is_well_formed(&identity) => LoadResult::found(identity),
        Ok(identity) => LoadResult::corrupted(format!(
            "stored record {} is not an anonymous identity",
            identity.id
        )),
        Err(e) => LoadResult::corrupted(e.to_string()),
    }
}
