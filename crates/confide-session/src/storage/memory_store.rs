use crate::storage::error::Result as StorageErrorResult;
use crate::storage::{AnonymousStore, LoadResult, decode};

use confide_core::Identity;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Anonymous identity kept in process memory, serialized the same way the
/// file store writes it.
#[derive(Debug, Default)]
pub struct MemoryAnonymousStore {
    slot: Mutex<Option<String>>,
}

impl MemoryAnonymousStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an arbitrary raw record, e.g. one written by an older build.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    /// The raw stored record, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot().as_ref().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.slot().is_none()
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnonymousStore for MemoryAnonymousStore {
    fn load(&self) -> StorageErrorResult<LoadResult> {
        Ok(match self.slot().as_deref() {
            Some(raw) => decode(raw),
            None => LoadResult::empty(),
        })
    }

    fn save(&self, identity: &Identity) -> StorageErrorResult<()> {
        let json = serde_json::to_string(identity)?;
        *self.slot() = Some(json);
        Ok(())
    }

    fn clear(&self) -> StorageErrorResult<()> {
        *self.slot() = None;
        Ok(())
    }
}
