use crate::{
    DiaryEntryChanges, DiaryError, DocumentStore, NewDiaryEntry, Result as DiaryErrorResult,
};

use confide_core::{DiaryDraft, DiaryEntry, Identity};

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};

/// Scoped CRUD over one owner's diary entries.
///
/// Every rejection that can be decided locally happens before the store is
/// touched.
#[derive(Clone)]
pub struct DiaryRepository {
    store: Arc<dyn DocumentStore>,
}

impl DiaryRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All entries of `owner`, newest first.
    pub async fn list(&self, owner: &Identity) -> DiaryErrorResult<Vec<DiaryEntry>> {
        require_registered(owner)?;

        let entries = self
            .store
            .select_by_owner(&owner.id)
            .await
            .inspect_err(|e| warn!("Failed to fetch diary entries: {e}"))?;
        debug!("Fetched {} diary entries for {}", entries.len(), owner.id);
        Ok(entries)
    }

    pub async fn create(
        &self,
        owner: &Identity,
        draft: &DiaryDraft,
    ) -> DiaryErrorResult<DiaryEntry> {
        require_registered(owner)?;
        draft.validate()?;

        let record = NewDiaryEntry {
            owner: owner.id.clone(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            mood: draft.mood,
        };
        let entry = self
            .store
            .insert(&record)
            .await
            .inspect_err(|e| warn!("Failed to save diary entry: {e}"))?;
        info!("Created diary entry {}", entry.id);
        Ok(entry)
    }

    /// Overwrites title, content and mood and refreshes `updated_at`.
    pub async fn update(&self, id: &str, draft: &DiaryDraft) -> DiaryErrorResult<()> {
        draft.validate()?;

        let changes = DiaryEntryChanges {
            title: draft.title.clone(),
            content: draft.content.clone(),
            mood: draft.mood,
            updated_at: Utc::now(),
        };
        self.store
            .update(id, &changes)
            .await
            .inspect_err(|e| warn!("Failed to update diary entry {id}: {e}"))?;
        info!("Updated diary entry {id}");
        Ok(())
    }

    /// Permanent; there is no undo.
    pub async fn delete(&self, id: &str) -> DiaryErrorResult<()> {
        self.store
            .delete(id)
            .await
            .inspect_err(|e| warn!("Failed to delete diary entry {id}: {e}"))?;
        info!("Deleted diary entry {id}");
        Ok(())
    }
}

#[track_caller]
pub(crate) fn require_registered(identity: &Identity) -> DiaryErrorResult<()> {
    if identity.is_anonymous {
        return Err(DiaryError::anonymous_access());
    }
    Ok(())
}

impl std::fmt::Debug for DiaryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiaryRepository").finish_non_exhaustive()
    }
}
