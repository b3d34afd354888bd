use crate::{DiaryEntryChanges, DocumentStore, NewDiaryEntry, Result as DiaryErrorResult};

use confide_core::DiaryEntry;

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

/// Document store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    rows: Mutex<Vec<DiaryEntry>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    fn rows(&self) -> MutexGuard<'_, Vec<DiaryEntry>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn select_by_owner(&self, owner: &str) -> DiaryErrorResult<Vec<DiaryEntry>> {
        // Rows are kept newest-insert first so equal timestamps stay ordered.
        let mut entries: Vec<DiaryEntry> = self
            .rows()
            .iter()
            .filter(|entry| entry.owner == owner)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn insert(&self, record: &NewDiaryEntry) -> DiaryErrorResult<DiaryEntry> {
        let now = Utc::now();
        let entry = DiaryEntry {
            id: Uuid::new_v4().to_string(),
            owner: record.owner.clone(),
            title: record.title.clone(),
            content: record.content.clone(),
            mood: record.mood,
            created_at: now,
            updated_at: now,
        };
        self.rows().insert(0, entry.clone());
        Ok(entry)
    }

    async fn update(&self, id: &str, changes: &DiaryEntryChanges) -> DiaryErrorResult<()> {
        if let Some(entry) = self.rows().iter_mut().find(|entry| entry.id == id) {
            entry.title = changes.title.clone();
            entry.content = changes.content.clone();
            entry.mood = changes.mood;
            entry.updated_at = changes.updated_at;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> DiaryErrorResult<()> {
        self.rows().retain(|entry| entry.id != id);
        Ok(())
    }
}
