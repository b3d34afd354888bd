#![allow(dead_code)]

use confide_core::{DiaryEntry, Identity};
use confide_diary::{
    DiaryEntryChanges, DiaryError, DiaryRepository, DiaryView, DocumentStore,
    MemoryDocumentStore, NewDiaryEntry, Result as DiaryResult,
};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

/// Wraps the in-memory store, counting every boundary call and failing on
/// demand.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryDocumentStore,
    pub selects: AtomicUsize,
    pub inserts: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn selects(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    /// Every call made through the boundary.
    pub fn total_calls(&self) -> usize {
        self.selects()
            + self.inserts.load(Ordering::SeqCst)
            + self.updates.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }

    fn check(&self, flag: &AtomicBool) -> DiaryResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(DiaryError::store("connection reset"));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn select_by_owner(&self, owner: &str) -> DiaryResult<Vec<DiaryEntry>> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_reads)?;
        self.inner.select_by_owner(owner).await
    }

    async fn insert(&self, record: &NewDiaryEntry) -> DiaryResult<DiaryEntry> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_writes)?;
        self.inner.insert(record).await
    }

    async fn update(&self, id: &str, changes: &DiaryEntryChanges) -> DiaryResult<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_writes)?;
        self.inner.update(id, changes).await
    }

    async fn delete(&self, id: &str) -> DiaryResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_writes)?;
        self.inner.delete(id).await
    }
}

pub fn member(id: &str) -> Identity {
    Identity::registered(id.to_string(), Some(format!("{id}@x.com")), Utc::now())
}

pub fn guest() -> Identity {
    Identity::anonymous("anonymous_4fzq81k2p".to_string(), Utc::now())
}

pub fn repository() -> (Arc<CountingStore>, DiaryRepository) {
    let store = Arc::new(CountingStore::new());
    let repository = DiaryRepository::new(store.clone());
    (store, repository)
}

pub fn view() -> (Arc<CountingStore>, DiaryView) {
    let (store, repository) = repository();
    (store, DiaryView::new(repository))
}
