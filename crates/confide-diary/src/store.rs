use crate::Result as DiaryErrorResult;

use confide_core::{DiaryEntry, Mood};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Row sent on insert. Id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDiaryEntry {
    #[serde(rename = "user_id")]
    pub owner: String,
    pub title: String,
    pub content: String,
    pub mood: Option<Mood>,
}

/// Fields overwritten by an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiaryEntryChanges {
    pub title: String,
    pub content: String,
    pub mood: Option<Mood>,
    pub updated_at: DateTime<Utc>,
}

/// Boundary to the hosted document store holding the diary collection.
///
/// Row-level access (an owner only sees its own rows) is enforced by the
/// store itself.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All rows for `owner`, newest first.
    async fn select_by_owner(&self, owner: &str) -> DiaryErrorResult<Vec<DiaryEntry>>;

    async fn insert(&self, record: &NewDiaryEntry) -> DiaryErrorResult<DiaryEntry>;

    async fn update(&self, id: &str, changes: &DiaryEntryChanges) -> DiaryErrorResult<()>;

    async fn delete(&self, id: &str) -> DiaryErrorResult<()>;
}
