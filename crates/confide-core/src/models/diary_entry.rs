use crate::Mood;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted diary entry, as returned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: String,
    #[serde(rename = "user_id")]
    pub owner: String,

    pub title: String,
    pub content: String,
    #[serde(default)]
    pub mood: Option<Mood>,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiaryEntry {
    /// True once the entry has been changed after creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at != self.created_at
    }
}
