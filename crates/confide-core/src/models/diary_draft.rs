use crate::{CoreError, DiaryEntry, Mood, Result as CoreErrorResult};

/// User-entered diary fields, before they reach the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiaryDraft {
    pub title: String,
    pub content: String,
    pub mood: Option<Mood>,
}

impl DiaryDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, mood: Option<Mood>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            mood,
        }
    }

    /// Builds a draft from raw form values. An empty mood means no mood.
    #[track_caller]
    pub fn from_form(title: &str, content: &str, mood: &str) -> CoreErrorResult<Self> {
        Ok(Self::new(title, content, Mood::parse_optional(mood)?))
    }

    /// Pre-fills a draft from an existing entry for editing.
    pub fn from_entry(entry: &DiaryEntry) -> Self {
        Self::new(entry.title.clone(), entry.content.clone(), entry.mood)
    }

    /// Title and content are both required and may not be whitespace only.
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("title", "title is required"));
        }
        if self.content.trim().is_empty() {
            return Err(CoreError::validation("content", "content is required"));
        }
        Ok(())
    }
}
