pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::diary_draft::DiaryDraft;
pub use models::diary_entry::DiaryEntry;
pub use models::identity::{ANONYMOUS_ID_PREFIX, Identity};
pub use models::mood::Mood;
