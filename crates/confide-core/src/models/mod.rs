pub mod diary_draft;
pub mod diary_entry;
pub mod identity;
pub mod mood;
