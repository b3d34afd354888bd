mod diary_draft;
mod diary_entry;
mod identity;
mod mood;
