use confide_core::{DiaryEntry, Identity, Mood};
use confide_diary::Notification;
use confide_session::SessionState;

use chrono::{DateTime, Utc};

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// One block per entry: header line, title, content, and an edit marker.
pub fn format_entry(entry: &DiaryEntry) -> String {
    let mut header = format!("[{}] {}", entry.id, format_date(&entry.created_at));
    if let Some(mood) = entry.mood {
        header.push_str("  ");
        header.push_str(mood.label());
    }

    let mut block = format!("{header}\n  {}\n  {}", entry.title, entry.content);
    if entry.is_edited() {
        block.push_str(&format!("\n  (edited {})", format_date(&entry.updated_at)));
    }
    block
}

pub fn format_entries(entries: &[DiaryEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec![String::from("Your diary is empty. Write your first entry.")];
    }
    entries.iter().map(format_entry).collect()
}

pub fn format_identity(identity: Option<&Identity>) -> String {
    let state = SessionState::of(identity);
    match identity {
        Some(identity) => format!("{state}: {} ({})", identity.display_name(), identity.id),
        None => format!("{state}: not signed in"),
    }
}

pub fn format_mood(mood: &Mood) -> String {
    format!("{:<10} {}", mood.as_str(), mood.label())
}

pub fn format_notification(notification: &Notification) -> String {
    notification.to_string()
}
