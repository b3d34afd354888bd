use crate::output::{format_entries, format_entry, format_identity, format_mood};

use confide_core::{DiaryEntry, Identity, Mood};

use chrono::{Duration, TimeZone, Utc};
use googletest::prelude::*;

fn entry() -> DiaryEntry {
    let created = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
    DiaryEntry {
        id: "e1".to_string(),
        owner: "user-1".to_string(),
        title: "Today".to_string(),
        content: "A calm day".to_string(),
        mood: Some(Mood::Calm),
        created_at: created,
        updated_at: created,
    }
}

#[test]
fn given_entry_when_formatted_then_header_title_and_content() {
    let rendered = format_entry(&entry());

    assert_that!(
        rendered,
        eq("[e1] 05/03/2024 14:30  😌 Tranquilo/a\n  Today\n  A calm day")
    );
}

#[test]
fn given_edited_entry_when_formatted_then_edit_marker() {
    let mut entry = entry();
    entry.updated_at = entry.created_at + Duration::hours(1);

    assert_that!(format_entry(&entry), ends_with("(edited 05/03/2024 15:30)"));
}

#[test]
fn given_no_entries_when_formatted_then_empty_hint() {
    let lines = format_entries(&[]);

    assert_that!(lines.len(), eq(1));
    assert_that!(lines[0], contains_substring("empty"));
}

#[test]
fn given_identities_when_formatted_then_state_prefix() {
    let registered = Identity::registered("u1".into(), Some("a@x.com".into()), Utc::now());
    let guest = Identity::anonymous("anonymous_abc123xyz".into(), Utc::now());

    assert_that!(format_identity(Some(&registered)), eq("registered: a@x.com (u1)"));
    assert_that!(format_identity(Some(&guest)), starts_with("anonymous: anonymous_"));
    assert_that!(format_identity(None), eq("unauthenticated: not signed in"));
}

#[test]
fn given_mood_when_formatted_then_value_and_label() {
    assert_that!(format_mood(&Mood::Grateful), eq("grateful   🙏 Agradecido/a"));
}
