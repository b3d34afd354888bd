use crate::{DiaryEntry, Mood};

use chrono::{Duration, Utc};

fn entry() -> DiaryEntry {
    let now = Utc::now();
    DiaryEntry {
        id: "00000000-0000-0000-0000-000000000001".into(),
        owner: "user-1".into(),
        title: "T".into(),
        content: "C".into(),
        mood: Some(Mood::Happy),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn given_fresh_entry_when_is_edited_then_false() {
    assert!(!entry().is_edited());
}

#[test]
fn given_touched_entry_when_is_edited_then_true() {
    let mut entry = entry();
    entry.updated_at = entry.created_at + Duration::seconds(5);
    assert!(entry.is_edited());
}

#[test]
fn given_store_row_when_deserialized_then_owner_maps_from_user_id() {
    let json = r#"{
        "id": "e-1",
        "user_id": "user-1",
        "title": "T",
        "content": "C",
        "mood": null,
        "created_at": "2024-01-01T00:00:00+00:00",
        "updated_at": "2024-01-01T00:00:00+00:00"
    }"#;

    let entry: DiaryEntry = serde_json::from_str(json).unwrap();

    assert_eq!(entry.owner, "user-1");
    assert_eq!(entry.mood, None);
    assert!(!entry.is_edited());
}
