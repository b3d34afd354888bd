use crate::{CoreError, Mood};

use std::str::FromStr;

#[test]
fn test_mood_as_str() {
    assert_eq!(Mood::Happy.as_str(), "happy");
    assert_eq!(Mood::Anxious.as_str(), "anxious");
    assert_eq!(Mood::Grateful.as_str(), "grateful");
}

#[test]
fn test_mood_from_str_covers_every_value() {
    for mood in Mood::ALL {
        assert_eq!(Mood::from_str(mood.as_str()).unwrap(), mood);
    }
    assert!(Mood::from_str("angry").is_err());
    assert!(Mood::from_str("Happy").is_err());
}

#[test]
fn test_mood_labels_are_distinct() {
    let mut labels: Vec<&str> = Mood::ALL.iter().map(Mood::label).collect();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), 7);
}

#[test]
fn given_empty_form_value_when_parse_optional_then_none() {
    assert_eq!(Mood::parse_optional("").unwrap(), None);
    assert_eq!(Mood::parse_optional("   ").unwrap(), None);
}

#[test]
fn given_unknown_form_value_when_parse_optional_then_invalid_mood() {
    let err = Mood::parse_optional("bored").unwrap_err();
    assert!(matches!(err, CoreError::InvalidMood { ref value, .. } if value == "bored"));
    assert_eq!(err.field(), Some("mood"));
}

#[test]
fn test_mood_serializes_as_snake_case_string() {
    assert_eq!(serde_json::to_string(&Mood::Calm).unwrap(), "\"calm\"");
    let parsed: Mood = serde_json::from_str("\"excited\"").unwrap();
    assert_eq!(parsed, Mood::Excited);
}
