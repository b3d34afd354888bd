use crate::{CoreError, DiaryDraft, Mood};

use googletest::prelude::*;

#[test]
fn given_title_and_content_when_validate_then_ok() {
    let draft = DiaryDraft::new("T", "C", None);
    assert_that!(draft.validate(), ok(anything()));
}

#[test]
fn given_whitespace_title_when_validate_then_title_error() {
    let draft = DiaryDraft::new("   ", "C", None);

    let err = draft.validate().unwrap_err();

    assert!(matches!(err, CoreError::Validation { field: "title", .. }));
}

#[test]
fn given_empty_content_when_validate_then_content_error() {
    let draft = DiaryDraft::new("T", "\n\t", Some(Mood::Sad));

    let err = draft.validate().unwrap_err();

    assert_that!(err.field(), some(eq("content")));
}

#[test]
fn given_form_values_when_from_form_then_parses_mood() {
    let draft = DiaryDraft::from_form("T", "C", "grateful").unwrap();
    assert_that!(draft.mood, some(eq(Mood::Grateful)));

    let draft = DiaryDraft::from_form("T", "C", "").unwrap();
    assert_that!(draft.mood, none());
}

#[test]
fn given_unknown_mood_when_from_form_then_err() {
    assert_that!(DiaryDraft::from_form("T", "C", "meh"), err(anything()));
}
