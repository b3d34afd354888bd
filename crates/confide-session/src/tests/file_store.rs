use crate::{AnonymousStore, FileAnonymousStore, anonymous};

use googletest::prelude::*;
use tempfile::TempDir;

#[test]
fn given_no_file_when_load_then_empty_result() {
    let temp = TempDir::new().unwrap();
    let store = FileAnonymousStore::new(temp.path());

    let loaded = store.load().unwrap();

    assert_that!(loaded.identity, none());
    assert_that!(loaded.corruption_error, none());
}

#[test]
fn given_saved_identity_when_load_then_roundtrips_through_disk() {
    let temp = TempDir::new().unwrap();
    let store = FileAnonymousStore::new(temp.path().join("nested"));
    let identity = anonymous::new_identity();

    store.save(&identity).unwrap();
    let loaded = store.load().unwrap();

    assert_that!(loaded.identity, some(eq(&identity)));
    assert!(store.path().exists());
}

#[test]
fn given_saved_identity_when_save_then_no_temp_file_left_behind() {
    let temp = TempDir::new().unwrap();
    let store = FileAnonymousStore::new(temp.path());

    store.save(&anonymous::new_identity()).unwrap();

    let names: Vec<String> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_that!(names, elements_are![eq("anonymous_user.json")]);
}

#[test]
fn given_saved_identity_when_clear_twice_then_file_gone_and_ok() {
    let temp = TempDir::new().unwrap();
    let store = FileAnonymousStore::new(temp.path());
    store.save(&anonymous::new_identity()).unwrap();

    assert_that!(store.clear(), ok(anything()));
    assert_that!(store.clear(), ok(anything()));
    assert!(!store.path().exists());
}

#[test]
fn given_corrupted_file_when_load_then_reports_corruption() {
    let temp = TempDir::new().unwrap();
    let store = FileAnonymousStore::new(temp.path());
    std::fs::write(store.path(), "{ truncated").unwrap();

    let loaded = store.load().unwrap();

    assert_that!(loaded.identity, none());
    assert_that!(loaded.corruption_error, some(anything()));
}

#[test]
fn given_corrupted_file_when_backup_corrupted_then_renamed_aside() {
    let temp = TempDir::new().unwrap();
    let store = FileAnonymousStore::new(temp.path());
    std::fs::write(store.path(), "{ truncated").unwrap();

    let backup = store.backup_corrupted().unwrap().unwrap();

    assert!(!store.path().exists());
    assert!(backup.exists());
    assert_that!(
        backup.file_name().unwrap().to_string_lossy().into_owned(),
        starts_with("anonymous_user.json.corrupted.")
    );
}

#[test]
fn given_no_file_when_backup_corrupted_then_none() {
    let temp = TempDir::new().unwrap();
    let store = FileAnonymousStore::new(temp.path());

    assert_that!(store.backup_corrupted().unwrap(), none());
}
