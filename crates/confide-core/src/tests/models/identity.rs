use crate::{ANONYMOUS_ID_PREFIX, Identity};

use chrono::{TimeZone, Utc};
use googletest::prelude::*;

#[test]
fn given_anonymous_identity_when_serialized_then_uses_camel_case_keys() {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let identity = Identity::anonymous(format!("{ANONYMOUS_ID_PREFIX}abc123xyz"), created_at);

    let json = serde_json::to_string(&identity).unwrap();

    assert_that!(json, contains_substring("\"isAnonymous\":true"));
    assert_that!(json, contains_substring("\"createdAt\""));
    assert_that!(json, contains_substring("anonymous_abc123xyz"));
}

#[test]
fn given_stored_record_without_email_when_deserialized_then_email_is_none() {
    let json = r#"{"id":"anonymous_k2j4h5g6f","isAnonymous":true,"createdAt":"2024-01-01T00:00:00Z"}"#;

    let identity: Identity = serde_json::from_str(json).unwrap();

    assert_that!(identity.email, none());
    assert_that!(identity.is_anonymous, eq(true));
    assert_that!(identity.is_registered(), eq(false));
}

#[test]
fn given_registered_identity_when_display_name_then_uses_email() {
    let identity = Identity::registered("u-1".into(), Some("a@x.com".into()), Utc::now());

    assert_that!(identity.display_name(), eq("a@x.com"));
    assert_that!(identity.is_registered(), eq(true));
}

#[test]
fn given_anonymous_identity_when_display_name_then_uses_id() {
    let identity = Identity::anonymous("anonymous_000000000".into(), Utc::now());

    assert_that!(identity.display_name(), eq("anonymous_000000000"));
}
