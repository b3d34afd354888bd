#![allow(dead_code)]

use confide_backend::{BackendClient, ProviderSession};
use confide_session::ProviderUser;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const API_KEY: &str = "anon-key";
pub const USER_ID: &str = "7d1c2b7e-0000-4000-8000-000000000001";
pub const ACCESS_TOKEN: &str = "access-1";

pub fn user_json() -> Value {
    json!({
        "id": USER_ID,
        "email": "a@x.com",
        "created_at": "2024-01-01T00:00:00.000000Z"
    })
}

pub fn token_json() -> Value {
    json!({
        "access_token": ACCESS_TOKEN,
        "refresh_token": "refresh-1",
        "expires_in": 3600,
        "token_type": "bearer",
        "user": user_json()
    })
}

pub fn entry_json(id: &str, title: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "user_id": USER_ID,
        "title": title,
        "content": "content",
        "mood": "happy",
        "created_at": created_at,
        "updated_at": created_at
    })
}

pub fn provider_session() -> ProviderSession {
    ProviderSession {
        access_token: ACCESS_TOKEN.to_string(),
        refresh_token: Some("refresh-1".to_string()),
        expires_at: None,
        user: ProviderUser {
            id: USER_ID.to_string(),
            email: Some("a@x.com".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        },
    }
}

pub fn client(server: &MockServer) -> Arc<BackendClient> {
    Arc::new(BackendClient::new(&server.uri(), API_KEY))
}

pub fn signed_in_client(server: &MockServer) -> Arc<BackendClient> {
    let client = client(server);
    client.set_session(Some(provider_session())).unwrap();
    client
}
