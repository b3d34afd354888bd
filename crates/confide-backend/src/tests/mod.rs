
use crate::ProviderSession;

use confide_session::ProviderUser;

use chrono::{TimeZone, Utc};

pub(crate) fn sample_session() -> ProviderSession {
    ProviderSession {
        access_token: "access-1".to_string(),
        refresh_token: Some("refresh-1".to_string()),
        expires_at: None,
        user: ProviderUser {
            id: "7d1c2b7e-0000-4000-8000-000000000001".to_string(),
            email: Some("a@x.com".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        },
    }
}
