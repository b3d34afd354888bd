use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed tag every locally generated identity id starts with.
pub const ANONYMOUS_ID_PREFIX: &str = "anonymous_";

/// The actor currently using the app.
///
/// Serialized with camel-case keys because the anonymous variant is persisted
/// as-is in local device storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Identity issued by the external identity provider.
    pub fn registered(id: String, email: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            is_anonymous: false,
            created_at,
        }
    }

    /// Locally generated stand-in identity. `id` must carry [`ANONYMOUS_ID_PREFIX`].
    pub fn anonymous(id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email: None,
            is_anonymous: true,
            created_at,
        }
    }

    pub fn is_registered(&self) -> bool {
        !self.is_anonymous
    }

    /// Human-readable name for listings and logs.
    pub fn display_name(&self) -> &str {
        match (self.is_anonymous, self.email.as_deref()) {
            (false, Some(email)) => email,
            _ => &self.id,
        }
    }
}
