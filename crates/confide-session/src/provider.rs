use crate::Result as SessionErrorResult;

use confide_core::Identity;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// User record as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProviderUser {
    pub fn into_identity(self) -> Identity {
        Identity::registered(self.id, self.email, self.created_at)
    }
}

/// What happened to the provider session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    SignedOut,
    UserUpdated,
    /// Tokens were rejected or expired without an explicit sign-out.
    SessionEnded,
}

/// Notification pushed by the provider whenever its session changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionChange {
    pub event: SessionEvent,
    /// The session user after the change, if any.
    pub user: Option<ProviderUser>,
}

impl SessionChange {
    pub fn signed_in(user: ProviderUser) -> Self {
        Self {
            event: SessionEvent::SignedIn,
            user: Some(user),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            event: SessionEvent::SignedOut,
            user: None,
        }
    }

    pub fn ended() -> Self {
        Self {
            event: SessionEvent::SessionEnded,
            user: None,
        }
    }
}

/// Boundary to the external identity provider.
///
/// Implementations own credential checks and session token persistence.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> SessionErrorResult<ProviderUser>;

    async fn sign_up(&self, email: &str, password: &str) -> SessionErrorResult<ProviderUser>;

    async fn sign_out(&self) -> SessionErrorResult<()>;

    /// The persisted provider session, if it is still valid.
    async fn current_session(&self) -> SessionErrorResult<Option<ProviderUser>>;

    /// Subscribes to session changes. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> broadcast::Receiver<SessionChange>;
}
