#![allow(dead_code)]

use confide_session::{
    IdentityProvider, ProviderUser, Result as SessionResult, SessionChange, SessionChangeFeed,
    SessionError, SessionState, SessionStore,
};

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::broadcast;

/// In-process identity provider with the same observable behaviour as the
/// hosted one: password accounts, a single live session and change events.
#[derive(Default)]
pub struct FakeIdentityProvider {
    accounts: Mutex<HashMap<String, (String, ProviderUser)>>,
    session: Mutex<Option<ProviderUser>>,
    feed: SessionChangeFeed,
    unavailable: AtomicBool,
    next_id: AtomicUsize,
    pub sign_in_calls: AtomicUsize,
    pub sign_out_calls: AtomicUsize,
}

impl FakeIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a provider error while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Seeds an account and makes it the live provider session.
    pub fn seed_session(&self, email: &str, password: &str) -> ProviderUser {
        let user = self.create_account(email, password);
        *self.session.lock().unwrap() = Some(user.clone());
        user
    }

    /// Simulates token expiry or a sign-out from another device.
    pub fn end_session(&self) {
        *self.session.lock().unwrap() = None;
        self.feed.publish(SessionChange::ended());
    }

    pub fn publish(&self, change: SessionChange) -> usize {
        self.feed.publish(change)
    }

    pub fn subscriber_count(&self) -> usize {
        self.feed.subscriber_count()
    }

    pub fn has_session(&self) -> bool {
        self.session.lock().unwrap().is_some()
    }

    fn create_account(&self, email: &str, password: &str) -> ProviderUser {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = ProviderUser {
            id: format!("00000000-0000-0000-0000-{n:012}"),
            email: Some(email.to_string()),
            created_at: Utc::now(),
        };
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), user.clone()));
        user
    }

    fn check_available(&self) -> SessionResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SessionError::provider("connection refused"));
        }
        Ok(())
    }

    fn start_session(&self, user: ProviderUser) -> ProviderUser {
        *self.session.lock().unwrap() = Some(user.clone());
        self.feed.publish(SessionChange::signed_in(user.clone()));
        user
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> SessionResult<ProviderUser> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let account = self.accounts.lock().unwrap().get(email).cloned();
        match account {
            Some((stored, user)) if stored == password => Ok(self.start_session(user)),
            _ => Err(SessionError::authentication("Invalid login credentials")),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> SessionResult<ProviderUser> {
        self.check_available()?;
        if self.accounts.lock().unwrap().contains_key(email) {
            return Err(SessionError::authentication("User already registered"));
        }
        let user = self.create_account(email, password);
        Ok(self.start_session(user))
    }

    async fn sign_out(&self) -> SessionResult<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        *self.session.lock().unwrap() = None;
        self.feed.publish(SessionChange::signed_out());
        Ok(())
    }

    async fn current_session(&self) -> SessionResult<Option<ProviderUser>> {
        self.check_available()?;
        Ok(self.session.lock().unwrap().clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.feed.subscribe()
    }
}

/// Polls until the store reaches `expected`, failing after one second.
pub async fn wait_for_state(store: &SessionStore, expected: SessionState) {
    for _ in 0..100 {
        if store.state().await == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "session never reached {expected}, still {}",
        store.state().await
    );
}

/// Polls until the provider has no subscribers left.
pub async fn wait_for_unsubscribe(provider: &FakeIdentityProvider) {
    for _ in 0..100 {
        if provider.subscriber_count() == 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("listener still subscribed");
}

pub fn store_with(
    provider: Arc<FakeIdentityProvider>,
    anonymous: Arc<confide_session::MemoryAnonymousStore>,
) -> Arc<SessionStore> {
    Arc::new(SessionStore::new(provider, anonymous))
}
