mod output;

use crate::App;

use confide_diary::{DiaryRepository, DiaryView, MemoryDocumentStore};
use confide_session::{
    IdentityProvider, MemoryAnonymousStore, ProviderUser, Result as SessionResult, SessionChange,
    SessionChangeFeed, SessionError, SessionStore,
};

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::broadcast;

/// Password accounts held in memory with a single live session.
#[derive(Default)]
pub(crate) struct AccountsProvider {
    accounts: Mutex<HashMap<String, (String, ProviderUser)>>,
    session: Mutex<Option<ProviderUser>>,
    feed: SessionChangeFeed,
    pub(crate) calls: AtomicUsize,
}

impl AccountsProvider {
    fn start(&self, user: ProviderUser) -> ProviderUser {
        *self.session.lock().unwrap() = Some(user.clone());
        self.feed.publish(SessionChange::signed_in(user.clone()));
        user
    }
}

#[async_trait]
impl IdentityProvider for AccountsProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> SessionResult<ProviderUser> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let account = self.accounts.lock().unwrap().get(email).cloned();
        match account {
            Some((stored, user)) if stored == password => Ok(self.start(user)),
            _ => Err(SessionError::authentication("Invalid login credentials")),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> SessionResult<ProviderUser> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(SessionError::authentication("User already registered"));
        }
        let user = ProviderUser {
            id: format!("user-{}", accounts.len() + 1),
            email: Some(email.to_string()),
            created_at: Utc::now(),
        };
        accounts.insert(email.to_string(), (password.to_string(), user.clone()));
        drop(accounts);
        Ok(self.start(user))
    }

    async fn sign_out(&self) -> SessionResult<()> {
        *self.session.lock().unwrap() = None;
        self.feed.publish(SessionChange::signed_out());
        Ok(())
    }

    async fn current_session(&self) -> SessionResult<Option<ProviderUser>> {
        Ok(self.session.lock().unwrap().clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.feed.subscribe()
    }
}

pub(crate) struct Harness {
    pub(crate) app: App,
    pub(crate) provider: Arc<AccountsProvider>,
    pub(crate) documents: Arc<MemoryDocumentStore>,
}

pub(crate) fn harness() -> Harness {
    let provider = Arc::new(AccountsProvider::default());
    let documents = Arc::new(MemoryDocumentStore::new());
    let session = Arc::new(SessionStore::new(
        provider.clone(),
        Arc::new(MemoryAnonymousStore::new()),
    ));
    let diary = DiaryView::new(DiaryRepository::new(documents.clone()));
    Harness {
        app: App::new(session, diary),
        provider,
        documents,
    }
}
