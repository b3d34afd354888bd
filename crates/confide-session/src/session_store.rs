use crate::{
    AnonymousStore, IdentityProvider, ProviderUser, Result as SessionErrorResult, SessionChange,
    SessionListener, SessionState, anonymous,
};

use confide_core::Identity;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, error, info, warn};
use tokio::sync::RwLock;
use tokio::sync::broadcast::error::RecvError;

/// Authoritative answer to "who is using the app right now".
///
/// Holds at most one identity. Anonymous and registered identities never
/// coexist: establishing a registered session always clears the local
/// anonymous record.
pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    anonymous_store: Arc<dyn AnonymousStore>,
    current: RwLock<Option<Identity>>,
    loading: AtomicBool,
}

/// Resets the loading flag when the provider call finishes, however it ends.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SessionStore {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        anonymous_store: Arc<dyn AnonymousStore>,
    ) -> Self {
        Self {
            provider,
            anonymous_store,
            current: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    /// Derives the startup identity: provider session first, then the local
    /// anonymous record, else none.
    pub async fn restore(&self) -> SessionErrorResult<Option<Identity>> {
        let _loading = LoadingGuard::start(&self.loading);

        if let Some(user) = self.provider.current_session().await? {
            info!("Restored provider session for {}", user.id);
            return Ok(Some(self.establish_registered(user).await));
        }

        let loaded = self.anonymous_store.load()?;
        if let Some(message) = loaded.corruption_error {
            warn!("Discarding unusable anonymous record: {message}");
            if let Err(e) = self.anonymous_store.backup_corrupted() {
                warn!("Failed to set aside anonymous record: {e}");
            }
        }

        let mut current = self.current.write().await;
        *current = loaded.identity;
        match current.as_ref() {
            Some(identity) => info!("Restored anonymous session {}", identity.id),
            None => debug!("No session to restore"),
        }
        Ok(current.clone())
    }

    /// Signs in with the provider. On failure nothing changes.
    pub async fn login(&self, email: &str, password: &str) -> SessionErrorResult<Identity> {
        let user = {
            let _loading = LoadingGuard::start(&self.loading);
            self.provider
                .sign_in_with_password(email, password)
                .await
                .inspect_err(|e| warn!("Login failed: {e}"))?
        };
        Ok(self.establish_registered(user).await)
    }

    /// Creates an account with the provider. Same replacement rules as `login`.
    pub async fn register(&self, email: &str, password: &str) -> SessionErrorResult<Identity> {
        let user = {
            let _loading = LoadingGuard::start(&self.loading);
            self.provider
                .sign_up(email, password)
                .await
                .inspect_err(|e| warn!("Registration failed: {e}"))?
        };
        Ok(self.establish_registered(user).await)
    }

    /// Starts a guest session with a fresh local identity. No network call.
    ///
    /// Does not sign out an existing provider session; a registered identity
    /// held in memory is simply replaced.
    pub async fn login_anonymously(&self) -> SessionErrorResult<Identity> {
        let identity = anonymous::new_identity();
        self.anonymous_store.save(&identity)?;

        let mut current = self.current.write().await;
        if let Some(previous) = current.as_ref()
            && previous.is_registered()
        {
            warn!(
                "Anonymous login replaced registered identity {} without signing out",
                previous.id
            );
        }
        *current = Some(identity.clone());
        info!("Started anonymous session {}", identity.id);
        Ok(identity)
    }

    /// Ends the session. The identity and the local record are always cleared;
    /// a provider sign-out failure is reported afterwards.
    pub async fn logout(&self) -> SessionErrorResult<()> {
        let signed_out = self.provider.sign_out().await;
        let cleared = self.anonymous_store.clear();

        let previous = self.current.write().await.take();
        if let Some(previous) = previous {
            info!("Logged out {}", previous.id);
        }

        if let Err(e) = &signed_out {
            error!("Provider sign-out failed: {e}");
        }
        signed_out?;
        cleared?;
        Ok(())
    }

    /// Re-derives the identity from a provider notification.
    ///
    /// A provider session always wins. Losing the provider session ends a
    /// registered identity but leaves a guest session alone, since the
    /// provider never knew about it.
    pub async fn apply_change(&self, change: &SessionChange) {
        debug!("Session change received: {:?}", change.event);
        match &change.user {
            Some(user) => {
                self.establish_registered(user.clone()).await;
            }
            None => {
                let mut current = self.current.write().await;
                if current.as_ref().is_some_and(Identity::is_registered)
                    && let Some(previous) = current.take()
                {
                    info!("Provider session ended for {}", previous.id);
                }
            }
        }
    }

    /// Spawns a task applying provider notifications until the returned guard
    /// is dropped.
    pub fn listen(self: &Arc<Self>) -> SessionListener {
        let mut receiver = self.provider.subscribe();
        let store = Arc::clone(self);

        let handle = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(change) => store.apply_change(&change).await,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Session listener skipped {skipped} changes, resyncing");
                        store.resync().await;
                    }
                    Err(RecvError::Closed) => {
                        debug!("Session change feed closed");
                        break;
                    }
                }
            }
        });

        SessionListener::new(handle)
    }

    pub async fn current(&self) -> Option<Identity> {
        self.current.read().await.clone()
    }

    pub async fn state(&self) -> SessionState {
        SessionState::of(self.current.read().await.as_ref())
    }

    /// True while a restore, login or register call is waiting on the provider.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    async fn resync(&self) {
        match self.provider.current_session().await {
            Ok(user) => {
                let change = match user {
                    Some(user) => SessionChange::signed_in(user),
                    None => SessionChange::ended(),
                };
                self.apply_change(&change).await;
            }
            Err(e) => warn!("Session resync failed: {e}"),
        }
    }

    /// Installs a registered identity and drops any anonymous record.
    async fn establish_registered(&self, user: ProviderUser) -> Identity {
        let identity = user.into_identity();

        // A stale record is removed again on the next restore.
        if let Err(e) = self.anonymous_store.clear() {
            warn!("Failed to clear anonymous record: {e}");
        }

        *self.current.write().await = Some(identity.clone());
        info!("Registered session active for {}", identity.id);
        identity
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}
