use crate::client::TokenResponse;
use crate::{BackendClient, BackendResult, ProviderSession};

use confide_session::{
    IdentityProvider, ProviderUser, Result as SessionErrorResult, SessionChange,
    SessionChangeFeed, SessionEvent,
};

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const TOKEN_PATH: &str = "/auth/v1/token?grant_type=password";
const REFRESH_PATH: &str = "/auth/v1/token?grant_type=refresh_token";
const SIGNUP_PATH: &str = "/auth/v1/signup";
const LOGOUT_PATH: &str = "/auth/v1/logout";
const USER_PATH: &str = "/auth/v1/user";

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

/// Signup answers with a session, or with the bare user while email
/// confirmation is pending.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    Pending(ProviderUser),
}

/// Identity provider backed by the hosted auth endpoints.
#[derive(Debug)]
pub struct HttpIdentityProvider {
    client: Arc<BackendClient>,
    feed: SessionChangeFeed,
}

impl HttpIdentityProvider {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self {
            client,
            feed: SessionChangeFeed::new(),
        }
    }

    pub fn client(&self) -> &Arc<BackendClient> {
        &self.client
    }

    async fn password_grant(&self, email: &str, password: &str) -> BackendResult<ProviderUser> {
        let req = self
            .client
            .request(Method::POST, TOKEN_PATH)
            .json(&Credentials { email, password });
        let response: TokenResponse = self.client.execute(req).await?;

        let session = response.into_session();
        let user = session.user.clone();
        self.client.set_session(Some(session))?;
        Ok(user)
    }

    async fn create_account(&self, email: &str, password: &str) -> BackendResult<ProviderUser> {
        let req = self
            .client
            .request(Method::POST, SIGNUP_PATH)
            .json(&Credentials { email, password });

        match self.client.execute(req).await? {
            SignUpResponse::Session(response) => {
                let session = response.into_session();
                let user = session.user.clone();
                self.client.set_session(Some(session))?;
                Ok(user)
            }
            SignUpResponse::Pending(user) => {
                info!("Account {} created; email confirmation pending", user.id);
                Ok(user)
            }
        }
    }

    /// Trades the refresh token for a fresh session and stores it.
    async fn refresh_grant(&self, refresh_token: &str) -> BackendResult<ProviderUser> {
        let req = self
            .client
            .request(Method::POST, REFRESH_PATH)
            .json(&RefreshGrant { refresh_token });
        let response: TokenResponse = self.client.execute(req).await?;

        let mut session = response.into_session();
        if session.refresh_token.is_none() {
            session.refresh_token = Some(refresh_token.to_string());
        }
        let user = session.user.clone();
        self.client.set_session(Some(session))?;
        Ok(user)
    }

    /// Ends the session only when the provider refuses the refresh token.
    async fn refresh_or_end(
        &self,
        refresh_token: &str,
    ) -> SessionErrorResult<Option<ProviderUser>> {
        match self.refresh_grant(refresh_token).await {
            Ok(user) => {
                info!("Refreshed provider session for {}", user.id);
                self.feed.publish(SessionChange {
                    event: SessionEvent::UserUpdated,
                    user: Some(user.clone()),
                });
                Ok(Some(user))
            }
            Err(e) if e.is_unauthorized() || e.is_credential_rejection() => {
                info!("Refresh token was rejected: {e}");
                self.end_session()?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_user(&self, token: &str) -> BackendResult<ProviderUser> {
        let req = self
            .client
            .request_with_token(Method::GET, USER_PATH, token);
        self.client.execute(req).await
    }

    /// Forgets the held tokens and tells subscribers the session is gone.
    fn end_session(&self) -> BackendResult<()> {
        self.client.set_session(None)?;
        self.feed.publish(SessionChange::ended());
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> SessionErrorResult<ProviderUser> {
        let user = self.password_grant(email, password).await?;
        info!("Provider sign-in succeeded for {}", user.id);
        self.feed.publish(SessionChange::signed_in(user.clone()));
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> SessionErrorResult<ProviderUser> {
        let user = self.create_account(email, password).await?;
        if self.client.session().is_some() {
            self.feed.publish(SessionChange::signed_in(user.clone()));
        }
        Ok(user)
    }

    /// Local tokens are dropped even when the server call fails.
    async fn sign_out(&self) -> SessionErrorResult<()> {
        let remote = match self.client.access_token() {
            Some(token) => {
                let req = self
                    .client
                    .request_with_token(Method::POST, LOGOUT_PATH, &token);
                match self.client.execute_empty(req).await {
                    Err(e) if !e.is_unauthorized() => Err(e),
                    _ => Ok(()),
                }
            }
            None => Ok(()),
        };

        self.client.set_session(None)?;
        self.feed.publish(SessionChange::signed_out());

        if let Err(e) = &remote {
            warn!("Provider sign-out failed: {e}");
        }
        remote.map_err(Into::into)
    }

    async fn current_session(&self) -> SessionErrorResult<Option<ProviderUser>> {
        let Some(session) = self.client.session() else {
            return Ok(None);
        };

        if session.needs_refresh(Utc::now())
            && let Some(refresh_token) = session.refresh_token.as_deref()
        {
            return self.refresh_or_end(refresh_token).await;
        }

        match self.fetch_user(&session.access_token).await {
            Ok(user) => {
                if user != session.user {
                    self.client.set_session(Some(ProviderSession {
                        user: user.clone(),
                        ..session
                    }))?;
                    self.feed.publish(SessionChange {
                        event: SessionEvent::UserUpdated,
                        user: Some(user.clone()),
                    });
                }
                Ok(Some(user))
            }
            Err(e) if e.is_unauthorized() => match session.refresh_token.as_deref() {
                Some(refresh_token) => self.refresh_or_end(refresh_token).await,
                None => {
                    info!("Persisted provider session was rejected");
                    self.end_session()?;
                    Ok(None)
                }
            },
            Err(e) => Err(e.into()),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.feed.subscribe()
    }
}
