use crate::{BackendError, BackendResult, SessionFile};

use confide_session::ProviderUser;

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use log::debug;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tokens issued by the identity provider for one signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub user: ProviderUser,
}

impl ProviderSession {
    /// Past its expiry and holding a refresh token to renew it with.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.refresh_token.is_some() && self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Session payload returned by the token and signup endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: ProviderUser,
}

impl TokenResponse {
    pub(crate) fn into_session(self) -> ProviderSession {
        ProviderSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self
                .expires_in
                .map(|seconds| Utc::now() + Duration::seconds(seconds)),
            user: self.user,
        }
    }
}

/// HTTP client for the hosted backend.
///
/// Every request carries the project key. Once a provider session is set,
/// requests also carry its access token as a bearer credential.
pub struct BackendClient {
    base_url: String,
    api_key: String,
    client: ReqwestClient,
    session: RwLock<Option<ProviderSession>>,
    session_file: Option<SessionFile>,
}

impl BackendClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Backend URL (e.g., "http://127.0.0.1:54321")
    /// * `api_key` - Project key sent in the `apikey` header
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: ReqwestClient::new(),
            session: RwLock::new(None),
            session_file: None,
        }
    }

    /// Persists the provider session to `file` and seeds it from there.
    pub fn with_session_file(self, file: SessionFile) -> BackendResult<Self> {
        let persisted = file.load()?;
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = persisted;
        Ok(Self {
            session_file: Some(file),
            ..self
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<ProviderSession> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.session().map(|session| session.access_token)
    }

    /// Replaces the held session, mirroring it to the session file.
    pub fn set_session(&self, session: Option<ProviderSession>) -> BackendResult<()> {
        if let Some(file) = &self.session_file {
            match &session {
                Some(session) => file.save(session)?,
                None => file.clear()?,
            }
        }
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
        Ok(())
    }

    /// Build a request with the project key and, when signed in, the bearer token
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .client
            .request(method, &url)
            .header("apikey", &self.api_key);

        if let Some(token) = self.access_token() {
            req = req.bearer_auth(token);
        }

        req
    }

    /// Like [`request`](Self::request) but always authorised with `token`.
    pub fn request_with_token(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
    }

    /// Execute request and decode the JSON body
    pub async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> BackendResult<T> {
        let response = self.send(req).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Execute request whose body is irrelevant
    pub async fn execute_empty(&self, req: RequestBuilder) -> BackendResult<()> {
        self.send(req).await?;
        Ok(())
    }

    async fn send(&self, req: RequestBuilder) -> BackendResult<Response> {
        let response = req.send().await?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let value: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
        let (code, message) = error_fields(&value, status.canonical_reason());
        Err(BackendError::api(status.as_u16(), code, message))
    }
}

/// Pulls the code and message out of the error shapes the auth and rest
/// endpoints return.
pub(crate) fn error_fields(body: &Value, reason: Option<&str>) -> (String, String) {
    let text = |key: &str| {
        body.get(key).and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    };

    let code = text("error_code")
        .or_else(|| text("error"))
        .or_else(|| text("code"))
        .unwrap_or_else(|| "UNKNOWN".to_string());
    let message = text("error_description")
        .or_else(|| text("msg"))
        .or_else(|| text("message"))
        .or_else(|| text("error"))
        .or_else(|| reason.map(String::from))
        .unwrap_or_else(|| "Unknown error".to_string());

    (code, message)
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .field("signed_in", &self.access_token().is_some())
            .finish_non_exhaustive()
    }
}
