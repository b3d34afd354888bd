use confide_diary::DiaryError;
use confide_session::{SessionError, StorageError};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors raised while talking to the hosted backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status with the message pulled from the error body.
    #[error("API error: {message} (status: {status}, code: {code}) {location}")]
    Api {
        status: u16,
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session file error: {source} {location}")]
    SessionFile {
        #[source]
        source: StorageError,
        location: ErrorLocation,
    },

    #[error("No signed-in session {location}")]
    NotSignedIn { location: ErrorLocation },
}

impl BackendError {
    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        BackendError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        BackendError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn api(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        BackendError::Api {
            status,
            code: code.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_signed_in() -> Self {
        BackendError::NotSignedIn {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Credentials or the session token were rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// How the auth endpoints signal bad credentials or a rejected sign-up.
    pub fn is_credential_rejection(&self) -> bool {
        matches!(self, Self::Api { status: 400 | 401 | 422, .. })
    }

    /// The message carried by the error body, or the full error text.
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        BackendError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for BackendError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        BackendError::from_json(err)
    }
}

impl From<StorageError> for BackendError {
    #[track_caller]
    fn from(source: StorageError) -> Self {
        BackendError::SessionFile {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<BackendError> for SessionError {
    #[track_caller]
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::SessionFile { source, .. } => SessionError::from(source),
            e if e.is_credential_rejection() => SessionError::authentication(e.message()),
            e => SessionError::provider(e.to_string()),
        }
    }
}

impl From<BackendError> for DiaryError {
    #[track_caller]
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotSignedIn { .. } => DiaryError::not_authenticated(),
            e => DiaryError::store(e.message()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;
