use crate::StorageError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors surfaced by the session store and identity provider adapters.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Bad credentials, duplicate registration and similar rejections.
    #[error("Authentication failed: {message} {location}")]
    Authentication {
        message: String,
        location: ErrorLocation,
    },

    /// The provider could not be reached or answered unexpectedly.
    #[error("Identity provider error: {message} {location}")]
    Provider {
        message: String,
        location: ErrorLocation,
    },

    #[error("Local session storage error: {source} {location}")]
    Storage {
        #[source]
        source: StorageError,
        location: ErrorLocation,
    },
}

impl SessionError {
    /// Creates Authentication error at caller location.
    #[track_caller]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Provider error at caller location.
    #[track_caller]
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Authentication { message, .. } => message.clone(),
            Self::Provider { .. } => {
                String::from("The sign-in service is unavailable. Try again later.")
            }
            Self::Storage { source, .. } => source.recovery_hint().to_string(),
        }
    }
}

impl From<StorageError> for SessionError {
    #[track_caller]
    fn from(source: StorageError) -> Self {
        Self::Storage {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
