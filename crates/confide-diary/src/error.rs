use confide_core::{CoreError, ErrorLocation};

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiaryError {
    #[error("Invalid diary entry: {source} {location}")]
    Validation {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Anonymous sessions cannot use the diary {location}")]
    AnonymousAccess { location: ErrorLocation },

    #[error("No active session {location}")]
    NotAuthenticated { location: ErrorLocation },

    #[error("Document store error: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },
}

impl DiaryError {
    /// Creates Store error at caller location.
    #[track_caller]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn anonymous_access() -> Self {
        Self::AnonymousAccess {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_authenticated() -> Self {
        Self::NotAuthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Rejected locally, before any store call.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Store { .. })
    }

    /// Requires a registered session to proceed.
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            Self::AnonymousAccess { .. } | Self::NotAuthenticated { .. }
        )
    }
}

impl From<CoreError> for DiaryError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Validation {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DiaryError>;
