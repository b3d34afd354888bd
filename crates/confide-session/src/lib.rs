//! Session state for the app: who is using it right now.
//!
//! The [`SessionStore`] is an explicit handle combining the external identity
//! provider with a local record for anonymous sessions. Share it through an
//! `Arc`; nothing here is process-global.

pub mod anonymous;
pub mod change_feed;
pub mod error;
pub mod listener;
pub mod provider;
pub mod session_state;
pub mod session_store;
pub mod storage;

#[cfg(test)]
mod tests;

pub use change_feed::SessionChangeFeed;
pub use error::{Result, SessionError};
pub use listener::SessionListener;
pub use provider::{IdentityProvider, ProviderUser, SessionChange, SessionEvent};
pub use session_state::SessionState;
pub use session_store::SessionStore;
pub use storage::{
    AnonymousStore, LoadResult,
    error::{StorageAction, StorageError},
    file_store::FileAnonymousStore,
    memory_store::MemoryAnonymousStore,
};
