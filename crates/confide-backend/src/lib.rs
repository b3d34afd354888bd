//! HTTP adapters for the hosted backend.
//!
//! [`BackendClient`] owns the connection settings and the provider session
//! tokens. [`HttpIdentityProvider`] and [`HttpDocumentStore`] share one client
//! so diary requests run under the signed-in user's token.

pub mod client;
pub mod document_store;
pub mod error;
pub mod identity_provider;
pub mod session_file;

#[cfg(test)]
mod tests;

pub use client::{BackendClient, ProviderSession};
pub use document_store::HttpDocumentStore;
pub use error::{BackendError, Result as BackendResult};
pub use identity_provider::HttpIdentityProvider;
pub use session_file::SessionFile;

/// Collection holding diary rows.
pub const DIARY_TABLE: &str = "diary_entries";
