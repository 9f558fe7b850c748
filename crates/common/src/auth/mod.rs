//! Credential storage
//!
//! The store is the only mutable state shared by the request pipeline and the
//! token lifecycle. Readers (every outgoing request) vastly outnumber writers
//! (login, refresh, logout), so the slot sits behind a reader/writer lock and
//! holds the credential as an `Arc` that is swapped as a whole.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   get()    ┌─────────────────────┐
//! │ Request pipeline │──────────► │                     │
//! └──────────────────┘            │  dyn TokenStore     │
//! ┌──────────────────┐ save/clear │  (CredentialStore)  │
//! │   Token client   │──────────► │                     │
//! └──────────────────┘            └─────────────────────┘
//! ```
//!
//! # Usage Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use baasic_common::auth::{CredentialStore, TokenStore};
//! use baasic_domain::Credential;
//!
//! let store = CredentialStore::new();
//! let credential = Credential::new("abc", "bearer", Some(3600), None, chrono::Utc::now());
//!
//! assert!(store.save(Arc::new(credential)));
//! assert_eq!(store.get().map(|c| c.value().to_string()), Some("abc".to_string()));
//! assert!(store.clear());
//! assert!(store.get().is_none());
//! ```

pub mod store;
pub mod traits;

pub use store::{CredentialStore, WaitPolicy};
pub use traits::TokenStore;
