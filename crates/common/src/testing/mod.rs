//! Testing utilities and helpers
//!
//! - **[`fixtures`]**: credentials and auth endpoint payloads
//! - **[`mocks`]**: a [`TokenStore`](crate::auth::TokenStore) that counts
//!   accesses

pub mod fixtures;
pub mod mocks;

pub use fixtures::{
    expired_credential, sample_credential, token_error_payload, token_payload,
};
pub use mocks::CountingTokenStore;
