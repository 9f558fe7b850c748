//! Runtime pieces shared across Baasic crates.
//!
//! # Feature Tiers
//!
//! - always on: [`auth`] credential storage
//! - `observability`: subscriber installation for binaries and demos
//! - `test-utils`: fixtures and mock stores for downstream test suites

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;

#[cfg(any(feature = "observability", test))]
pub mod observability;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{CredentialStore, TokenStore, WaitPolicy};
