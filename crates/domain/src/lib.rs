//! # Baasic Domain
//!
//! Data types shared by every layer of the Baasic client.
//!
//! This crate contains:
//! - The bearer [`Credential`] and the token wire format
//! - Client configuration ([`ClientConfig`])
//! - Resource models (collections, authenticated user, metering records)
//! - Platform constants and the [`BaasicError`] / [`Result`] definitions
//!
//! ## Architecture
//! - No dependencies on other Baasic crates
//! - No I/O: everything here is a plain value

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
