//! # Baasic Infrastructure
//!
//! Everything in the Baasic client that performs I/O.
//!
//! This crate contains:
//! - The `reqwest` transport wrapper and its factory ([`http`])
//! - The request pipeline, token lifecycle and resource clients ([`api`])
//! - Configuration loading from the environment and files ([`config`])
//! - Conversions from third-party errors into [`baasic_domain::BaasicError`]
//!
//! ## Architecture
//! - Depends on `baasic-domain` for values and `baasic-common` for the
//!   credential store
//! - Every async operation takes a [`CancellationToken`]

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{
    BaasicClient, BaasicClientBuilder, FindParams, MeteringDataClient, MeteringStatisticClient,
    QueryString, ResourceClient, TokenClient,
};
pub use http::{DefaultHttpClientFactory, HttpClient, HttpClientFactory};
pub use tokio_util::sync::CancellationToken;
