//! Baasic REST API clients
//!
//! - **[`client`]**: the request pipeline every other client goes through
//! - **[`token`]**: login, refresh and logout against the auth endpoint
//! - **[`resource`]**: typed CRUD over one module path
//! - **[`metering`]**: metering data and statistics clients
//! - **[`url`]**: URL templates and query strings

pub mod client;
pub mod metering;
pub mod resource;
pub mod token;
pub mod url;

pub use client::{BaasicClient, BaasicClientBuilder};
pub use metering::{MeteringDataClient, MeteringStatisticClient};
pub use resource::ResourceClient;
pub use token::TokenClient;
pub use url::{FindParams, QueryString};
