//! Transport layer

pub mod client;

pub use client::{DefaultHttpClientFactory, HttpClient, HttpClientBuilder, HttpClientFactory};
