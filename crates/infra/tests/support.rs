//! Shared helpers for the infra integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use baasic_common::testing::CountingTokenStore;
use baasic_domain::{ClientConfig, Result};
use baasic_infra::{BaasicClient, DefaultHttpClientFactory, HttpClient, HttpClientFactory};
use wiremock::MockServer;

pub const APP: &str = "demo";

/// Mock backend plus a client wired to an isolated credential store.
pub struct TestBackend {
    pub server: MockServer,
    pub store: Arc<CountingTokenStore>,
    pub factory: Arc<CountingFactory>,
    pub client: Arc<BaasicClient>,
}

impl TestBackend {
    pub async fn start() -> Self {
        Self::start_with(CountingTokenStore::new(), |config| config).await
    }

    pub async fn start_with<F>(store: CountingTokenStore, adjust: F) -> Self
    where
        F: FnOnce(ClientConfig) -> ClientConfig,
    {
        let server = MockServer::start().await;
        let config = adjust(config_for(&server.uri()));
        let store = Arc::new(store);
        let factory = Arc::new(CountingFactory::new(&config));

        let client = BaasicClient::builder()
            .config(config)
            .token_store(store.clone())
            .http_factory(factory.clone())
            .build()
            .expect("client builds");

        Self { server, store, factory, client: Arc::new(client) }
    }

    pub async fn request_count(&self) -> usize {
        self.server.received_requests().await.map(|r| r.len()).unwrap_or_default()
    }
}

/// Plain API under `/api`, TLS API under `/secure`.
pub fn config_for(uri: &str) -> ClientConfig {
    ClientConfig::new(format!("{uri}/api"), format!("{uri}/secure/"), APP)
}

/// Factory that counts how many transport handles were handed out.
#[derive(Debug)]
pub struct CountingFactory {
    inner: DefaultHttpClientFactory,
    created: AtomicUsize,
}

impl CountingFactory {
    pub fn new(config: &ClientConfig) -> Self {
        let prototype = HttpClient::builder()
            .timeout(config.default_timeout)
            .max_attempts(config.max_attempts)
            .base_backoff(std::time::Duration::from_millis(5))
            .build()
            .expect("http client");
        Self { inner: DefaultHttpClientFactory::new(prototype), created: AtomicUsize::new(0) }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl HttpClientFactory for CountingFactory {
    fn create(&self) -> Result<HttpClient> {
        self.created.fetch_add(1, Ordering::SeqCst);
        self.inner.create()
    }
}
