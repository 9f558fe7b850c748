use std::fmt::Debug;
use std::time::Duration;

use baasic_domain::{BaasicError, ClientConfig, Result};
use reqwest::{Client as ReqwestClient, Method, Request, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with built-in retry and timeout support.
///
/// Only idempotent requests are retried; a POST is sent exactly once.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder with retry semantics.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(InfraError::from)?;
        let attempts = if is_idempotent(request.method()) { self.max_attempts.max(1) } else { 1 };
        let method = request.method().clone();
        let url = request.url().clone();
        let mut pending = Some(request);

        for attempt in 0..attempts {
            let is_last = attempt + 1 == attempts;
            let current = if is_last {
                pending.take()
            } else {
                pending.as_ref().and_then(Request::try_clone)
            };
            let Some(current) = current else {
                return Err(BaasicError::InvalidInput(
                    "request body cannot be cloned; buffer the body to enable retries".into(),
                ));
            };

            debug!(attempt = attempt + 1, %method, %url, "sending HTTP request");

            match self.client.execute(current).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %method, %url, %status, "received HTTP response");

                    if status.is_server_error() && !is_last {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(err) => {
                    let err: BaasicError = InfraError::from(err).into();
                    let number = attempt + 1;
                    debug!(attempt = number, %method, %url, error = %err, "HTTP request failed");

                    if !is_last && err.is_retryable() {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Err(err);
                }
            }
        }

        Err(BaasicError::Transport("retries exhausted without a response".into()))
    }

    /// Execute a built request exactly once.
    pub async fn execute_once(&self, request: Request) -> Result<Response> {
        debug!(method = %request.method(), url = %request.url(), "sending HTTP request");
        Ok(self.client.execute(request).await.map_err(InfraError::from)?)
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 1,
            base_backoff: Duration::from_millis(200),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(InfraError::from)?;

        Ok(HttpClient {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}

/// Source of transport handles for the request pipeline
///
/// The pipeline asks for a client at the start of every call and drops it when
/// the call returns, whichever way it returns.
pub trait HttpClientFactory: Send + Sync + Debug {
    fn create(&self) -> Result<HttpClient>;
}

/// Factory handing out handles onto one shared connection pool
#[derive(Debug, Clone)]
pub struct DefaultHttpClientFactory {
    prototype: HttpClient,
}

impl DefaultHttpClientFactory {
    pub fn new(prototype: HttpClient) -> Self {
        Self { prototype }
    }

    /// Build the pool from the configuration's timeout and attempt count.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let prototype = HttpClient::builder()
            .timeout(config.default_timeout)
            .max_attempts(config.max_attempts)
            .user_agent(concat!("baasic-rust/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::new(prototype))
    }
}

impl HttpClientFactory for DefaultHttpClientFactory {
    fn create(&self) -> Result<HttpClient> {
        Ok(self.prototype.clone())
    }
}

fn is_idempotent(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::PUT | Method::DELETE | Method::HEAD | Method::OPTIONS)
}
