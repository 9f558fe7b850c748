//! Request pipeline
//!
//! Builds URLs, attaches content negotiation and bearer headers, encodes JSON
//! bodies, sends the call and maps the response to a typed value or a
//! [`BaasicError`]. The credential is read from the store on every call, so a
//! login or refresh is visible to the very next request.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use baasic_common::auth::{CredentialStore, TokenStore};
use baasic_domain::{BaasicError, ClientConfig, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::url::{format_template, join_url};
use crate::errors::InfraError;
use crate::http::{DefaultHttpClientFactory, HttpClientFactory};

/// Generic client for the Baasic REST API
///
/// Cheap to clone; clones share configuration, credential store and
/// transport factory.
#[derive(Debug, Clone)]
pub struct BaasicClient {
    config: Arc<ClientConfig>,
    token_store: Arc<dyn TokenStore>,
    http_factory: Arc<dyn HttpClientFactory>,
}

impl BaasicClient {
    /// Client over the process-wide credential store.
    ///
    /// # Errors
    /// Returns `BaasicError::Config` if the configuration does not validate.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> BaasicClientBuilder {
        BaasicClientBuilder::default()
    }

    pub fn config(&self) -> &Arc<ClientConfig> {
        &self.config
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.token_store
    }

    /// `{base}/{template formatted with args}`, with the TLS base when
    /// `secure` is set.
    pub fn build_url(&self, secure: bool, template: &str, args: &[&dyn Display]) -> Result<String> {
        let path = format_template(template, args)?;
        Ok(join_url(self.config.base_for(secure), &path))
    }

    /// Like [`BaasicClient::build_url`] over the plain base, with the
    /// application identifier segment in front of the path.
    pub fn api_url(&self, template: &str, args: &[&dyn Display]) -> Result<String> {
        self.application_url(false, template, args)
    }

    /// Like [`BaasicClient::api_url`] over the TLS base.
    pub fn secure_api_url(&self, template: &str, args: &[&dyn Display]) -> Result<String> {
        self.application_url(true, template, args)
    }

    fn application_url(
        &self,
        secure: bool,
        template: &str,
        args: &[&dyn Display],
    ) -> Result<String> {
        let path = format_template(template, args)?;
        let base = self.config.base_for(secure);
        let identifier = self.config.application_identifier.trim_matches('/');

        if identifier.is_empty() {
            Ok(join_url(base, &path))
        } else {
            Ok(join_url(&join_url(base, identifier), &path))
        }
    }

    /// GET `url` and deserialize the body.
    #[instrument(skip(self, cancel), fields(url = %url))]
    pub async fn get<T>(&self, url: &str, cancel: &CancellationToken) -> Result<T>
    where
        T: DeserializeOwned,
    {
        with_cancellation(cancel, async {
            let response = self.execute(Method::GET, url, |request| request).await?;
            read_body(ensure_success(response).await?).await
        })
        .await
    }

    /// POST `body` as JSON and deserialize the response body.
    #[instrument(skip(self, body, cancel), fields(url = %url))]
    pub async fn post<B, T>(&self, url: &str, body: &B, cancel: &CancellationToken) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = self.encode_body(body)?;
        with_cancellation(cancel, async {
            let response = self.execute(Method::POST, url, |r| self.with_json(r, payload)).await?;
            read_body(ensure_success(response).await?).await
        })
        .await
    }

    /// PUT `body` as JSON and deserialize the response body.
    #[instrument(skip(self, body, cancel), fields(url = %url))]
    pub async fn put<B, T>(&self, url: &str, body: &B, cancel: &CancellationToken) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = self.encode_body(body)?;
        with_cancellation(cancel, async {
            let response = self.execute(Method::PUT, url, |r| self.with_json(r, payload)).await?;
            read_body(ensure_success(response).await?).await
        })
        .await
    }

    /// PUT `body` as JSON and report the raw status instead of requiring
    /// success.
    #[instrument(skip(self, body, cancel), fields(url = %url))]
    pub async fn put_status<B>(
        &self,
        url: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<StatusCode>
    where
        B: Serialize + ?Sized,
    {
        let payload = self.encode_body(body)?;
        with_cancellation(cancel, async {
            let response = self.execute(Method::PUT, url, |r| self.with_json(r, payload)).await?;
            Ok(response.status())
        })
        .await
    }

    /// DELETE `url`; `true` only for `200 OK`.
    ///
    /// Other statuses are a `false` result, not an error.
    #[instrument(skip(self, cancel), fields(url = %url))]
    pub async fn delete(&self, url: &str, cancel: &CancellationToken) -> Result<bool> {
        with_cancellation(cancel, async {
            let response = self.execute(Method::DELETE, url, |request| request).await?;
            let status = response.status();
            debug!(%status, "delete completed");
            Ok(status == StatusCode::OK)
        })
        .await
    }

    /// Send a request shaped by `configure` and require a success status.
    ///
    /// The pipeline still adds the `Accept` and `Authorization` headers and
    /// the timeout; `configure` adds the body and anything else. Never
    /// retried, whatever the method.
    #[instrument(skip(self, cancel, configure), fields(method = %method, url = %url))]
    pub async fn send<F>(
        &self,
        method: Method,
        url: &str,
        cancel: &CancellationToken,
        configure: F,
    ) -> Result<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        with_cancellation(cancel, async {
            let http = self.http_factory.create()?;
            let request = self.prepare(http.request(method, url), configure);
            let request = request.build().map_err(InfraError::from)?;
            let response = http.execute_once(request).await?;
            ensure_success(response).await
        })
        .await
    }

    /// Serialize `body` as the pipeline sends it, honouring the serializer
    /// options.
    pub fn encode_body<B: Serialize + ?Sized>(&self, body: &B) -> Result<Vec<u8>> {
        let mut value = serde_json::to_value(body).map_err(InfraError::from)?;
        if self.config.serializer.omit_null_fields {
            strip_nulls(&mut value);
        }
        Ok(serde_json::to_vec(&value).map_err(InfraError::from)?)
    }

    /// Attach a pre-encoded JSON body with the configured content type.
    pub fn with_json(&self, request: RequestBuilder, payload: Vec<u8>) -> RequestBuilder {
        request.header(CONTENT_TYPE, self.config.content_type()).body(payload)
    }

    async fn execute<F>(&self, method: Method, url: &str, configure: F) -> Result<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let http = self.http_factory.create()?;
        let request = self.prepare(http.request(method, url), configure);
        http.send(request).await
    }

    fn prepare<F>(&self, request: RequestBuilder, configure: F) -> RequestBuilder
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let mut request = request
            .timeout(self.config.default_timeout)
            .header(ACCEPT, self.config.default_media_type.as_str());

        if let Some(credential) = self.token_store.valid() {
            request = request.header(AUTHORIZATION, credential.authorization_header());
        }

        configure(request)
    }
}

/// Builder for [`BaasicClient`].
#[derive(Debug, Default)]
pub struct BaasicClientBuilder {
    config: Option<Arc<ClientConfig>>,
    token_store: Option<Arc<dyn TokenStore>>,
    http_factory: Option<Arc<dyn HttpClientFactory>>,
}

impl BaasicClientBuilder {
    pub fn config(mut self, config: impl Into<Arc<ClientConfig>>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Store read for authorization and written by the token client;
    /// defaults to the process-wide store.
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    pub fn http_factory(mut self, factory: Arc<dyn HttpClientFactory>) -> Self {
        self.http_factory = Some(factory);
        self
    }

    pub fn build(self) -> Result<BaasicClient> {
        let config = self
            .config
            .ok_or_else(|| BaasicError::Config("client configuration is required".into()))?;
        config.validate()?;

        let token_store: Arc<dyn TokenStore> = match self.token_store {
            Some(store) => store,
            None => CredentialStore::global(),
        };

        let http_factory: Arc<dyn HttpClientFactory> = match self.http_factory {
            Some(factory) => factory,
            None => Arc::new(DefaultHttpClientFactory::from_config(&config)?),
        };

        Ok(BaasicClient { config, token_store, http_factory })
    }
}

/// Run `work` unless `cancel` fires first.
///
/// An already cancelled token fails before `work` is polled.
pub(crate) async fn with_cancellation<T, F>(cancel: &CancellationToken, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if cancel.is_cancelled() {
        return Err(BaasicError::Cancelled);
    }

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(BaasicError::Cancelled),
        result = work => result,
    }
}

/// Turn a non-success response into `BaasicError::Protocol` carrying the
/// body text.
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = failure_message(status, response.text().await);

    debug!(status = status.as_u16(), "request rejected");
    Err(BaasicError::Protocol { status: status.as_u16(), message })
}

/// Body text of a rejected response, the reason phrase when it is empty, and
/// the read error when the body could not be read.
fn failure_message<E: Display>(
    status: StatusCode,
    body: std::result::Result<String, E>,
) -> String {
    let reason = status.canonical_reason().unwrap_or("unknown status");
    match body {
        Ok(text) if text.trim().is_empty() => reason.to_string(),
        Ok(text) => text,
        Err(err) => format!("{reason} (response body unreadable: {err})"),
    }
}

/// Deserialize a success body; 204/205 and empty bodies read as JSON `null`.
pub(crate) async fn read_body<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        return from_null(status);
    }

    let bytes = response.bytes().await.map_err(InfraError::from)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return from_null(status);
    }

    Ok(serde_json::from_slice(&bytes).map_err(InfraError::from)?)
}

fn from_null<T: DeserializeOwned>(status: StatusCode) -> Result<T> {
    serde_json::from_value(Value::Null).map_err(|_| {
        BaasicError::Serialization(format!(
            "response ({}) has no body, but the expected type cannot be built from an empty body",
            status.as_u16()
        ))
    })
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, field| !field.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}
