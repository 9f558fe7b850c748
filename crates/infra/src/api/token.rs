//! Credential lifecycle: login, refresh, logout
//!
//! Network round-trips always finish before the store is touched, so the
//! store lock is only ever held for a pointer swap.

use std::sync::Arc;

use baasic_common::auth::TokenStore;
use baasic_domain::constants::{GRANT_TYPE_PASSWORD, LOGIN_MODULE_PATH, SLIDING_OPTION};
use baasic_domain::{
    auth_error_message, parse_token_payload, AuthenticatedUser, BaasicError, Credential,
    RefreshTokenRequest, Result, RevokeTokenRequest,
};
use chrono::Utc;
use reqwest::Method;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::client::{read_body, with_cancellation, BaasicClient};
use super::url::QueryString;

/// Orchestrates the token state machine over the client's credential store
#[derive(Debug, Clone)]
pub struct TokenClient {
    client: Arc<BaasicClient>,
}

impl TokenClient {
    pub fn new(client: Arc<BaasicClient>) -> Self {
        Self { client }
    }

    /// Snapshot of the stored credential.
    pub fn current_credential(&self) -> Option<Arc<Credential>> {
        self.client.token_store().get()
    }

    /// Exchange a user name and password for a renewable credential.
    ///
    /// The store is cleared while the request is in flight. On any failure,
    /// cancellation included, the credential present before the call is put
    /// back before the error is returned. The same happens when the returned
    /// future is dropped before it completes.
    ///
    /// # Errors
    /// - `BaasicError::Authentication` when the backend rejects the login
    /// - `BaasicError::State` when the store cannot be cleared or does not
    ///   accept the new credential; the store is left as it was
    /// - transport, protocol and serialization errors from the pipeline
    #[instrument(skip(self, password, cancel))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<Arc<Credential>> {
        let store = self.client.token_store();
        let previous = store.get();
        if !store.clear() {
            let reason = "credential store could not be cleared for login";
            return Err(BaasicError::State(reason.into()));
        }
        let rollback = RestoreOnDrop::new(&**store, previous);

        let credential = match self.request_token(username, password, cancel).await {
            Ok(credential) => Arc::new(credential),
            Err(err) => {
                rollback.restore();
                warn!(error = %err, kind = err.label(), "login failed, previous credential back");
                return Err(err);
            }
        };

        if !store.save(Arc::clone(&credential)) {
            rollback.restore();
            return Err(BaasicError::State("credential store did not accept the login".into()));
        }
        rollback.disarm();

        info!(expiration = ?credential.expiration(), "login succeeded");
        Ok(credential)
    }

    async fn request_token(
        &self,
        username: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<Credential> {
        let url =
            self.client.build_url(true, "{0}?options={1}", &[&LOGIN_MODULE_PATH, &SLIDING_OPTION])?;
        let form =
            [("grant_type", GRANT_TYPE_PASSWORD), ("username", username), ("password", password)];

        let response = self
            .client
            .send(Method::POST, &url, cancel, |request| request.form(&form))
            .await
            .map_err(into_authentication_error)?;
        let payload: Value = with_cancellation(cancel, read_body(response)).await?;

        parse_token_payload(payload, Utc::now())
    }

    /// Extend the stored credential without re-entering the password.
    ///
    /// The stored credential does not need to be valid any more. The renewed
    /// credential replaces it; a failure leaves the store untouched and the
    /// caller is expected to log in again.
    ///
    /// # Errors
    /// `BaasicError::State` when nothing is stored, otherwise the same kinds
    /// as [`TokenClient::authenticate`].
    #[instrument(skip(self, cancel))]
    pub async fn refresh(&self, cancel: &CancellationToken) -> Result<Arc<Credential>> {
        let store = self.client.token_store();
        let current =
            store.get().ok_or_else(|| BaasicError::State("no credential to refresh".into()))?;

        let url = self.client.build_url(true, "{0}", &[&LOGIN_MODULE_PATH])?;
        let body = RefreshTokenRequest { token: current.value(), scheme: current.scheme() };
        let payload: Value =
            self.client.put(&url, &body, cancel).await.map_err(into_authentication_error)?;

        let credential = Arc::new(parse_token_payload(payload, Utc::now())?);
        if !store.save(Arc::clone(&credential)) {
            return Err(BaasicError::State("credential store did not accept the refresh".into()));
        }

        info!(expiration = ?credential.expiration(), "credential refreshed");
        Ok(credential)
    }

    /// Log out.
    ///
    /// Returns `Ok(false)` without any network call when nothing is stored.
    /// Otherwise the backend is notified and the store is cleared even if the
    /// notification fails; only cancellation leaves the store as it was.
    #[instrument(skip(self, cancel))]
    pub async fn destroy(&self, cancel: &CancellationToken) -> Result<bool> {
        let store = self.client.token_store();
        let Some(current) = store.get() else {
            debug!("logout requested without a stored credential");
            return Ok(false);
        };

        let url = self.client.build_url(true, "{0}", &[&LOGIN_MODULE_PATH])?;
        let body = RevokeTokenRequest { scheme: current.scheme(), token: current.value() };
        let payload = self.client.encode_body(&body)?;

        let notified = self
            .client
            .send(Method::DELETE, &url, cancel, |request| self.client.with_json(request, payload))
            .await;
        match notified {
            Ok(_) => debug!("backend acknowledged logout"),
            Err(BaasicError::Cancelled) => return Err(BaasicError::Cancelled),
            Err(err) => warn!(error = %err, kind = err.label(), "logout notification failed"),
        }

        store.clear();
        info!("logged out");
        Ok(true)
    }

    /// Profile of the user the stored credential belongs to.
    #[instrument(skip(self, cancel))]
    pub async fn current_user(
        &self,
        embed: &str,
        cancel: &CancellationToken,
    ) -> Result<AuthenticatedUser> {
        let query = QueryString::for_item(embed, "");
        let url = self.client.build_url(true, "{0}", &[&LOGIN_MODULE_PATH])?;
        self.client.get(&format!("{url}{query}"), cancel).await
    }
}

/// Puts a credential snapshot back into the store unless disarmed.
///
/// Covers the error paths of a login and the case where its future is
/// dropped mid-flight.
struct RestoreOnDrop<'a> {
    store: &'a dyn TokenStore,
    previous: Option<Option<Arc<Credential>>>,
}

impl<'a> RestoreOnDrop<'a> {
    fn new(store: &'a dyn TokenStore, previous: Option<Arc<Credential>>) -> Self {
        Self { store, previous: Some(previous) }
    }

    fn restore(mut self) {
        self.put_back();
    }

    fn disarm(mut self) {
        self.previous = None;
    }

    fn put_back(&mut self) {
        if let Some(previous) = self.previous.take() {
            if !self.store.restore(previous) {
                warn!("previous credential could not be restored");
            }
        }
    }
}

impl Drop for RestoreOnDrop<'_> {
    fn drop(&mut self) {
        if self.previous.is_some() {
            debug!("login abandoned, restoring previous credential");
        }
        self.put_back();
    }
}

/// A rejected auth call whose body carries an `error` field is an
/// authentication failure, not a protocol one.
fn into_authentication_error(err: BaasicError) -> BaasicError {
    match err {
        BaasicError::Protocol { status, message } => {
            let body = serde_json::from_str::<Value>(&message).ok();
            match body.as_ref().and_then(auth_error_message) {
                Some(reason) => BaasicError::Authentication(reason),
                None => BaasicError::Protocol { status, message },
            }
        }
        other => other,
    }
}
