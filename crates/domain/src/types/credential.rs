//! Bearer credentials and the token wire format
//!
//! The authentication endpoint answers with either an error object or a token
//! object. Expiration is always computed here, from the lifetime hints in the
//! response and the client clock; a server-provided absolute timestamp is
//! never trusted.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_TOKEN_SCHEME;
use crate::errors::{BaasicError, Result};

/// Immutable bearer credential
///
/// Refreshing never mutates a credential; it produces a new one that replaces
/// the old value in the store as a whole.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    value: String,
    scheme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sliding_window: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create a credential whose expiration is computed relative to `now`.
    ///
    /// `expires_in` wins over `sliding_window`; with neither the credential
    /// never expires from the client's point of view.
    #[must_use]
    pub fn new(
        value: impl Into<String>,
        scheme: impl Into<String>,
        expires_in: Option<i64>,
        sliding_window: Option<i64>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            value: value.into(),
            scheme: scheme.into(),
            expires_in,
            sliding_window,
            expiration: compute_expiration(expires_in, sliding_window, now),
        }
    }

    /// Build a credential from an auth endpoint response received at `now`.
    #[must_use]
    pub fn issue(response: TokenResponse, now: DateTime<Utc>) -> Self {
        Self::new(
            response.access_token,
            response.token_type,
            response.expires_in,
            response.sliding_window,
            now,
        )
    }

    /// Opaque token string issued by the backend.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Authentication scheme used to format the request header.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    #[must_use]
    pub fn expires_in(&self) -> Option<i64> {
        self.expires_in
    }

    #[must_use]
    pub fn sliding_window(&self) -> Option<i64> {
        self.sliding_window
    }

    /// Client-side absolute expiration, `None` when the credential never
    /// expires.
    #[must_use]
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.expiration
    }

    /// True when the token is non-empty and not expired.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.value.is_empty() && self.expiration.map_or(true, |expiration| expiration > now)
    }

    /// Seconds left before expiry, `None` when the credential never expires.
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expiration.map(|expiration| (expiration - Utc::now()).num_seconds())
    }

    /// Value for the `Authorization` request header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.scheme, self.value)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("value", &"<redacted>")
            .field("scheme", &self.scheme)
            .field("expires_in", &self.expires_in)
            .field("sliding_window", &self.sliding_window)
            .field("expiration", &self.expiration)
            .finish()
    }
}

fn compute_expiration(
    expires_in: Option<i64>,
    sliding_window: Option<i64>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    expires_in.or(sliding_window).map(|seconds| now + Duration::seconds(seconds))
}

fn default_scheme() -> String {
    DEFAULT_TOKEN_SCHEME.to_string()
}

/// Token object returned by the authentication endpoint
///
/// Unknown fields (including any absolute expiration the server adds) are
/// ignored.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_scheme")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub sliding_window: Option<i64>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("sliding_window", &self.sliding_window)
            .finish()
    }
}

/// Turn an auth endpoint payload into a credential.
///
/// # Errors
/// - `BaasicError::Authentication` when the payload carries an `error` field
/// - `BaasicError::Serialization` when it is neither an error nor a token
pub fn parse_token_payload(payload: Value, now: DateTime<Utc>) -> Result<Credential> {
    if let Some(message) = auth_error_message(&payload) {
        return Err(BaasicError::Authentication(message));
    }

    let response: TokenResponse = serde_json::from_value(payload)
        .map_err(|e| BaasicError::Serialization(format!("invalid token payload: {e}")))?;

    Ok(Credential::issue(response, now))
}

/// Message of an auth error payload, `None` if `payload` has no `error`
/// field.
#[must_use]
pub fn auth_error_message(payload: &Value) -> Option<String> {
    let error = payload.get("error")?;
    let error = match error {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };

    match payload.get("error_description").and_then(Value::as_str) {
        Some(description) if !description.is_empty() => Some(format!("{error}: {description}")),
        _ => Some(error),
    }
}

/// Body of the token refresh request
#[derive(Clone, Serialize)]
pub struct RefreshTokenRequest<'a> {
    pub token: &'a str,
    #[serde(rename = "type")]
    pub scheme: &'a str,
}

/// Body of the logout notification
#[derive(Clone, Serialize)]
pub struct RevokeTokenRequest<'a> {
    #[serde(rename = "Type")]
    pub scheme: &'a str,
    #[serde(rename = "Token")]
    pub token: &'a str,
}
