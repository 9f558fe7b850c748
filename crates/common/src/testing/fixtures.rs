//! Test fixtures for credentials and auth responses

use std::sync::Arc;

use baasic_domain::Credential;
use chrono::Utc;
use serde_json::{json, Value};

/// Credential valid for one hour from now.
#[must_use]
pub fn sample_credential(value: &str) -> Arc<Credential> {
    Arc::new(Credential::new(value, "bearer", Some(3600), None, Utc::now()))
}

/// Credential whose expiration already passed.
#[must_use]
pub fn expired_credential(value: &str) -> Arc<Credential> {
    Arc::new(Credential::new(value, "bearer", Some(-60), None, Utc::now()))
}

/// Successful login/refresh body as the platform returns it.
#[must_use]
pub fn token_payload(access_token: &str, expires_in: i64) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": expires_in,
        "sliding_window": 1200,
    })
}

/// Rejected login body.
#[must_use]
pub fn token_error_payload(error: &str, description: &str) -> Value {
    json!({ "error": error, "error_description": description })
}
