//! Client configuration
//!
//! One immutable value per client, shared as `Arc<ClientConfig>` by the
//! request pipeline and every resource client built from it. Callers replace
//! the whole value; nothing in the client mutates it after construction.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{
    DEFAULT_ENCODING, DEFAULT_MAX_ATTEMPTS, DEFAULT_MEDIA_TYPE, DEFAULT_TIMEOUT_SECS,
};
use crate::errors::{BaasicError, Result};
use crate::utils::serde::duration_secs;

/// Connection settings for one Baasic application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Plain base address (e.g. "https://api.baasic.com/v1")
    pub base_address: String,
    /// TLS base address used for authentication calls
    pub secure_base_address: String,
    /// Application (tenant) identifier inserted into resource URLs
    #[serde(default)]
    pub application_identifier: String,
    #[serde(default = "default_media_type")]
    pub default_media_type: String,
    #[serde(default = "default_encoding")]
    pub default_encoding: String,
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub default_timeout: Duration,
    /// Transport attempts for idempotent verbs (initial try + retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default)]
    pub serializer: SerializerOptions,
}

/// JSON serialization switches applied to request bodies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializerOptions {
    /// Drop object fields whose value is `null` before sending
    #[serde(default)]
    pub omit_null_fields: bool,
}

fn default_media_type() -> String {
    DEFAULT_MEDIA_TYPE.to_string()
}

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

impl ClientConfig {
    /// Create a configuration with platform defaults for everything but the
    /// addresses and the application identifier.
    #[must_use]
    pub fn new(
        base_address: impl Into<String>,
        secure_base_address: impl Into<String>,
        application_identifier: impl Into<String>,
    ) -> Self {
        Self {
            base_address: base_address.into(),
            secure_base_address: secure_base_address.into(),
            application_identifier: application_identifier.into(),
            default_media_type: default_media_type(),
            default_encoding: default_encoding(),
            default_timeout: default_timeout(),
            max_attempts: default_max_attempts(),
            serializer: SerializerOptions::default(),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.default_media_type = media_type.into();
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.default_encoding = encoding.into();
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn with_serializer(mut self, serializer: SerializerOptions) -> Self {
        self.serializer = serializer;
        self
    }

    /// Base address for the requested transport security.
    #[must_use]
    pub fn base_for(&self, secure: bool) -> &str {
        if secure {
            &self.secure_base_address
        } else {
            &self.base_address
        }
    }

    /// `Content-Type` value for request bodies.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("{}; charset={}", self.default_media_type, self.default_encoding)
    }

    /// Check that the configuration can address a backend.
    ///
    /// # Errors
    /// Returns `BaasicError::Config` if either base address is not an
    /// absolute http(s) URL, or if the timeout or media type is empty.
    pub fn validate(&self) -> Result<()> {
        validate_address("base_address", &self.base_address)?;
        validate_address("secure_base_address", &self.secure_base_address)?;

        if self.default_timeout.is_zero() {
            return Err(BaasicError::Config("default_timeout must be greater than zero".into()));
        }
        if self.default_media_type.trim().is_empty() {
            return Err(BaasicError::Config("default_media_type must not be empty".into()));
        }
        Ok(())
    }
}

fn validate_address(field: &str, value: &str) -> Result<()> {
    let parsed = Url::parse(value)
        .map_err(|e| BaasicError::Config(format!("{field} '{value}' is not a valid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(BaasicError::Config(format!(
            "{field} must use http or https, found '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClientConfig {
        ClientConfig::new("http://api.test/v1", "https://api.test/v1", "demo-app")
    }

    #[test]
    fn new_applies_platform_defaults() {
        let config = sample();

        assert_eq!(config.default_media_type, "application/json");
        assert_eq!(config.default_encoding, "utf-8");
        assert_eq!(config.default_timeout, Duration::from_secs(30));
        assert_eq!(config.max_attempts, 1);
        assert!(!config.serializer.omit_null_fields);
        assert_eq!(config.content_type(), "application/json; charset=utf-8");
    }

    #[test]
    fn base_for_selects_secure_address() {
        let config = sample();

        assert_eq!(config.base_for(true), "https://api.test/v1");
        assert_eq!(config.base_for(false), "http://api.test/v1");
    }

    #[test]
    fn validate_rejects_relative_and_non_http_addresses() {
        assert!(sample().validate().is_ok());

        let relative = ClientConfig::new("api.test/v1", "https://api.test/v1", "");
        assert!(matches!(relative.validate(), Err(BaasicError::Config(_))));

        let ftp = ClientConfig::new("http://api.test", "ftp://api.test", "");
        assert!(matches!(ftp.validate(), Err(BaasicError::Config(_))));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = sample().with_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(BaasicError::Config(_))));
    }

    #[test]
    fn deserializes_with_defaults_for_optional_fields() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"base_address":"http://api.test","secure_base_address":"https://api.test"}"#,
        )
        .unwrap();

        assert_eq!(config.application_identifier, "");
        assert_eq!(config.default_timeout, Duration::from_secs(30));
        assert_eq!(config.max_attempts, 1);
    }

    #[test]
    fn with_max_attempts_never_drops_below_one() {
        assert_eq!(sample().with_max_attempts(0).max_attempts, 1);
    }
}
