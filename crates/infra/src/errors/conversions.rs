//! Conversions from external infrastructure errors into domain errors.

use baasic_domain::BaasicError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BaasicError);

impl From<InfraError> for BaasicError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BaasicError> for InfraError {
    fn from(value: BaasicError) -> Self {
        InfraError(value)
    }
}

trait IntoBaasicError {
    fn into_baasic(self) -> BaasicError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → BaasicError */
/* -------------------------------------------------------------------------- */

impl IntoBaasicError for HttpError {
    fn into_baasic(self) -> BaasicError {
        if self.is_timeout() {
            return BaasicError::Transport(format!("HTTP request timed out: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return BaasicError::Transport(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return BaasicError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return BaasicError::Serialization(format!("failed to decode response body: {self}"));
        }

        if let Some(status) = self.status() {
            return BaasicError::Protocol {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown status").to_string(),
            };
        }

        BaasicError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_baasic())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → BaasicError */
/* -------------------------------------------------------------------------- */

impl IntoBaasicError for JsonError {
    fn into_baasic(self) -> BaasicError {
        BaasicError::Serialization(format!(
            "JSON error at line {} column {}: {self}",
            self.line(),
            self.column()
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_baasic())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::Client;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn timeout_maps_to_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = Client::builder().timeout(Duration::from_millis(50)).build().unwrap();
        let err = client.get(server.uri()).send().await.unwrap_err();

        let mapped: BaasicError = InfraError::from(err).into();
        match mapped {
            BaasicError::Transport(msg) => assert!(msg.contains("timed out")),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_for_status_keeps_status_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(409)).mount(&server).await;

        let err = Client::new()
            .get(server.uri())
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap_err();

        let mapped: BaasicError = InfraError::from(err).into();
        assert_eq!(mapped.status(), Some(409));
    }

    #[test]
    fn malformed_url_maps_to_invalid_input() {
        let err = Client::new().get("not a url").build().unwrap_err();
        let mapped: BaasicError = InfraError::from(err).into();

        assert!(matches!(mapped, BaasicError::InvalidInput(_)));
    }

    #[test]
    fn json_error_maps_to_serialization() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let mapped: BaasicError = InfraError::from(err).into();

        match mapped {
            BaasicError::Serialization(msg) => assert!(msg.contains("line 1")),
            other => panic!("expected serialization error, got {other:?}"),
        }
    }
}
