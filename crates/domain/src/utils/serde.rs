//! Serialization helpers for domain types

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

/// Serde adapter storing a [`Duration`] as whole seconds (u64)
///
/// # Usage
/// ```rust
/// use std::time::Duration;
///
/// use baasic_domain::utils::serde::duration_secs;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Example {
///     #[serde(with = "duration_secs")]
///     timeout: Duration,
/// }
/// ```
pub mod duration_secs {
    use super::{Deserialize, Deserializer, Duration, Serializer};

    type SerializeResult<S> = Result<<S as Serializer>::Ok, <S as Serializer>::Error>;

    /// Serialize a Duration as whole seconds
    pub fn serialize<S>(duration: &Duration, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    /// Deserialize whole seconds into a Duration
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Timeouts {
        #[serde(with = "duration_secs")]
        request: Duration,
    }

    #[test]
    fn duration_is_written_as_seconds() {
        let json = serde_json::to_string(&Timeouts { request: Duration::from_secs(45) }).unwrap();
        assert_eq!(json, r#"{"request":45}"#);
    }

    #[test]
    fn seconds_are_read_back_into_duration() {
        let parsed: Timeouts = serde_json::from_str(r#"{"request":0}"#).unwrap();
        assert_eq!(parsed.request, Duration::ZERO);
    }
}
