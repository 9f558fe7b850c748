//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Baasic client operations
///
/// Every variant keeps the cause text the backend or the transport produced;
/// nothing is collapsed into a generic message.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum BaasicError {
    /// Connection, DNS or timeout failure before any response arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but its status indicates failure.
    #[error("Protocol error (status {status}): {message}")]
    Protocol { status: u16, message: String },

    /// A body could not be serialized or parsed into the expected shape.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The authentication endpoint answered with an explicit error payload.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The operation is not valid for the current credential state.
    #[error("State error: {0}")]
    State(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl BaasicError {
    /// HTTP status carried by the error, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stable label suitable for structured logging.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Protocol { .. } => "protocol",
            Self::Serialization(_) => "serialization",
            Self::Authentication(_) => "authentication",
            Self::State(_) => "state",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether repeating the same request could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Protocol { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

/// Result type alias for Baasic operations
pub type Result<T> = std::result::Result<T, BaasicError>;
