//! Domain types and models

pub mod collection;
pub mod credential;
pub mod metering;
pub mod user;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use collection::CollectionModel;
pub use credential::{
    auth_error_message, parse_token_payload, Credential, RefreshTokenRequest, RevokeTokenRequest,
    TokenResponse,
};
pub use metering::{MeteringData, MeteringStatistic};
pub use user::AuthenticatedUser;

/// A resource the platform addresses by id
pub trait Model: Serialize + DeserializeOwned + Send + Sync {
    /// Identifier used in item URLs, `None` for items not yet created.
    fn id(&self) -> Option<String>;
}
