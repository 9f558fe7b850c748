//! Storage abstraction consumed by the request pipeline and the token client
//!
//! Keeping the store behind a trait lets tests run isolated stores in
//! parallel and lets applications plug in their own persistence.

use std::fmt::Debug;
use std::sync::Arc;

use baasic_domain::Credential;

/// Holder of at most one credential
///
/// Implementations must make `save`/`clear` atomic with respect to `get`: a
/// concurrent reader observes either the old or the new value, never a mix.
pub trait TokenStore: Send + Sync + Debug {
    /// Snapshot of the current credential.
    ///
    /// The value may be replaced by a concurrent writer as soon as this
    /// returns.
    fn get(&self) -> Option<Arc<Credential>>;

    /// Replace the stored credential.
    ///
    /// Returns `false` only if exclusive access could not be acquired within
    /// the store's wait policy.
    fn save(&self, credential: Arc<Credential>) -> bool;

    /// Remove the stored credential, with the same return contract as
    /// [`TokenStore::save`].
    fn clear(&self) -> bool;

    /// Put back a value captured earlier with [`TokenStore::get`], including
    /// "no credential".
    fn restore(&self, previous: Option<Arc<Credential>>) -> bool {
        match previous {
            Some(credential) => self.save(credential),
            None => self.clear(),
        }
    }

    /// Current credential if it is still usable for authorization.
    fn valid(&self) -> Option<Arc<Credential>> {
        self.get().filter(|credential| credential.is_valid())
    }
}
