//! Lock-guarded credential slot

use std::sync::Arc;
use std::time::Duration;

use baasic_domain::Credential;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::traits::TokenStore;

static GLOBAL_STORE: Lazy<Arc<CredentialStore>> = Lazy::new(|| Arc::new(CredentialStore::new()));

/// How long writers (and readers) wait for the lock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WaitPolicy {
    /// Block until the lock is available.
    #[default]
    Unbounded,
    /// Give up after the duration; `save`/`clear` then return `false` and
    /// `get` returns `None`.
    Bounded(Duration),
}

/// In-memory [`TokenStore`] backed by a `parking_lot` reader/writer lock
///
/// The lock only ever guards a pointer swap, so hold times do not depend on
/// network latency.
#[derive(Debug, Default)]
pub struct CredentialStore {
    slot: RwLock<Option<Arc<Credential>>>,
    wait: WaitPolicy,
}

impl CredentialStore {
    /// Create an empty store with an unbounded wait policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_wait_policy(wait: WaitPolicy) -> Self {
        Self { slot: RwLock::new(None), wait }
    }

    /// Process-wide store used when a client is built without an explicit
    /// one. Starts empty.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_STORE)
    }

    #[must_use]
    pub fn wait_policy(&self) -> WaitPolicy {
        self.wait
    }

    fn write(&self, value: Option<Arc<Credential>>) -> bool {
        let guard = match self.wait {
            WaitPolicy::Unbounded => Some(self.slot.write()),
            WaitPolicy::Bounded(timeout) => self.slot.try_write_for(timeout),
        };

        match guard {
            Some(mut slot) => {
                *slot = value;
                true
            }
            None => {
                warn!(wait = ?self.wait, "credential store write lock not acquired");
                false
            }
        }
    }
}

impl TokenStore for CredentialStore {
    fn get(&self) -> Option<Arc<Credential>> {
        match self.wait {
            WaitPolicy::Unbounded => self.slot.read().clone(),
            WaitPolicy::Bounded(timeout) => {
                if let Some(slot) = self.slot.try_read_for(timeout) {
                    slot.clone()
                } else {
                    warn!(wait = ?self.wait, "credential store read lock not acquired");
                    None
                }
            }
        }
    }

    fn save(&self, credential: Arc<Credential>) -> bool {
        debug!(
            scheme = credential.scheme(),
            expiration = ?credential.expiration(),
            "storing credential"
        );
        self.write(Some(credential))
    }

    fn clear(&self) -> bool {
        debug!("clearing credential");
        self.write(None)
    }
}
