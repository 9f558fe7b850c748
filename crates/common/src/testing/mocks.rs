//! Mock implementations of the storage trait

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use baasic_domain::Credential;

use crate::auth::{CredentialStore, TokenStore};

/// Isolated store that records how often it is read and written
#[derive(Debug, Default)]
pub struct CountingTokenStore {
    inner: CredentialStore,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl CountingTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with `credential`; the seeding write is not counted.
    #[must_use]
    pub fn with_credential(credential: Arc<Credential>) -> Self {
        let store = Self::new();
        store.inner.save(credential);
        store
    }

    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `save` and `clear` calls.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl TokenStore for CountingTokenStore {
    fn get(&self) -> Option<Arc<Credential>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get()
    }

    fn save(&self, credential: Arc<Credential>) -> bool {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.save(credential)
    }

    fn clear(&self) -> bool {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.clear()
    }
}
