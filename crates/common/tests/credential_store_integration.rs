//! Concurrency tests for the credential store

use std::sync::Arc;

use baasic_common::auth::{CredentialStore, TokenStore};
use baasic_common::testing::{sample_credential, CountingTokenStore};

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn readers_racing_a_writer_see_old_or_new_value() {
    let store = Arc::new(CredentialStore::new());
    let old = sample_credential("old-token");
    let new = sample_credential("new-token");
    store.save(Arc::clone(&old));

    let mut readers = Vec::with_capacity(100);
    for _ in 0..100 {
        let store = Arc::clone(&store);
        readers.push(tokio::spawn(async move {
            let mut seen = Vec::with_capacity(50);
            for _ in 0..50 {
                seen.push(store.get());
                tokio::task::yield_now().await;
            }
            seen
        }));
    }

    let writer = {
        let store = Arc::clone(&store);
        let new = Arc::clone(&new);
        tokio::spawn(async move { store.save(new) })
    };

    assert!(writer.await.unwrap());
    for reader in readers {
        for snapshot in reader.await.unwrap() {
            let snapshot = snapshot.expect("store was never cleared");
            assert!(
                Arc::ptr_eq(&snapshot, &old) || Arc::ptr_eq(&snapshot, &new),
                "observed a credential that was never saved"
            );
        }
    }

    assert!(Arc::ptr_eq(&store.get().unwrap(), &new));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_leave_one_complete_value() {
    let store = Arc::new(CredentialStore::new());
    let candidates: Vec<_> = (0..32).map(|i| sample_credential(&format!("token-{i}"))).collect();

    let handles: Vec<_> = candidates
        .iter()
        .cloned()
        .map(|credential| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.save(credential) })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }

    let winner = store.get().unwrap();
    assert!(candidates.iter().any(|c| Arc::ptr_eq(c, &winner)));
}

#[test]
fn get_after_save_returns_observes_the_write() {
    let store = CredentialStore::new();
    let credential = sample_credential("fresh");

    store.save(Arc::clone(&credential));
    assert_eq!(store.get().unwrap().value(), "fresh");

    store.clear();
    assert!(store.get().is_none());
}

#[test]
fn isolated_stores_do_not_share_state() {
    let first = CountingTokenStore::with_credential(sample_credential("first"));
    let second = CountingTokenStore::new();

    assert!(first.get().is_some());
    assert!(second.get().is_none());
    assert_eq!(first.reads(), 1);
    assert_eq!(first.writes(), 0);
}
