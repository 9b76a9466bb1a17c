//! Behaviour shared by every credential store implementation

use credential_store::*;
use std::sync::Arc;
use tempfile::TempDir;

fn admin_set() -> CredentialSet {
    CredentialSet::new("t1", "r1", Role::Admin, "7").unwrap()
}

fn staff_set() -> CredentialSet {
    CredentialSet::new("t2", "r2", Role::Staff, "12").unwrap()
}

async fn sqlite_store() -> (TempDir, Arc<dyn CredentialStore>) {
    let dir = TempDir::new().unwrap();
    let store = SqliteCredentialStore::open(dir.path().join("nested").join("creds.db"), 4)
        .await
        .unwrap();
    (dir, Arc::new(store))
}

async fn check_round_trip(store: &dyn CredentialStore) {
    assert!(store.get().await.unwrap().is_none());

    store.put(&admin_set()).await.unwrap();
    assert_eq!(store.get().await.unwrap(), Some(admin_set()));
    assert_eq!(store.access_token().await.unwrap().as_deref(), Some("t1"));

    // A fresh login overwrites every field
    store.put(&staff_set()).await.unwrap();
    assert_eq!(store.get().await.unwrap(), Some(staff_set()));

    store.clear().await.unwrap();
    assert!(store.get().await.unwrap().is_none());

    // Clearing an empty store is not an error
    store.clear().await.unwrap();
}

async fn check_conditional_clear(store: &dyn CredentialStore) {
    store.put(&staff_set()).await.unwrap();

    // A rejection of an older token leaves the newer session alone
    assert!(!store.clear_if_token("t1").await.unwrap());
    assert_eq!(store.get().await.unwrap(), Some(staff_set()));

    assert!(store.clear_if_token("t2").await.unwrap());
    assert!(store.get().await.unwrap().is_none());

    assert!(!store.clear_if_token("t2").await.unwrap());
}

async fn check_rejects_incomplete(store: &dyn CredentialStore) {
    let mut set = admin_set();
    set.user_id.clear();
    assert!(matches!(store.put(&set).await, Err(StoreError::Incomplete(_))));

    let mut set = admin_set();
    set.role = Role::Invalid;
    assert!(matches!(store.put(&set).await, Err(StoreError::Incomplete(_))));

    assert!(store.get().await.unwrap().is_none());
}

async fn check_readers_never_see_a_mix(store: Arc<dyn CredentialStore>) {
    let writer = {
        let store = store.clone();
        tokio::spawn(async move {
            for i in 0..50 {
                if i % 3 == 2 {
                    store.clear().await.unwrap();
                } else if i % 2 == 0 {
                    store.put(&admin_set()).await.unwrap();
                } else {
                    store.put(&staff_set()).await.unwrap();
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                for _ in 0..50 {
                    let seen = store.get().await.unwrap();
                    assert!(
                        seen.is_none() || seen == Some(admin_set()) || seen == Some(staff_set()),
                        "observed an interleaved set: {seen:?}"
                    );
                }
            })
        })
        .collect();

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }
}

#[tokio::test]
async fn memory_store_round_trip() {
    check_round_trip(&MemoryCredentialStore::new()).await;
}

#[tokio::test]
async fn sqlite_store_round_trip() {
    let (_dir, store) = sqlite_store().await;
    check_round_trip(store.as_ref()).await;
}

#[tokio::test]
async fn memory_store_conditional_clear() {
    check_conditional_clear(&MemoryCredentialStore::new()).await;
}

#[tokio::test]
async fn sqlite_store_conditional_clear() {
    let (_dir, store) = sqlite_store().await;
    check_conditional_clear(store.as_ref()).await;
}

#[tokio::test]
async fn memory_store_rejects_incomplete_sets() {
    check_rejects_incomplete(&MemoryCredentialStore::new()).await;
}

#[tokio::test]
async fn sqlite_store_rejects_incomplete_sets() {
    let (_dir, store) = sqlite_store().await;
    check_rejects_incomplete(store.as_ref()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn memory_store_reads_are_atomic() {
    check_readers_never_see_a_mix(Arc::new(MemoryCredentialStore::new())).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sqlite_store_reads_are_atomic() {
    let (_dir, store) = sqlite_store().await;
    check_readers_never_see_a_mix(store).await;
}

#[tokio::test]
async fn sqlite_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("creds.db");

    {
        let store = SqliteCredentialStore::open(&path, 1).await.unwrap();
        store.put(&admin_set()).await.unwrap();
        store.pool().close().await;
    }

    let reopened = SqliteCredentialStore::open(&path, 1).await.unwrap();
    assert_eq!(reopened.get().await.unwrap(), Some(admin_set()));
}

#[tokio::test]
async fn open_store_honours_backend() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        backend: StoreBackend::Sqlite,
        path: Some(dir.path().join("cfg.db")),
        max_connections: 1,
    };
    let store = open_store(&config).await.unwrap();
    store.put(&admin_set()).await.unwrap();
    assert!(dir.path().join("cfg.db").exists());

    let memory = open_store(&StoreConfig {
        backend: StoreBackend::Memory,
        ..StoreConfig::default()
    })
    .await
    .unwrap();
    assert!(memory.get().await.unwrap().is_none());
}
