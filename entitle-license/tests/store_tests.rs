mod common;

use std::time::Duration;

use async_trait::async_trait;
use common::{sample_license, test_keypair, SHARED_SECRET};
use entitle_license::{cache_token, LicenseError, LicenseStore, MemoryStore, CACHE_KEY_PREFIX};

/// Store that always fails, simulating an unreachable cache.
struct DownStore;

#[async_trait]
impl LicenseStore for DownStore {
    async fn save(
        &self,
        _key: &str,
        _value: &str,
        _ttl: Option<Duration>,
    ) -> Result<(), LicenseError> {
        Err(LicenseError::StoreUnavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn memory_store_save_and_get() {
    let store = MemoryStore::new();
    store.save("key", "value", None).await.unwrap();
    assert_eq!(store.get("key"), Some("value".to_string()));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn memory_store_overwrites_existing_key() {
    let store = MemoryStore::new();
    store.save("key", "first", None).await.unwrap();
    store.save("key", "second", None).await.unwrap();
    assert_eq!(store.get("key"), Some("second".to_string()));
}

#[tokio::test]
async fn memory_store_honors_ttl() {
    let store = MemoryStore::new();
    store
        .save("key", "value", Some(Duration::ZERO))
        .await
        .unwrap();
    assert_eq!(store.get("key"), None);
}

#[tokio::test]
async fn memory_store_missing_key() {
    let store = MemoryStore::new();
    assert_eq!(store.get("missing"), None);
    assert!(store.is_empty());
}

#[tokio::test]
async fn cache_token_writes_under_namespaced_key() {
    let (sk, _) = test_keypair();
    let mut license = sample_license(&["machine-a"]);
    let wire = license.issue(SHARED_SECRET, &sk).unwrap();

    let store = MemoryStore::new();
    cache_token(&store, "acme", &license, None).await.unwrap();

    let key = format!("{CACHE_KEY_PREFIX}acme");
    assert_eq!(store.get(&key), Some(wire));
}

#[tokio::test]
async fn cache_token_requires_issued_token() {
    let license = sample_license(&["machine-a"]);
    let store = MemoryStore::new();

    let result = cache_token(&store, "acme", &license, None).await;
    assert!(matches!(result, Err(LicenseError::Serialization(_))));
    assert!(store.is_empty());
}

#[tokio::test]
async fn store_failure_does_not_invalidate_issued_token() {
    let (sk, vk) = test_keypair();
    let mut license = sample_license(&["machine-a"]);
    let wire = license.issue(SHARED_SECRET, &sk).unwrap();

    let result = cache_token(&DownStore, "acme", &license, None).await;
    assert!(matches!(result, Err(LicenseError::StoreUnavailable(_))));

    // The wire string issued before the failed save still verifies.
    let verified = entitle_license::verify_with_identity(
        &wire,
        SHARED_SECRET,
        &vk,
        &entitle_license::FixedIdentity("machine-a".to_string()),
    );
    assert!(verified.is_ok());
}
