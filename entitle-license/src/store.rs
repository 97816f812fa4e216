//! Best-effort caching of issued tokens in an external store.
//!
//! The engine only ever writes here: verification operates on a token
//! string supplied by the caller, never on the cache. A store failure
//! must not invalidate an already-issued wire string, so callers treat
//! [`cache_token`] as a side effect that may independently fail.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::warn;

use crate::error::{LicenseError, LicenseResult};
use crate::license::License;

/// Namespace prefix for cached token keys.
pub const CACHE_KEY_PREFIX: &str = "entitle:license:";

/// An external key-value store holding the most recently issued token.
///
/// Implementations are expected to be network-bound; the async seam
/// keeps the call cancellable and timeout-able by the caller.
#[async_trait]
pub trait LicenseStore: Send + Sync {
    /// Stores `value` under `key`, optionally expiring after `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::StoreUnavailable`] if the store rejects
    /// or fails the save.
    async fn save(&self, key: &str, value: &str, ttl: Option<Duration>) -> LicenseResult<()>;
}

/// Caches the record's issued token under `CACHE_KEY_PREFIX + name`.
///
/// # Errors
///
/// Returns [`LicenseError::Serialization`] if no token has been issued on
/// the record yet (caller bug: issue first), or the store's
/// [`LicenseError::StoreUnavailable`]. Neither outcome affects the
/// validity of the issued wire string itself.
pub async fn cache_token(
    store: &dyn LicenseStore,
    name: &str,
    license: &License,
    ttl: Option<Duration>,
) -> LicenseResult<()> {
    let token = license
        .issued_token()
        .ok_or_else(|| LicenseError::Serialization("no issued token on record".to_string()))?;

    let key = format!("{CACHE_KEY_PREFIX}{name}");
    if let Err(err) = store.save(&key, token, ttl).await {
        warn!(%key, error = %err, "failed to cache issued license token");
        return Err(err);
    }
    Ok(())
}

struct StoredValue {
    value: String,
    expires_at: Option<Instant>,
}

/// In-process store used in tests and as a local fallback.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, StoredValue>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live value under `key`, honoring expiry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().expect("store lock poisoned");
        entries.get(key).and_then(|stored| {
            match stored.expires_at {
                Some(deadline) if Instant::now() >= deadline => None,
                _ => Some(stored.value.clone()),
            }
        })
    }

    /// Number of entries, including expired ones not yet evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect("store lock poisoned").len()
    }

    /// Returns true if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LicenseStore for MemoryStore {
    async fn save(&self, key: &str, value: &str, ttl: Option<Duration>) -> LicenseResult<()> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        entries.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at: ttl.map(|ttl| Instant::now() + ttl),
            },
        );
        Ok(())
    }
}
