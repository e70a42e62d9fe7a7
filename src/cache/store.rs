//! Cache store contract and the in-memory reference store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::Result;

/// Key/value backing store for the cache layer.
///
/// Implementations are free to be fallible; the cache layer treats every
/// error as a miss or a no-op, so a flaky store degrades service instead of
/// breaking requests.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Whether a live (non-expired) value exists under `key`.
    async fn has(&self, key: &str) -> Result<bool>;

    /// The value under `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores a value that expires after `ttl`.
    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Stores a value with no expiry.
    async fn forever(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Returns the value under `key`, initializing it to `default` (with no
    /// expiry) when absent.
    async fn remember_forever(&self, key: &str, default: Vec<u8>) -> Result<Vec<u8>>;

    /// Removes the value under `key`, if any.
    async fn forget(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<S: CacheStore + ?Sized> CacheStore for Arc<S> {
    async fn has(&self, key: &str) -> Result<bool> {
        (**self).has(key).await
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        (**self).put(key, value, ttl).await
    }

    async fn forever(&self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).forever(key, value).await
    }

    async fn remember_forever(&self, key: &str, default: Vec<u8>) -> Result<Vec<u8>> {
        (**self).remember_forever(key, default).await
    }

    async fn forget(&self, key: &str) -> Result<()> {
        (**self).forget(key).await
    }
}

#[derive(Clone)]
struct Entry {
    data: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn new(data: Vec<u8>, ttl: Option<Duration>) -> Self {
        Self {
            // A TTL too large to represent never expires.
            expires_at: ttl.and_then(|ttl| Instant::now().checked_add(ttl)),
            data,
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.map(|at| Instant::now() > at).unwrap_or(false)
    }
}

/// In-memory [`CacheStore`] backed by a `HashMap`.
///
/// Expired entries behave as absent: reads drop them on sight and writes
/// sweep them opportunistically.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn has(&self, key: &str) -> Result<bool> {
        let entries = self.entries.read().unwrap();
        Ok(entries.get(key).map(|e| !e.is_expired()).unwrap_or(false))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries.write().unwrap();
        if let Some(entry) = entries.get(key) {
            if entry.is_expired() {
                entries.remove(key);
                return Ok(None);
            }
            return Ok(Some(entry.data.clone()));
        }
        Ok(None)
    }

    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.retain(|_, e| !e.is_expired());
        entries.insert(key.to_string(), Entry::new(value, Some(ttl)));
        Ok(())
    }

    async fn forever(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.retain(|_, e| !e.is_expired());
        entries.insert(key.to_string(), Entry::new(value, None));
        Ok(())
    }

    async fn remember_forever(&self, key: &str, default: Vec<u8>) -> Result<Vec<u8>> {
        let mut entries = self.entries.write().unwrap();
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => Ok(entry.data.clone()),
            _ => {
                entries.insert(key.to_string(), Entry::new(default.clone(), None));
                Ok(default)
            }
        }
    }

    async fn forget(&self, key: &str) -> Result<()> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }
}

/// Store whose every operation fails. Exercises the degrade paths of the
/// layers above.
#[cfg(test)]
pub(crate) struct OfflineStore;

#[cfg(test)]
#[async_trait]
impl CacheStore for OfflineStore {
    async fn has(&self, _key: &str) -> Result<bool> {
        Err(offline())
    }

    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Err(offline())
    }

    async fn put(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<()> {
        Err(offline())
    }

    async fn forever(&self, _key: &str, _value: Vec<u8>) -> Result<()> {
        Err(offline())
    }

    async fn remember_forever(&self, _key: &str, _default: Vec<u8>) -> Result<Vec<u8>> {
        Err(offline())
    }

    async fn forget(&self, _key: &str) -> Result<()> {
        Err(offline())
    }
}

#[cfg(test)]
fn offline() -> crate::Error {
    std::io::Error::new(std::io::ErrorKind::Other, "store offline").into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_get_round_trip() {
        let store = MemoryStore::new();
        store
            .put("key", b"value".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();
        assert!(store.has("key").await.unwrap());
        assert_eq!(store.get("key").await.unwrap(), Some(b"value".to_vec()));
    }

    #[tokio::test]
    async fn test_absent_key_is_a_miss() {
        let store = MemoryStore::new();
        assert!(!store.has("missing").await.unwrap());
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entry_behaves_as_absent() {
        let store = MemoryStore::new();
        store
            .put("key", b"value".to_vec(), Duration::from_millis(5))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert!(!store.has("key").await.unwrap());
        assert_eq!(store.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_forever_does_not_expire() {
        let store = MemoryStore::new();
        store.forever("key", b"value".to_vec()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert_eq!(store.get("key").await.unwrap(), Some(b"value".to_vec()));
    }

    #[tokio::test]
    async fn test_remember_forever_initializes_exactly_once() {
        let store = MemoryStore::new();
        let first = store
            .remember_forever("key", b"first".to_vec())
            .await
            .unwrap();
        let second = store
            .remember_forever("key", b"second".to_vec())
            .await
            .unwrap();
        assert_eq!(first, b"first".to_vec());
        assert_eq!(second, b"first".to_vec());
    }

    #[tokio::test]
    async fn test_remember_forever_replaces_expired_entry() {
        let store = MemoryStore::new();
        store
            .put("key", b"old".to_vec(), Duration::from_millis(5))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await;
        let value = store
            .remember_forever("key", b"fresh".to_vec())
            .await
            .unwrap();
        assert_eq!(value, b"fresh".to_vec());
    }

    #[tokio::test]
    async fn test_forget_removes_entry() {
        let store = MemoryStore::new();
        store.forever("key", b"value".to_vec()).await.unwrap();
        store.forget("key").await.unwrap();
        assert!(!store.has("key").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_overwrites_and_refreshes_ttl() {
        let store = MemoryStore::new();
        store
            .put("key", b"old".to_vec(), Duration::from_millis(5))
            .await
            .unwrap();
        store
            .put("key", b"new".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert_eq!(store.get("key").await.unwrap(), Some(b"new".to_vec()));
    }

    #[tokio::test]
    async fn test_arc_wrapped_store_delegates() {
        let store = Arc::new(MemoryStore::new());
        let shared: Box<dyn CacheStore> = Box::new(Arc::clone(&store));
        shared.forever("key", b"value".to_vec()).await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some(b"value".to_vec()));
    }
}
