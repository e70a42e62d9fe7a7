//! Index-based cache management.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use super::signature::Signature;
use super::store::CacheStore;

/// Maps opaque store-keys to request signatures and moves values in and out
/// of the backing [`CacheStore`] under those keys.
///
/// The index itself lives in the store as a single JSON entry under
/// [`INDEX_KEY`](Self::INDEX_KEY), loaded once at construction and persisted
/// after every mutation. Values expire out of the store on their own; the
/// index tolerates that drift and prunes an entry the first time a lookup
/// finds nothing behind it. Two managers over one backing store each hold
/// their own in-memory copy and can clobber each other's index writes.
///
/// No operation here fails outward. Store errors are logged and degrade to
/// a miss (on reads) or a no-op (on writes), so a broken cache never breaks
/// a request.
pub struct CacheIndexManager {
    store: Box<dyn CacheStore>,
    index: Mutex<HashMap<String, String>>,
}

impl CacheIndexManager {
    /// Reserved store key holding the serialized index. Generated store-keys
    /// are 32-char UUID hex and can never collide with it.
    pub const INDEX_KEY: &'static str = "carrier_cache_index";

    /// Loads the index from the store, creating an empty one on first use.
    /// A corrupt or unreadable index degrades to empty.
    pub async fn new(store: Box<dyn CacheStore>) -> Self {
        let index = match store
            .remember_forever(Self::INDEX_KEY, b"{}".to_vec())
            .await
        {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(error = %e, "cache index is corrupt; starting empty");
                HashMap::new()
            }),
            Err(e) => {
                warn!(error = %e, "cache index could not be loaded; starting empty");
                HashMap::new()
            }
        };
        Self {
            store,
            index: Mutex::new(index),
        }
    }

    /// Looks up the value cached under `signature`, if any.
    ///
    /// An indexed entry whose backing value has expired out of the store is
    /// pruned from the index on the spot, and the lookup reports a miss.
    pub async fn find<T: DeserializeOwned>(&self, signature: &Signature) -> Option<T> {
        let mut index = self.index.lock().await;
        let store_key = reverse_lookup(&index, signature)?;

        if !matches!(self.store.has(&store_key).await, Ok(true)) {
            index.remove(&store_key);
            self.persist(&index).await;
            debug!(store_key = %store_key, "pruned stale cache index entry");
            return None;
        }

        let bytes = match self.store.get(&store_key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "cache store read failed; treating as a miss");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                debug!(store_key = %store_key, "cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(error = %e, "cached value failed to deserialize; treating as a miss");
                None
            }
        }
    }

    /// Caches `value` under `signature` for `ttl`.
    ///
    /// A signature already in the index keeps its store-key; the value is
    /// overwritten and the expiry refreshed. Otherwise a fresh store-key is
    /// allocated and the index persisted before the value is written.
    pub async fn store<T: Serialize>(&self, signature: &Signature, value: &T, ttl: Duration) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "value failed to serialize; not cached");
                return;
            }
        };

        let mut index = self.index.lock().await;
        let store_key = match reverse_lookup(&index, signature) {
            Some(key) => key,
            None => {
                let key = self.fresh_store_key().await;
                index.insert(key.clone(), signature.clone().into());
                self.persist(&index).await;
                key
            }
        };
        if let Err(e) = self.store.put(&store_key, bytes, ttl).await {
            warn!(error = %e, "cache store write failed; value not cached");
        } else {
            debug!(store_key = %store_key, "stored cached value");
        }
    }

    /// Deletes every indexed value from the store and resets the index.
    /// Stale entries have nothing behind them, so their delete is skipped.
    pub async fn forget(&self) {
        let mut index = self.index.lock().await;
        for store_key in index.keys() {
            if matches!(self.store.has(store_key).await, Ok(true)) {
                if let Err(e) = self.store.forget(store_key).await {
                    warn!(error = %e, store_key = %store_key, "cache store delete failed");
                }
            }
        }
        index.clear();
        self.persist(&index).await;
        debug!("cache cleared");
    }

    async fn persist(&self, index: &HashMap<String, String>) {
        match serde_json::to_vec(index) {
            Ok(bytes) => {
                if let Err(e) = self.store.forever(Self::INDEX_KEY, bytes).await {
                    warn!(error = %e, "cache index could not be persisted");
                }
            }
            Err(e) => warn!(error = %e, "cache index could not be serialized"),
        }
    }

    /// Allocates a store-key no live value is using. Absence is verified
    /// against the store rather than assumed from the index; a store error
    /// counts as absent.
    async fn fresh_store_key(&self) -> String {
        loop {
            let candidate = Uuid::new_v4().simple().to_string();
            if !matches!(self.store.has(&candidate).await, Ok(true)) {
                return candidate;
            }
        }
    }
}

/// Store-key for `signature`, if indexed. The signature is the map value,
/// so this walks the entries; `None` is the only "not found" answer, and
/// any indexed key, whatever its content, resolves correctly.
fn reverse_lookup(index: &HashMap<String, String>, signature: &Signature) -> Option<String> {
    index
        .iter()
        .find(|(_, sig)| sig.as_str() == signature.as_str())
        .map(|(key, _)| key.clone())
}
