//! Request-shaped cache facade.

use std::collections::HashMap;
use std::time::Duration;

use super::index::CacheIndexManager;
use super::signature::SignatureGenerator;
use super::store::CacheStore;
use crate::response::Response;

/// Cache lifetime for callers that ask for caching without a policy of
/// their own.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Caches [`Response`] values keyed by request identity.
///
/// Composes a [`SignatureGenerator`] with a [`CacheIndexManager`]: the
/// request parts become a signature, the signature resolves to a store-key,
/// the store-key holds the serialized response. Lookups never fail; a
/// broken or cold cache is simply a miss.
pub struct ResponseCache {
    signatures: SignatureGenerator,
    index: CacheIndexManager,
}

impl ResponseCache {
    /// Builds the cache over `store`, loading (or creating) its index.
    pub async fn new(store: Box<dyn CacheStore>) -> Self {
        Self {
            signatures: SignatureGenerator::new(),
            index: CacheIndexManager::new(store).await,
        }
    }

    /// The cached response for this request, if one is live.
    pub async fn find_response(
        &self,
        method: &str,
        url: &str,
        data: &HashMap<String, String>,
        headers: &HashMap<String, String>,
        credentials: Option<&str>,
    ) -> Option<Response> {
        let signature = self
            .signatures
            .generate(method, url, data, headers, credentials);
        self.index.find(&signature).await
    }

    /// Caches `response` for this request for `ttl`.
    #[allow(clippy::too_many_arguments)]
    pub async fn store_response(
        &self,
        response: &Response,
        method: &str,
        url: &str,
        data: &HashMap<String, String>,
        headers: &HashMap<String, String>,
        credentials: Option<&str>,
        ttl: Duration,
    ) {
        let signature = self
            .signatures
            .generate(method, url, data, headers, credentials);
        self.index.store(&signature, response, ttl).await;
    }

    /// Drops every cached response and resets the index.
    pub async fn forget(&self) {
        self.index.forget().await;
    }
}
