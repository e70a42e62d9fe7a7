use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStore, ResponseCache};
use crate::client::core::Client;
use crate::transport::{HttpTransport, TransportOptions};
use crate::Result;

/// Builder for clients with custom configuration.
///
/// Everything is optional: an unconfigured builder yields a cacheless client
/// with default transport settings.
pub struct ClientBuilder {
    timeout: Option<Duration>,
    proxy_url: Option<String>,
    user_agent: Option<String>,
    store: Option<Box<dyn CacheStore>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            timeout: None,
            proxy_url: None,
            user_agent: None,
            store: None,
        }
    }

    /// Per-request timeout. Falls back to `CARRIER_HTTP_TIMEOUT_SECS`, then
    /// 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Route all requests through a proxy.
    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Enable response caching over `store`.
    pub fn with_cache(mut self, store: impl CacheStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Build the client. Async because a configured cache loads its index
    /// from the store up front.
    pub async fn build(self) -> Result<Client> {
        let options = TransportOptions {
            timeout: self.timeout,
            proxy_url: self.proxy_url,
            user_agent: self.user_agent,
        };
        let transport = Arc::new(HttpTransport::new(&options)?);

        let cache = match self.store {
            Some(store) => Some(ResponseCache::new(store).await),
            None => None,
        };

        Ok(Client {
            transport,
            cache,
            basic_auth: None,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
