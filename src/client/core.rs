use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::cache::ResponseCache;
use crate::response::Response;
use crate::transport::HttpTransport;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub(crate) struct BasicAuth {
    pub(crate) user: String,
    pub(crate) password: String,
}

impl BasicAuth {
    /// The `user:password` form that participates in cache signatures.
    fn as_credentials(&self) -> String {
        format!("{}:{}", self.user, self.password)
    }
}

/// HTTP request client with optional transparent response caching.
///
/// Every verb normalizes the raw transport response into a [`Response`] and
/// raises [`Error::Http`] for status codes of 400 and above. When a cache is
/// configured, lookups happen on every dispatch; writes happen only when the
/// caller passes a cache TTL, which only `get` and `post` accept.
pub struct Client {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) cache: Option<ResponseCache>,
    pub(crate) basic_auth: Option<BasicAuth>,
}

impl Client {
    /// A client with default transport settings and no cache.
    pub async fn new() -> Result<Self> {
        crate::client::builder::ClientBuilder::new().build().await
    }

    pub fn builder() -> crate::client::builder::ClientBuilder {
        crate::client::builder::ClientBuilder::new()
    }

    pub async fn get(
        &self,
        url: &str,
        data: &HashMap<String, String>,
        headers: &HashMap<String, String>,
        cache_ttl: Option<Duration>,
    ) -> Result<Response> {
        self.send("get", url, data, headers, cache_ttl).await
    }

    pub async fn post(
        &self,
        url: &str,
        data: &HashMap<String, String>,
        headers: &HashMap<String, String>,
        cache_ttl: Option<Duration>,
    ) -> Result<Response> {
        self.send("post", url, data, headers, cache_ttl).await
    }

    pub async fn put(
        &self,
        url: &str,
        data: &HashMap<String, String>,
        headers: &HashMap<String, String>,
    ) -> Result<Response> {
        self.send("put", url, data, headers, None).await
    }

    pub async fn patch(
        &self,
        url: &str,
        data: &HashMap<String, String>,
        headers: &HashMap<String, String>,
    ) -> Result<Response> {
        self.send("patch", url, data, headers, None).await
    }

    pub async fn delete(
        &self,
        url: &str,
        data: &HashMap<String, String>,
        headers: &HashMap<String, String>,
    ) -> Result<Response> {
        self.send("delete", url, data, headers, None).await
    }

    /// Sets the basic-auth credentials used for subsequent requests. The
    /// credentials also become part of the cache signature, so authenticated
    /// and unauthenticated requests never share a cache slot.
    pub fn set_basic_auth(&mut self, user: impl Into<String>, password: impl Into<String>) {
        self.basic_auth = Some(BasicAuth {
            user: user.into(),
            password: password.into(),
        });
    }

    pub fn unset_basic_auth(&mut self) {
        self.basic_auth = None;
    }

    /// Empties the response cache. A no-op when no cache is configured.
    pub async fn forget_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.forget().await;
        }
    }

    async fn send(
        &self,
        method: &str,
        url: &str,
        data: &HashMap<String, String>,
        headers: &HashMap<String, String>,
        cache_ttl: Option<Duration>,
    ) -> Result<Response> {
        let credentials = self.basic_auth.as_ref().map(BasicAuth::as_credentials);

        if let Some(cache) = &self.cache {
            if let Some(response) = cache
                .find_response(method, url, data, headers, credentials.as_deref())
                .await
            {
                debug!(method, url, "serving response from cache");
                return Ok(response);
            }
        }

        let start = Instant::now();
        let raw = self
            .transport
            .execute(
                method,
                url,
                data,
                headers,
                self.basic_auth
                    .as_ref()
                    .map(|auth| (auth.user.as_str(), auth.password.as_str())),
            )
            .await?;
        let response = Response::from_http(raw).await?;

        if response.http_code() >= 400 {
            info!(
                method,
                url,
                http_status = response.http_code(),
                duration_ms = start.elapsed().as_millis() as u64,
                "request failed with HTTP error"
            );
            return Err(Error::Http(Box::new(response)));
        }

        debug!(
            method,
            url,
            http_status = response.http_code(),
            duration_ms = start.elapsed().as_millis() as u64,
            "request completed"
        );

        // Error responses never reach this point, so they are never cached.
        if let (Some(cache), Some(ttl)) = (&self.cache, cache_ttl) {
            cache
                .store_response(&response, method, url, data, headers, credentials.as_deref(), ttl)
                .await;
        }

        Ok(response)
    }
}
