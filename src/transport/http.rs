use std::collections::HashMap;
use std::env;
use std::time::Duration;

use reqwest::Proxy;

use crate::{Error, Result};

/// Connection options the builder hands to the transport. Anything left
/// unset falls back to an environment override, then to a default.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    pub timeout: Option<Duration>,
    pub proxy_url: Option<String>,
    pub user_agent: Option<String>,
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(options: &TransportOptions) -> Result<Self> {
        // Minimal production-friendly defaults (env-overridable).
        let timeout = options.timeout.unwrap_or_else(|| {
            Duration::from_secs(
                env::var("CARRIER_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(30),
            )
        });

        let user_agent = options
            .user_agent
            .clone()
            .unwrap_or_else(|| concat!("carrier-http/", env!("CARGO_PKG_VERSION")).to_string());

        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .pool_max_idle_per_host(
                env::var("CARRIER_HTTP_POOL_MAX_IDLE_PER_HOST")
                    .ok()
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(32),
            )
            .pool_idle_timeout(Some(Duration::from_secs(
                env::var("CARRIER_HTTP_POOL_IDLE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(90),
            )));

        if let Some(proxy_url) = &options.proxy_url {
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| Error::Transport(TransportError::Other(format!("invalid proxy url: {e}"))))?;
            builder = builder.proxy(proxy);
        } else if let Ok(proxy_url) = env::var("CARRIER_PROXY_URL") {
            if let Ok(proxy) = Proxy::all(&proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self { client })
    }

    /// Performs one HTTP round-trip and returns the raw response.
    ///
    /// `data` travels as query parameters on GET and DELETE and as a form
    /// body on everything else. Headers are applied verbatim; basic auth is
    /// applied when credentials are given. Status codes are not interpreted
    /// here.
    pub async fn execute(
        &self,
        method: &str,
        url: &str,
        data: &HashMap<String, String>,
        headers: &HashMap<String, String>,
        basic_auth: Option<(&str, &str)>,
    ) -> Result<reqwest::Response> {
        let mut request = match method.to_uppercase().as_str() {
            "POST" => self.client.post(url).form(data),
            "PUT" => self.client.put(url).form(data),
            "PATCH" => self.client.patch(url).form(data),
            "DELETE" => self.client.delete(url).query(data),
            _ => self.client.get(url).query(data),
        };

        for (name, value) in headers {
            request = request.header(name, value);
        }

        if let Some((user, password)) = basic_auth {
            request = request.basic_auth(user, Some(password));
        }

        request
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
