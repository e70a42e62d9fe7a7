//! 请求客户端：按 HTTP 动词分发请求，透明读写响应缓存。
//!
//! # Request Client
//!
//! The front door of the crate. [`Client`] dispatches GET/POST/PUT/PATCH/
//! DELETE requests through the transport, normalizes every round-trip into a
//! [`Response`](crate::response::Response), and raises
//! [`Error::Http`](crate::Error::Http) for status codes of 400 and above.
//!
//! With a cache configured, every dispatch checks for a cached response
//! first; `get` and `post` additionally accept a TTL that caches the
//! response they fetch.
//!
//! ## Example
//!
//! ```no_run
//! use carrier_http::cache::MemoryStore;
//! use carrier_http::Client;
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> carrier_http::Result<()> {
//! let client = Client::builder()
//!     .with_cache(MemoryStore::new())
//!     .build()
//!     .await?;
//!
//! let nothing = HashMap::new();
//! let response = client
//!     .get(
//!         "http://my.site/api",
//!         &nothing,
//!         &nothing,
//!         Some(Duration::from_secs(600)),
//!     )
//!     .await?;
//! let data = response.to_array()?;
//! # let _ = data;
//! # Ok(())
//! # }
//! ```

mod builder;
mod core;

pub use builder::ClientBuilder;
pub use core::Client;
