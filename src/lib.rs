//! # carrier-http
//!
//! 带可选响应缓存的 HTTP 请求客户端库。
//!
//! An HTTP request client library with an optional, transparent response
//! cache.
//!
//! ## Overview
//!
//! This library dispatches HTTP requests through a pooled [`reqwest`]
//! transport and normalizes every round-trip into a typed [`Response`]:
//! body, content type, charset, status code and status message. Status
//! codes of 400 and above surface as [`Error::Http`] carrying the full
//! response, and response bodies convert to structured data on demand.
//!
//! When a cache is configured, responses are memoized by request identity
//! (method, URL, data, headers, credentials), so repeated identical
//! requests are served without touching the network.
//!
//! ## Key Features
//!
//! - **Typed responses**: every request yields a [`Response`] value object
//!   with `to_array` / `to_objects` conversions for JSON and natively
//!   serialized bodies
//! - **Transparent caching**: lookups on every dispatch, writes when a TTL
//!   is given, stale index entries self-heal
//! - **Pluggable stores**: the [`cache::CacheStore`] trait with bundled
//!   in-memory and file-backed implementations
//! - **Explicit failures**: HTTP errors, transport errors and impossible
//!   conversions are all distinct [`Error`] variants
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use carrier_http::cache::FileStore;
//! use carrier_http::Client;
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! #[derive(serde::Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> carrier_http::Result<()> {
//!     let store = FileStore::new("/tmp/carrier-cache").await?;
//!     let mut client = Client::builder().with_cache(store).build().await?;
//!     client.set_basic_auth("username", "password");
//!
//!     let mut data = HashMap::new();
//!     data.insert("page".to_string(), "1".to_string());
//!
//!     let response = client
//!         .get(
//!             "http://my.site/api/users",
//!             &data,
//!             &HashMap::new(),
//!             Some(Duration::from_secs(1800)),
//!         )
//!         .await?;
//!
//!     let users: Vec<User> = response.to_objects()?;
//!     for user in users {
//!         println!("{}", user.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Request dispatch, basic auth, cache wiring |
//! | [`cache`] | Request signatures, cache index, pluggable stores |
//! | [`response`] | Response value object and content conversion |
//! | [`transport`] | Thin wrapper over the `reqwest` HTTP client |

pub mod cache;
pub mod client;
pub mod response;
pub mod transport;

// Re-export main types for convenience
pub use client::{Client, ClientBuilder};
pub use response::Response;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
