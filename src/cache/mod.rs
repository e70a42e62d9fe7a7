//! 响应缓存模块：按请求签名记忆响应，避免重复的网络调用。
//!
//! # Response Caching Module
//!
//! This module memoizes HTTP responses by request identity, behind a
//! pluggable backing store, so repeated identical requests are served
//! without touching the network.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ResponseCache`] | Request-shaped facade: find, store, forget |
//! | [`CacheIndexManager`] | Store-key index with lazy self-healing of stale entries |
//! | [`SignatureGenerator`] / [`Signature`] | Deterministic request identity |
//! | [`CacheStore`] | Trait for pluggable backing stores |
//! | [`MemoryStore`] | In-memory TTL-aware reference store |
//! | [`FileStore`] | File-per-key persistent reference store |
//!
//! ## Example
//!
//! ```
//! use carrier_http::cache::{MemoryStore, ResponseCache};
//! use std::collections::HashMap;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let cache = ResponseCache::new(Box::new(MemoryStore::new())).await;
//!
//! let nothing = HashMap::new();
//! let cached = cache
//!     .find_response("get", "http://my.site/api", &nothing, &nothing, None)
//!     .await;
//! assert!(cached.is_none());
//! # }
//! ```
//!
//! ## Request Signatures
//!
//! A signature is built from:
//! - HTTP method (lowercased)
//! - URL
//! - body data (sorted, form-urlencoded)
//! - headers (sorted, form-urlencoded)
//! - basic-auth credentials, when set
//!
//! Identical requests therefore share a cache slot, while any differing
//! part, including the credentials, gets its own.

mod file_store;
mod index;
mod response_cache;
mod signature;
mod store;

pub use file_store::FileStore;
pub use index::CacheIndexManager;
pub use response_cache::{DEFAULT_CACHE_TTL, ResponseCache};
pub use signature::{Signature, SignatureGenerator};
pub use store::{CacheStore, MemoryStore};
