//! Transport layer: a thin wrapper over [`reqwest`].
//!
//! Builds the connection-pooled HTTP client and performs single
//! round-trips. Status interpretation, caching and error classification
//! live above this layer.

mod http;

pub use http::{HttpTransport, TransportError, TransportOptions};
