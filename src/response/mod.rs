//! 响应模块：将传输层的原始应答规范化为不可变的类型化响应值。
//!
//! # Response Module
//!
//! This module normalizes raw transport responses into an immutable
//! [`Response`] value and decodes response bodies into structured data
//! based on their declared content type.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Response`] | Immutable body + content metadata + status line |
//!
//! ## Content-type families
//!
//! Two families are recognized for conversion: [`TYPE_JSON`]
//! (`application/json`, textual JSON) and [`TYPE_BINARY`]
//! (`application/binary`, a MessagePack-serialized payload, decoded
//! structurally with a JSON-string fallback). Conversion of any other
//! family fails explicitly, as does any decode that ends in `null`, a
//! scalar, or an empty container.
//!
//! ## Example
//!
//! ```rust
//! use carrier_http::Response;
//!
//! let response = Response::new(
//!     r#"[{"id":1},{"id":2}]"#,
//!     "application/json",
//!     "UTF-8",
//!     200,
//!     "OK",
//! );
//! let items = response.to_array().unwrap();
//! assert_eq!(items.as_array().unwrap().len(), 2);
//! ```

mod content_type;
mod convert;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::transport::TransportError;
use crate::Result;

/// Media type labeling a textual JSON body.
pub const TYPE_JSON: &str = "application/json";

/// Media type labeling a native-serialized (MessagePack) body.
pub const TYPE_BINARY: &str = "application/binary";

/// A completed HTTP round-trip, immutable once constructed.
///
/// Holds the raw body plus the content metadata the dispatcher normalized
/// out of the transport response. Serializable so the response cache can
/// round-trip it unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    body: Bytes,
    response_type: String,
    response_charset: String,
    http_code: u16,
    http_message: String,
}

impl Response {
    /// Build a response from already-normalized parts.
    ///
    /// `response_type` is expected in its normalized form (lowercase media
    /// type without parameters) and `response_charset` uppercased; values
    /// coming out of [`Response::from_http`] always are.
    pub fn new(
        body: impl Into<Bytes>,
        response_type: impl Into<String>,
        response_charset: impl Into<String>,
        http_code: u16,
        http_message: impl Into<String>,
    ) -> Self {
        Self {
            body: body.into(),
            response_type: response_type.into(),
            response_charset: response_charset.into(),
            http_code,
            http_message: http_message.into(),
        }
    }

    /// Normalize a raw transport response.
    ///
    /// Extracts the media type and charset out of the `Content-Type` header
    /// (both empty when the header is missing), resolves the canonical
    /// status message, and buffers the body.
    pub async fn from_http(raw: reqwest::Response) -> Result<Self> {
        let status = raw.status();
        let content_type = raw
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = raw.bytes().await.map_err(TransportError::Http)?;

        Ok(Self {
            body,
            response_type: content_type::media_type(&content_type),
            response_charset: content_type::charset(&content_type),
            http_code: status.as_u16(),
            http_message: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }

    /// Raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text (lossy for non-UTF-8 payloads).
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Normalized media type (lowercase, parameters stripped), e.g.
    /// `application/json`. Empty when the transport reported none.
    pub fn response_type(&self) -> &str {
        &self.response_type
    }

    /// Normalized charset (uppercase), e.g. `UTF-8`. Empty when the
    /// content type carried no parameter.
    pub fn response_charset(&self) -> &str {
        &self.response_charset
    }

    /// HTTP status code.
    pub fn http_code(&self) -> u16 {
        self.http_code
    }

    /// Canonical status message, e.g. `OK` or `Not Found`.
    pub fn http_message(&self) -> &str {
        &self.http_message
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.http_code)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
