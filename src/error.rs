use crate::response::Response;
use crate::transport::TransportError;
use thiserror::Error;

/// Unified error type for the library.
///
/// Cache-store failures are absent on purpose: the cache layer degrades
/// them to misses instead of surfacing them.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport could not complete the network round-trip.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with an error status (>= 400).
    ///
    /// Carries the full response so callers can still inspect the body and
    /// status line.
    #[error("HTTP error {}: {}", .0.http_code(), .0.http_message())]
    Http(Box<Response>),

    /// The response body could not be decoded into structured data given
    /// its declared content type.
    #[error("cannot convert the response content of type [{content_type}] to structured data")]
    ResponseConversion { content_type: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build a conversion error for the given declared content type.
    pub(crate) fn conversion(content_type: impl Into<String>) -> Self {
        Error::ResponseConversion {
            content_type: content_type.into(),
        }
    }

    /// The response attached to an HTTP error, if this is one.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Http(response) => Some(response),
            _ => None,
        }
    }

    /// The status code attached to an HTTP error, if this is one.
    pub fn http_code(&self) -> Option<u16> {
        self.response().map(Response::http_code)
    }

    /// True when this error is an HTTP error status (as opposed to the
    /// request never completing).
    pub fn is_http(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}
