//! Body conversion: declared content type to structured data.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{Response, TYPE_BINARY, TYPE_JSON};
use crate::{Error, Result};

impl Response {
    /// Decode the body into plain maps and sequences.
    ///
    /// `application/json` bodies are parsed as JSON. `application/binary`
    /// bodies are decoded from their native serialized form (MessagePack)
    /// first: a decoded string is re-parsed as JSON, a decoded map or
    /// sequence is returned as-is, and anything else gets one more chance
    /// as plain JSON text. Every other content type fails, as does any
    /// decode that ends in `null`, a scalar, or an empty map/sequence.
    pub fn to_array(&self) -> Result<Value> {
        self.decode_structured()
    }

    /// Decode the body into the caller's own types.
    ///
    /// Mirror of [`to_array`](Self::to_array) that deserializes the decoded
    /// structure into `T` instead of handing back dynamic values. A shape
    /// mismatch fails with the same conversion error.
    pub fn to_objects<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.decode_structured()?;
        serde_json::from_value(value).map_err(|_| Error::conversion(self.response_type()))
    }

    fn decode_structured(&self) -> Result<Value> {
        let decoded = match self.response_type() {
            TYPE_JSON => serde_json::from_slice(self.body()).ok(),
            TYPE_BINARY => self.decode_native(),
            _ => return Err(Error::conversion(self.response_type())),
        };

        match decoded {
            Some(value) if is_populated(&value) => Ok(value),
            _ => Err(Error::conversion(self.response_type())),
        }
    }

    /// Native-serialized decode with the JSON-string fallback chain.
    fn decode_native(&self) -> Option<Value> {
        match rmp_serde::from_slice::<Value>(self.body()) {
            // A serialized string is expected to hold JSON; recurse into it.
            Ok(Value::String(inner)) => serde_json::from_str(&inner).ok(),
            Ok(value @ (Value::Array(_) | Value::Object(_))) => Some(value),
            // Scalar and undecodable payloads fall back to plain JSON text.
            _ => serde_json::from_slice(self.body()).ok(),
        }
    }
}

/// A valid conversion result is a non-empty map or sequence; `null`,
/// scalars and empty containers are conversion failures.
fn is_populated(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => false,
    }
}
