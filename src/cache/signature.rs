//! Request signature generation.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use url::form_urlencoded;

/// Deterministic identity of a logical request, used as the cache lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> Self {
        signature.0
    }
}

/// Builds a [`Signature`] from the parts that make two requests
/// interchangeable: method, URL, body data, headers and credentials.
///
/// The mapping segments are encoded in sorted-key order, so the iteration
/// order of the maps handed in never changes the result. All five segments
/// are always present; an empty map or missing credentials contribute an
/// empty segment, keeping the delimiter count constant.
#[derive(Debug, Clone, Default)]
pub struct SignatureGenerator;

impl SignatureGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        method: &str,
        url: &str,
        data: &HashMap<String, String>,
        headers: &HashMap<String, String>,
        credentials: Option<&str>,
    ) -> Signature {
        let parts = [
            method.to_lowercase(),
            url.to_string(),
            encode_sorted(data),
            encode_sorted(headers),
            credentials.unwrap_or_default().to_string(),
        ];
        Signature(parts.join("|"))
    }
}

/// Form-urlencodes a map with its keys in canonical (sorted) order.
fn encode_sorted(map: &HashMap<String, String>) -> String {
    let sorted: BTreeMap<&String, &String> = map.iter().collect();
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(sorted)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_signature_from_full_request() {
        let generator = SignatureGenerator::new();
        let signature = generator.generate(
            "get",
            "http://my.site/api",
            &map(&[("do", "something"), ("with", "this")]),
            &map(&[("Some Header", "Some Value")]),
            Some("username:password"),
        );
        assert_eq!(
            signature.as_str(),
            "get|http://my.site/api|do=something&with=this|Some+Header=Some+Value|username:password"
        );
    }

    #[test]
    fn test_method_is_lowercased() {
        let generator = SignatureGenerator::new();
        let upper = generator.generate("GET", "http://my.site", &map(&[]), &map(&[]), None);
        let lower = generator.generate("get", "http://my.site", &map(&[]), &map(&[]), None);
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_empty_segments_keep_delimiter_count() {
        let generator = SignatureGenerator::new();
        let signature = generator.generate("get", "http://my.site", &map(&[]), &map(&[]), None);
        assert_eq!(signature.as_str(), "get|http://my.site|||");
    }

    #[test]
    fn test_map_order_does_not_affect_signature() {
        let generator = SignatureGenerator::new();
        let forward = generator.generate(
            "post",
            "http://my.site",
            &map(&[("alpha", "1"), ("beta", "2"), ("gamma", "3")]),
            &map(&[]),
            None,
        );
        let reversed = generator.generate(
            "post",
            "http://my.site",
            &map(&[("gamma", "3"), ("beta", "2"), ("alpha", "1")]),
            &map(&[]),
            None,
        );
        assert_eq!(forward, reversed);
        assert!(forward.as_str().contains("alpha=1&beta=2&gamma=3"));
    }

    #[test]
    fn test_distinct_requests_produce_distinct_signatures() {
        let generator = SignatureGenerator::new();
        let base = generator.generate("get", "http://my.site", &map(&[]), &map(&[]), None);
        let other_method = generator.generate("post", "http://my.site", &map(&[]), &map(&[]), None);
        let other_url = generator.generate("get", "http://my.site/2", &map(&[]), &map(&[]), None);
        let other_data =
            generator.generate("get", "http://my.site", &map(&[("a", "b")]), &map(&[]), None);
        let other_headers =
            generator.generate("get", "http://my.site", &map(&[]), &map(&[("X-H", "v")]), None);
        let other_auth =
            generator.generate("get", "http://my.site", &map(&[]), &map(&[]), Some("u:p"));
        for other in [
            &other_method,
            &other_url,
            &other_data,
            &other_headers,
            &other_auth,
        ] {
            assert_ne!(&base, other);
        }
    }

    #[test]
    fn test_values_are_url_encoded() {
        let generator = SignatureGenerator::new();
        let signature = generator.generate(
            "get",
            "http://my.site",
            &map(&[("q", "a&b=c d")]),
            &map(&[]),
            None,
        );
        assert_eq!(signature.as_str(), "get|http://my.site|q=a%26b%3Dc+d||");
    }

    #[test]
    fn test_signature_converts_into_its_string() {
        let generator = SignatureGenerator::new();
        let signature = generator.generate("get", "http://my.site", &map(&[]), &map(&[]), None);
        let raw: String = signature.clone().into();
        assert_eq!(raw, signature.as_str());
    }
}
