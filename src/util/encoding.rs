//! Content-encoding negotiation between a requester's `Accept-Encoding` and a
//! response body.

use crate::header::{Header, HeaderMap};

/// Encoding tokens the requester accepts, with any `q=` weight parameters
/// stripped. Order is preserved as sent.
///
/// Weight parameters are semicolon-separated, so the tokens are recovered
/// from the full wire value rather than the value/comments split.
pub fn accepted_encodings(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all("Accept-Encoding")
        .flat_map(|h| {
            h.wire_value()
                .split(',')
                .map(|token| token.split(';').next().unwrap_or("").trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

/// Whether compressing this content type is worthwhile. Text formats and
/// text-based application formats compress well; images, archives, and audio
/// or video are already compressed.
pub fn is_compressible(content_type: &str) -> bool {
    let content_type = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    if content_type.starts_with("text/") {
        return true;
    }
    matches!(
        content_type.as_str(),
        "application/json"
            | "application/javascript"
            | "application/xml"
            | "application/xhtml+xml"
            | "application/x-www-form-urlencoded"
            | "image/svg+xml"
    )
}

/// Negotiates a transfer compression for the response body.
///
/// Applies only when the content type is compressible and the declared length
/// is not exactly 0. An unknown (undeclared) length still negotiates: the
/// body is streamed, and streams are exactly what chunked framing is for.
/// Preference order is `gzip` then `deflate`. When an encoding is chosen any
/// `Content-Length` is removed, since the compressed size is unknown up
/// front, and `Transfer-Encoding: chunked` is forced.
///
/// Returns the chosen encoding token, if any.
pub fn negotiate_content_encoding(
    request_headers: &HeaderMap,
    body_headers: &mut HeaderMap,
) -> Option<&'static str> {
    let content_type = body_headers.content_type()?;
    if !is_compressible(content_type) {
        return None;
    }
    if body_headers.content_length() == Some(0) {
        return None;
    }
    if body_headers.value("Content-Encoding").is_some() {
        return None;
    }

    let accepted = accepted_encodings(request_headers);
    let chosen = if accepted.iter().any(|t| t.eq_ignore_ascii_case("gzip")) {
        "gzip"
    } else if accepted.iter().any(|t| t.eq_ignore_ascii_case("deflate")) {
        "deflate"
    } else {
        return None;
    };

    body_headers.set(Header::new("Content-Encoding", chosen));
    body_headers.remove("Content-Length");
    body_headers.set(Header::new("Transfer-Encoding", "chunked"));
    Some(chosen)
}
