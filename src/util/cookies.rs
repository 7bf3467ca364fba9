//! Cookie reading (`Cookie`) and writing (`Set-Cookie`).
//!
//! Cookies ride the same value-plus-comments header model as everything else:
//! a `Cookie` header's primary value and each of its comments hold one
//! `name=value` pair, and `Set-Cookie` attributes are comments on the header.

use crate::base::HttpError;
use crate::header::{Header, HeaderMap};
use std::collections::HashMap;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

/// `Sun, 06-Nov-1994 08:49:37 GMT`, the legacy dashed variant used by
/// `Expires` cookie attributes.
const EXPIRES_FORMAT: &[FormatItem<'static>] = format_description!(
    "[weekday repr:short], [day]-[month repr:short]-[year] [hour]:[minute]:[second] GMT"
);

/// Optional `Set-Cookie` attributes, appended in a fixed order.
#[derive(Debug, Clone, Default)]
pub struct CookieAttributes {
    pub expires: Option<OffsetDateTime>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
}

/// Every cookie sent by the client, keyed by name.
///
/// All `Cookie` headers contribute; a name repeated across headers or pairs
/// accumulates all its values in order. Pairs without a `=` or with an empty
/// value are discarded.
pub fn cookies(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for header in headers.get_all("Cookie") {
        let pairs = std::iter::once(header.value())
            .chain(header.comments().iter().map(String::as_str));
        for pair in pairs {
            if let Some((name, value)) = pair.split_once('=') {
                let name = name.trim();
                let value = value.trim();
                if !name.is_empty() && !value.is_empty() {
                    result
                        .entry(name.to_string())
                        .or_default()
                        .push(value.to_string());
                }
            }
        }
    }
    result
}

/// A plain `Set-Cookie` header with no attributes.
pub fn set_cookie_header(name: &str, value: &str) -> Header {
    Header::new("Set-Cookie", format!("{name}={value}"))
}

/// A `Set-Cookie` header carrying the given attributes.
pub fn set_cookie_header_with(
    name: &str,
    value: &str,
    attributes: &CookieAttributes,
) -> Result<Header, HttpError> {
    let mut header = set_cookie_header(name, value);
    if let Some(expires) = attributes.expires {
        let formatted = expires
            .to_offset(time::UtcOffset::UTC)
            .format(&EXPIRES_FORMAT)
            .map_err(|e| HttpError::format(format!("cannot format cookie expiry: {e}")))?;
        header.add_comment(format!("Expires={formatted}"));
    }
    if let Some(path) = &attributes.path {
        header.add_comment(format!("Path={path}"));
    }
    if let Some(domain) = &attributes.domain {
        header.add_comment(format!("Domain={domain}"));
    }
    if attributes.secure {
        header.add_comment("Secure");
    }
    if attributes.http_only {
        header.add_comment("HttpOnly");
    }
    Ok(header)
}

/// A `Cookie` request header for a single pair.
pub fn cookie_header(name: &str, value: &str) -> Header {
    Header::new("Cookie", format!("{name}={value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_cookies_from_single_header() {
        let mut headers = HeaderMap::new();
        headers.append(Header::parse("Cookie", "session=abc123; theme=dark"));
        let jar = cookies(&headers);
        assert_eq!(jar["session"], vec!["abc123"]);
        assert_eq!(jar["theme"], vec!["dark"]);
    }

    #[test]
    fn test_cookies_accumulate_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(Header::parse("Cookie", "id=1"));
        headers.append(Header::parse("Cookie", "id=2; other=x"));
        let jar = cookies(&headers);
        assert_eq!(jar["id"], vec!["1", "2"]);
        assert_eq!(jar["other"], vec!["x"]);
    }

    #[test]
    fn test_malformed_pairs_discarded() {
        let mut headers = HeaderMap::new();
        headers.append(Header::parse("Cookie", "novalue=; bare; ok=yes"));
        let jar = cookies(&headers);
        assert_eq!(jar.len(), 1);
        assert_eq!(jar["ok"], vec!["yes"]);
    }

    #[test]
    fn test_value_split_on_first_equals() {
        let mut headers = HeaderMap::new();
        headers.append(Header::parse("Cookie", "token=a=b=c"));
        assert_eq!(cookies(&headers)["token"], vec!["a=b=c"]);
    }

    #[test]
    fn test_set_cookie_plain() {
        let header = set_cookie_header("session", "abc");
        assert_eq!(header.to_string(), "Set-Cookie: session=abc");
    }

    #[test]
    fn test_set_cookie_with_attributes() {
        let header = set_cookie_header_with(
            "session",
            "abc",
            &CookieAttributes {
                expires: Some(datetime!(1994-11-06 08:49:37 UTC)),
                path: Some("/app".to_string()),
                domain: Some("example.com".to_string()),
                secure: true,
                http_only: true,
            },
        )
        .unwrap();
        assert_eq!(
            header.to_string(),
            "Set-Cookie: session=abc; Expires=Sun, 06-Nov-1994 08:49:37 GMT; \
             Path=/app; Domain=example.com; Secure; HttpOnly"
        );
    }

    #[test]
    fn test_set_cookie_round_trips_through_cookie_parse() {
        let set = set_cookie_header("pref", "compact");
        let mut headers = HeaderMap::new();
        headers.append(Header::parse("Cookie", set.value()));
        assert_eq!(cookies(&headers)["pref"], vec!["compact"]);
    }
}
