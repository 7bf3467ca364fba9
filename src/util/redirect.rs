//! Redirect construction and absolute-URI reconstruction.

use crate::base::HttpError;
use crate::header::Header;
use crate::message::Request;
use url::Url;

/// Builds the follow-up request for a redirect, reusing the original's method
/// and body.
///
/// When `absolute`, the new target is the full URI; otherwise only its
/// path, query, and fragment. Either way the `Host` header is rewritten to
/// the new URI's authority: 1.1+ requires the header, and with an absolute
/// target the two must agree anyway.
pub fn redirect(original: Request, uri: &Url, absolute: bool) -> Request {
    let target = if absolute {
        uri.as_str().to_string()
    } else {
        let mut target = uri.path().to_string();
        if target.is_empty() {
            target.push('/');
        }
        if let Some(query) = uri.query() {
            target.push('?');
            target.push_str(query);
        }
        if let Some(fragment) = uri.fragment() {
            target.push('#');
            target.push_str(fragment);
        }
        target
    };

    let method = original.method().to_string();
    let protocol = original.protocol().to_string();
    let version = original.version();
    let mut request =
        Request::with_protocol(&protocol, &method, &target, original.into_body(), version);
    if let Some(headers) = request.headers_mut() {
        headers.remove("Host");
        headers.set(Header::new("Host", authority(uri)));
    }
    request
}

/// Reconstructs the absolute URI a request addresses.
///
/// A target that is already absolute is used as-is. Otherwise the authority
/// comes from the `Host` header; a 1.1+ request without one is malformed,
/// while a 1.0 request falls back to `localhost`.
pub fn request_uri(request: &Request, secure: bool) -> Result<Url, HttpError> {
    let target = request.target();
    if target.starts_with("http://") || target.starts_with("https://") {
        return Url::parse(target)
            .map_err(|e| HttpError::format(format!("invalid absolute target '{target}': {e}")));
    }

    let target = if target.starts_with('/') {
        target.to_string()
    } else {
        format!("/{target}")
    };
    let host = match request.headers().and_then(|h| h.value("Host")) {
        Some(host) => host.to_string(),
        None => {
            if request.version() > crate::base::Version::HTTP_10 {
                return Err(HttpError::format(
                    "no Host header is present and the target is not absolute".to_string(),
                ));
            }
            "localhost".to_string()
        }
    };
    let scheme = if secure { "https" } else { "http" };
    let uri = format!("{scheme}://{host}{target}");
    Url::parse(&uri).map_err(|e| HttpError::format(format!("invalid request uri '{uri}': {e}")))
}

fn authority(uri: &Url) -> String {
    let host = uri.host_str().unwrap_or("");
    match uri.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use crate::header::HeaderMap;

    fn original() -> Request {
        let mut body = Body::empty();
        body.headers_mut().set(Header::new("Host", "old.example.com"));
        body.headers_mut().set(Header::new("Accept", "*/*"));
        Request::new("POST", "/old/path", body)
    }

    #[test]
    fn test_relative_redirect_uses_path_query_fragment() {
        let uri = Url::parse("http://new.example.com:8080/next?x=1#frag").unwrap();
        let request = redirect(original(), &uri, false);
        assert_eq!(request.target(), "/next?x=1#frag");
        assert_eq!(
            request.headers().unwrap().value("Host"),
            Some("new.example.com:8080")
        );
        // the rest of the body travels along
        assert_eq!(request.headers().unwrap().value("Accept"), Some("*/*"));
        assert_eq!(request.method(), "POST");
    }

    #[test]
    fn test_absolute_redirect_keeps_full_uri() {
        let uri = Url::parse("https://new.example.com/landing").unwrap();
        let request = redirect(original(), &uri, true);
        assert_eq!(request.target(), "https://new.example.com/landing");
        assert_eq!(
            request.headers().unwrap().value("Host"),
            Some("new.example.com")
        );
    }

    #[test]
    fn test_request_uri_from_host_header() {
        let uri = request_uri(&original(), false).unwrap();
        assert_eq!(uri.as_str(), "http://old.example.com/old/path");

        let uri = request_uri(&original(), true).unwrap();
        assert_eq!(uri.scheme(), "https");
    }

    #[test]
    fn test_request_uri_absolute_target_used_as_is() {
        let request = Request::new("GET", "http://a.example.com/x", Body::empty());
        let uri = request_uri(&request, true).unwrap();
        assert_eq!(uri.as_str(), "http://a.example.com/x");
    }

    #[test]
    fn test_request_uri_missing_host() {
        let request = Request::new("GET", "/x", Body::empty());
        assert!(matches!(
            request_uri(&request, false).unwrap_err(),
            HttpError::Format(_)
        ));

        let old = Request::with_version(
            "GET",
            "/x",
            Body::Content(crate::body::ContentPart::empty(HeaderMap::new())),
            crate::base::Version::HTTP_10,
        );
        let uri = request_uri(&old, false).unwrap();
        assert_eq!(uri.as_str(), "http://localhost/x");
    }
}
