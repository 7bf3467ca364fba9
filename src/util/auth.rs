//! Client-side answers to server and proxy authentication challenges.

use crate::header::Header;
use crate::message::Response;

pub const SERVER_AUTHENTICATE_REQUEST: &str = "WWW-Authenticate";
pub const SERVER_AUTHENTICATE_RESPONSE: &str = "Authorization";
pub const PROXY_AUTHENTICATE_REQUEST: &str = "Proxy-Authenticate";
pub const PROXY_AUTHENTICATE_RESPONSE: &str = "Proxy-Authorization";

/// The identity a handshake is performed for.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub name: String,
    pub password: Option<String>,
}

/// Turns a challenge (the value of a `WWW-Authenticate` or
/// `Proxy-Authenticate` header) into a handshake value, or `None` when the
/// scheme is not supported by this handler.
pub trait ClientAuthenticationHandler {
    fn authenticate(&self, credentials: &Credentials, challenge: &str) -> Option<String>;
}

/// Answers the first supported `WWW-Authenticate` challenge on the response
/// with an `Authorization` header.
pub fn authenticate_server(
    response: &Response,
    credentials: &Credentials,
    handler: &dyn ClientAuthenticationHandler,
) -> Option<Header> {
    answer_challenge(
        response,
        credentials,
        handler,
        SERVER_AUTHENTICATE_REQUEST,
        SERVER_AUTHENTICATE_RESPONSE,
    )
}

/// Answers the first supported `Proxy-Authenticate` challenge on the
/// response with a `Proxy-Authorization` header.
pub fn authenticate_proxy(
    response: &Response,
    credentials: &Credentials,
    handler: &dyn ClientAuthenticationHandler,
) -> Option<Header> {
    answer_challenge(
        response,
        credentials,
        handler,
        PROXY_AUTHENTICATE_REQUEST,
        PROXY_AUTHENTICATE_RESPONSE,
    )
}

fn answer_challenge(
    response: &Response,
    credentials: &Credentials,
    handler: &dyn ClientAuthenticationHandler,
    challenge_header: &str,
    answer_header: &str,
) -> Option<Header> {
    let headers = response.headers()?;
    for challenge in headers.get_all(challenge_header) {
        if let Some(handshake) = handler.authenticate(credentials, &challenge.wire_value()) {
            return Some(Header::new(answer_header, handshake));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use crate::header::HeaderMap;

    struct BasicOnly;

    impl ClientAuthenticationHandler for BasicOnly {
        fn authenticate(&self, credentials: &Credentials, challenge: &str) -> Option<String> {
            if challenge.starts_with("Basic") {
                Some(format!("Basic {}", credentials.name))
            } else {
                None
            }
        }
    }

    fn challenge_response(challenges: &[&str]) -> Response {
        let mut headers = HeaderMap::new();
        for challenge in challenges {
            headers.append(Header::parse(SERVER_AUTHENTICATE_REQUEST, challenge));
        }
        Response::new(
            401,
            "Unauthorized",
            Some(Body::Content(crate::body::ContentPart::empty(headers))),
        )
    }

    fn credentials() -> Credentials {
        Credentials {
            name: "alice".to_string(),
            password: None,
        }
    }

    #[test]
    fn test_first_supported_challenge_answered() {
        let response = challenge_response(&["Negotiate", "Basic realm=\"app\""]);
        let header = authenticate_server(&response, &credentials(), &BasicOnly).unwrap();
        assert_eq!(header.name(), SERVER_AUTHENTICATE_RESPONSE);
        assert_eq!(header.value(), "Basic alice");
    }

    #[test]
    fn test_unsupported_challenges_yield_none() {
        let response = challenge_response(&["Negotiate"]);
        assert!(authenticate_server(&response, &credentials(), &BasicOnly).is_none());

        let bodiless = Response::with_status(204, None);
        assert!(authenticate_server(&bodiless, &credentials(), &BasicOnly).is_none());
    }

    #[test]
    fn test_proxy_challenge_uses_proxy_headers() {
        let mut headers = HeaderMap::new();
        headers.append(Header::new(PROXY_AUTHENTICATE_REQUEST, "Basic"));
        let response = Response::new(
            407,
            "Proxy Authentication Required",
            Some(Body::Content(crate::body::ContentPart::empty(headers))),
        );
        let header = authenticate_proxy(&response, &credentials(), &BasicOnly).unwrap();
        assert_eq!(header.name(), PROXY_AUTHENTICATE_RESPONSE);
    }
}
