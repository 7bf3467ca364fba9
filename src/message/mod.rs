//! Request/response envelopes and the start-line codec.

pub mod startline;

use crate::base::Version;
use crate::body::Body;
use crate::header::HeaderMap;
use time::OffsetDateTime;

/// Standard reason phrase for a status code, from the canonical table.
pub fn reason_phrase(code: u16) -> &'static str {
    http::StatusCode::from_u16(code)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

/// A structured HTTP request.
///
/// Method and protocol token are case-normalized to upper-case at
/// construction; the target is kept raw (not URI-decoded). The body is the
/// mutable header collection plus lazily-readable content produced by the
/// body-parsing collaborator.
#[derive(Debug)]
pub struct Request {
    protocol: String,
    method: String,
    target: String,
    version: Version,
    body: Option<Body>,
    created: OffsetDateTime,
}

impl Request {
    pub fn new(method: &str, target: &str, body: Body) -> Self {
        Request::with_protocol(startline::DEFAULT_PROTOCOL, method, target, Some(body), Version::default())
    }

    pub fn with_version(method: &str, target: &str, body: Body, version: Version) -> Self {
        Request::with_protocol(startline::DEFAULT_PROTOCOL, method, target, Some(body), version)
    }

    pub fn with_protocol(
        protocol: &str,
        method: &str,
        target: &str,
        body: Option<Body>,
        version: Version,
    ) -> Self {
        Request {
            protocol: protocol.to_ascii_uppercase(),
            method: method.to_ascii_uppercase(),
            target: target.to_string(),
            version,
            body,
            created: OffsetDateTime::now_utc(),
        }
    }

    /// A request with a start line but no body handle at all.
    pub fn bodiless(method: &str, target: &str) -> Self {
        Request::with_protocol(startline::DEFAULT_PROTOCOL, method, target, None, Version::default())
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn body_mut(&mut self) -> Option<&mut Body> {
        self.body.as_mut()
    }

    pub fn into_body(self) -> Option<Body> {
        self.body
    }

    pub fn created(&self) -> OffsetDateTime {
        self.created
    }

    pub fn set_method(&mut self, method: &str) {
        self.method = method.to_ascii_uppercase();
    }

    pub fn set_target(&mut self, target: &str) {
        self.target = target.to_string();
    }

    /// Headers of the body handle, when one is present.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.body.as_ref().map(Body::headers)
    }

    pub fn headers_mut(&mut self) -> Option<&mut HeaderMap> {
        self.body.as_mut().map(Body::headers_mut)
    }
}

/// A structured HTTP response.
///
/// The body is nullable: a response may legitimately carry no content at all.
/// A response may hold a back-reference to the request that produced it.
#[derive(Debug)]
pub struct Response {
    protocol: String,
    code: u16,
    reason: String,
    body: Option<Body>,
    version: Version,
    request: Option<Box<Request>>,
    created: OffsetDateTime,
}

impl Response {
    pub fn new(code: u16, reason: &str, body: Option<Body>) -> Self {
        Response::with_protocol(startline::DEFAULT_PROTOCOL, code, reason, body, Version::default())
    }

    /// Like [`Response::new`] but the reason phrase comes from the standard
    /// status-code table.
    pub fn with_status(code: u16, body: Option<Body>) -> Self {
        Response::new(code, reason_phrase(code), body)
    }

    pub fn with_protocol(
        protocol: &str,
        code: u16,
        reason: &str,
        body: Option<Body>,
        version: Version,
    ) -> Self {
        Response {
            protocol: protocol.to_ascii_uppercase(),
            code,
            reason: reason.to_string(),
            body,
            version,
            request: None,
            created: OffsetDateTime::now_utc(),
        }
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn body_mut(&mut self) -> Option<&mut Body> {
        self.body.as_mut()
    }

    pub fn created(&self) -> OffsetDateTime {
        self.created
    }

    /// The originating request, if linked.
    pub fn request(&self) -> Option<&Request> {
        self.request.as_deref()
    }

    pub fn set_request(&mut self, request: Request) {
        self.request = Some(Box::new(request));
    }

    pub fn headers(&self) -> Option<&HeaderMap> {
        self.body.as_ref().map(Body::headers)
    }

    pub fn headers_mut(&mut self) -> Option<&mut HeaderMap> {
        self.body.as_mut().map(Body::headers_mut)
    }
}

/// Borrowed tagged view over either message kind.
///
/// Utilities that apply to both requests and responses take an `Entity` and
/// pattern-match instead of downcasting through a shared supertype.
#[derive(Clone, Copy)]
pub enum Entity<'a> {
    Request(&'a Request),
    Response(&'a Response),
}

impl<'a> Entity<'a> {
    pub fn version(&self) -> Version {
        match self {
            Entity::Request(r) => r.version(),
            Entity::Response(r) => r.version(),
        }
    }

    pub fn body(&self) -> Option<&'a Body> {
        match self {
            Entity::Request(r) => r.body(),
            Entity::Response(r) => r.body(),
        }
    }

    pub fn headers(&self) -> Option<&'a HeaderMap> {
        self.body().map(Body::headers)
    }
}

impl<'a> From<&'a Request> for Entity<'a> {
    fn from(request: &'a Request) -> Self {
        Entity::Request(request)
    }
}

impl<'a> From<&'a Response> for Entity<'a> {
    fn from(response: &'a Response) -> Self {
        Entity::Response(response)
    }
}
