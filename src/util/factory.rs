//! Convenience constructors for common messages.

use crate::body::{Body, BodySource, ContentPart};
use crate::header::{Header, HeaderMap};
use crate::message::{Request, Response};
use std::io::Read;
use url::Url;

/// A simple `GET` for the given target: no content, `Content-Length: 0`, and
/// a `Host` header derived from the target's authority.
pub fn get(target: &Url) -> Request {
    let mut headers = HeaderMap::new();
    headers.set(Header::new("Content-Length", "0"));
    headers.set(Header::new("Host", authority(target)));
    Request::new(
        "GET",
        target.path(),
        Body::Content(ContentPart::empty(headers)),
    )
}

/// A `200 OK` response around the given content.
///
/// When the content length is not known up front the content is drained into
/// a buffer to measure it; `Content-Length` is always emitted. The originating
/// request, when given, is linked onto the response.
pub fn new_response(
    request: Option<Request>,
    content_type: &str,
    content: BodySource,
) -> std::io::Result<Response> {
    let (content, size) = match content {
        BodySource::Stream(mut stream) => {
            let mut buffer = Vec::new();
            stream.read_to_end(&mut buffer)?;
            let size = buffer.len() as u64;
            (BodySource::Buffer(buffer.into()), size)
        }
        sized => {
            let size = sized.len().unwrap_or(0);
            (sized, size)
        }
    };

    let mut headers = HeaderMap::new();
    headers.set(Header::new("Content-Length", size.to_string()));
    headers.set(Header::new("Content-Type", content_type));
    let mut response = Response::with_status(200, Some(Body::Content(ContentPart::new(headers, content))));
    if let Some(request) = request {
        response.set_request(request);
    }
    Ok(response)
}

/// A `204` response with no content and an explicit `Content-Length: 0`.
pub fn new_empty_response(request: Option<Request>) -> Response {
    let mut headers = HeaderMap::new();
    headers.set(Header::new("Content-Length", "0"));
    let mut response = Response::with_status(204, Some(Body::Content(ContentPart::empty(headers))));
    if let Some(request) = request {
        response.set_request(request);
    }
    response
}

fn authority(uri: &Url) -> String {
    let host = uri.host_str().unwrap_or("");
    match uri.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}
