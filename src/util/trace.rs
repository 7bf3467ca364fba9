//! Redacted message rendering for diagnostics.

use crate::body::{Body, BodySource, ContentPart};
use crate::formatter::HttpFormatter;
use crate::message::{Entity, Request, Response};
use serde::{Deserialize, Serialize};

/// A textual rendering of a message, safe to log or ship elsewhere.
///
/// `partial` marks a rendering whose body was replaced by an empty one
/// because reading the real content would have consumed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceMessage {
    pub message: String,
    pub partial: bool,
}

/// Renders a message for tracing.
///
/// The original is never touched: a one-shot body is swapped for an empty
/// one carrying the same headers (marking the rendering partial), and
/// automatic content encoding is disabled so gzip or deflate never corrupts
/// the text. A formatting failure becomes the message text itself; tracing
/// must not crash its caller.
pub fn to_message(entity: Entity<'_>) -> TraceMessage {
    let mut formatter = HttpFormatter::new();
    formatter
        .body_formatter_mut()
        .set_disable_content_encoding(true);

    let (rendered, partial) = match entity {
        Entity::Request(request) => {
            let (body, partial) = render_copy(request.body());
            let mut copy = Request::with_protocol(
                request.protocol(),
                request.method(),
                request.target(),
                body,
                request.version(),
            );
            let mut out = Vec::new();
            (formatter.format_request(&mut copy, &mut out).map(|_| out), partial)
        }
        Entity::Response(response) => {
            let (body, partial) = render_copy(response.body());
            let mut copy = Response::with_protocol(
                response.protocol(),
                response.code(),
                response.reason(),
                body,
                response.version(),
            );
            let mut out = Vec::new();
            (formatter.format_response(&mut copy, &mut out).map(|_| out), partial)
        }
    };

    match rendered {
        Ok(bytes) => TraceMessage {
            message: String::from_utf8_lossy(&bytes).into_owned(),
            partial,
        },
        Err(error) => TraceMessage {
            message: format!("could not render message: {error}"),
            partial,
        },
    }
}

/// A renderable copy of the body: content buffers are cheaply cloned, while
/// one-shot sources are replaced by an empty source under the same headers.
fn render_copy(body: Option<&Body>) -> (Option<Body>, bool) {
    match body {
        None => (None, false),
        Some(Body::Content(part)) => match part.source() {
            BodySource::Empty => (
                Some(Body::Content(ContentPart::empty(part.headers().clone()))),
                false,
            ),
            BodySource::Buffer(buffer) => (
                Some(Body::Content(ContentPart::new(
                    part.headers().clone(),
                    BodySource::Buffer(buffer.clone()),
                ))),
                false,
            ),
            BodySource::Stream(_) => (
                Some(Body::Content(ContentPart::empty(part.headers().clone()))),
                true,
            ),
        },
        Some(Body::Multipart(multipart)) => (
            Some(Body::Content(ContentPart::empty(multipart.headers().clone()))),
            true,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{Header, HeaderMap};
    use std::io::Read;

    fn buffered_request(text: &'static str) -> Request {
        let mut headers = HeaderMap::new();
        headers.set(Header::new("Content-Length", text.len().to_string()));
        Request::new(
            "POST",
            "/submit",
            Body::Content(ContentPart::new(
                headers,
                BodySource::Buffer(bytes::Bytes::from_static(text.as_bytes())),
            )),
        )
    }

    #[test]
    fn test_buffered_body_rendered_in_full() {
        let request = buffered_request("data");
        let trace = to_message(Entity::from(&request));
        assert!(!trace.partial);
        assert_eq!(
            trace.message,
            "POST /submit HTTP/1.1\r\nContent-Length: 4\r\n\r\ndata"
        );
    }

    #[test]
    fn test_stream_body_redacted_and_marked_partial() {
        let stream: Box<dyn Read> = Box::new(&b"secret"[..]);
        let mut headers = HeaderMap::new();
        headers.set(Header::new("Content-Length", "6"));
        let request = Request::new(
            "POST",
            "/upload",
            Body::Content(ContentPart::new(headers, BodySource::Stream(stream))),
        );

        let trace = to_message(Entity::from(&request));
        assert!(trace.partial);
        assert!(!trace.message.contains("secret"));
        assert!(trace.message.contains("Content-Length: 6"));

        // the original body is untouched
        let mut request = request;
        let part = request.body_mut().unwrap().as_content_mut().unwrap();
        assert_eq!(part.text().unwrap(), "secret");
    }

    #[test]
    fn test_response_rendering() {
        let response = Response::with_status(204, None);
        let trace = to_message(Entity::from(&response));
        assert!(!trace.partial);
        assert_eq!(trace.message, "HTTP/1.1 204 No Content\r\n\r\n");
    }

    #[test]
    fn test_encoded_body_not_reencoded() {
        let mut headers = HeaderMap::new();
        headers.set(Header::new("Content-Encoding", "gzip"));
        headers.set(Header::new("Content-Length", "5"));
        let request = Request::new(
            "POST",
            "/compressed",
            Body::Content(ContentPart::new(
                headers,
                BodySource::Buffer(bytes::Bytes::from_static(b"plain")),
            )),
        );
        let trace = to_message(Entity::from(&request));
        // encoding disabled: the raw bytes appear as-is
        assert!(trace.message.ends_with("plain"));
    }

    #[test]
    fn test_serializes_to_json() {
        let request = buffered_request("x");
        let trace = to_message(Entity::from(&request));
        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains("\"partial\":false"));
    }
}
