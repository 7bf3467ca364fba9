//! Message formatter: structured [`Request`]/[`Response`] in, wire bytes out.

use crate::base::HttpError;
use crate::body::{BodyFormatter, PlainBodyFormatter};
use crate::header::ReservedHeader;
use crate::message::startline;
use crate::message::{Request, Response};
use std::io::Write;

/// Serializes messages: the start line first, then header/body serialization
/// delegated to the body-formatting collaborator.
///
/// At construction every reserved internal header name is registered as
/// ignored, so out-of-band metadata never reaches the wire.
pub struct HttpFormatter {
    formatter: Box<dyn BodyFormatter>,
}

impl Default for HttpFormatter {
    fn default() -> Self {
        HttpFormatter::new()
    }
}

impl HttpFormatter {
    pub fn new() -> Self {
        HttpFormatter::with_body_formatter(PlainBodyFormatter::new())
    }

    pub fn with_body_formatter(mut formatter: impl BodyFormatter + 'static) -> Self {
        for reserved in ReservedHeader::ALL {
            formatter.ignore_header(reserved.name());
        }
        HttpFormatter {
            formatter: Box::new(formatter),
        }
    }

    /// Access to the body-formatting collaborator's configuration.
    pub fn body_formatter_mut(&mut self) -> &mut dyn BodyFormatter {
        self.formatter.as_mut()
    }

    /// Writes the full request: start line, headers, content.
    pub fn format_request(
        &self,
        request: &mut Request,
        output: &mut dyn Write,
    ) -> Result<(), HttpError> {
        output.write_all(&startline::format_request_line(request)?)?;
        match request.body_mut() {
            None => output.write_all(b"\r\n")?,
            Some(body) => self.formatter.format(body, output)?,
        }
        Ok(())
    }

    /// Writes the request start line and headers only, so a caller can
    /// inspect or modify headers before committing to the body bytes. A
    /// request without a body still gets its blank-line terminator.
    pub fn format_request_headers(
        &self,
        request: &Request,
        output: &mut dyn Write,
    ) -> Result<(), HttpError> {
        output.write_all(&startline::format_request_line(request)?)?;
        match request.body() {
            None => output.write_all(b"\r\n")?,
            Some(body) => self.formatter.format_headers(body, output)?,
        }
        Ok(())
    }

    /// Writes the request content only.
    pub fn format_request_content(
        &self,
        request: &mut Request,
        output: &mut dyn Write,
    ) -> Result<(), HttpError> {
        if let Some(body) = request.body_mut() {
            self.formatter.format_content(body, output)?;
        }
        Ok(())
    }

    /// Writes the full response: status line, then headers and content, or a
    /// bare blank line when there is no body.
    pub fn format_response(
        &self,
        response: &mut Response,
        output: &mut dyn Write,
    ) -> Result<(), HttpError> {
        output.write_all(&startline::format_status_line(response)?)?;
        match response.body_mut() {
            None => output.write_all(b"\r\n")?,
            Some(body) => self.formatter.format(body, output)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Body, BodySource, ContentPart};
    use crate::header::{set_reserved, Header, HeaderMap};

    fn text_body(text: &'static str) -> Body {
        let mut headers = HeaderMap::new();
        headers.set(Header::new("Content-Length", text.len().to_string()));
        Body::Content(ContentPart::new(
            headers,
            BodySource::Buffer(bytes::Bytes::from_static(text.as_bytes())),
        ))
    }

    #[test]
    fn test_format_request_with_body() {
        let mut request = Request::new("POST", "/submit", text_body("data"));
        let mut out = Vec::new();
        HttpFormatter::new().format_request(&mut request, &mut out).unwrap();
        assert_eq!(
            out,
            b"POST /submit HTTP/1.1\r\nContent-Length: 4\r\n\r\ndata"
        );
    }

    #[test]
    fn test_format_bodiless_request_gets_blank_line() {
        let mut request = Request::bodiless("GET", "/");
        let mut out = Vec::new();
        HttpFormatter::new().format_request(&mut request, &mut out).unwrap();
        assert_eq!(out, b"GET / HTTP/1.1\r\n\r\n");
    }

    #[test]
    fn test_reserved_headers_never_reach_the_wire() {
        let mut body = text_body("data");
        set_reserved(
            body.headers_mut(),
            crate::header::ReservedHeader::RemoteAddress,
            Some("10.0.0.1"),
        )
        .unwrap();
        set_reserved(
            body.headers_mut(),
            crate::header::ReservedHeader::ResourceUri,
            Some("memory:/r"),
        )
        .unwrap();

        let mut request = Request::new("POST", "/submit", body);
        let mut out = Vec::new();
        HttpFormatter::new().format_request(&mut request, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("X-Remote-Address"));
        assert!(!text.contains("X-Resource-URI"));
        assert!(text.contains("Content-Length: 4"));
    }

    #[test]
    fn test_headers_and_content_stream_independently() {
        let formatter = HttpFormatter::new();
        let mut request = Request::new("POST", "/submit", text_body("data"));

        let mut head = Vec::new();
        formatter.format_request_headers(&request, &mut head).unwrap();
        assert!(String::from_utf8_lossy(&head).ends_with("\r\n\r\n"));

        let mut content = Vec::new();
        formatter.format_request_content(&mut request, &mut content).unwrap();
        assert_eq!(content, b"data");
    }

    #[test]
    fn test_format_bodiless_response() {
        let mut response = Response::with_status(204, None);
        let mut out = Vec::new();
        HttpFormatter::new().format_response(&mut response, &mut out).unwrap();
        assert_eq!(out, b"HTTP/1.1 204 No Content\r\n\r\n");
    }

    #[test]
    fn test_format_response_with_body() {
        let mut response = Response::with_status(200, Some(text_body("ok!!")));
        let mut out = Vec::new();
        HttpFormatter::new().format_response(&mut response, &mut out).unwrap();
        assert_eq!(out, b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\n\r\nok!!");
    }
}
