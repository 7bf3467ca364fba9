//! Message parser: byte stream in, structured [`Request`]/[`Response`] out.

use crate::base::lineio::read_line;
use crate::base::HttpError;
use crate::body::{
    Body, BodyParseOptions, BodyParser, DynamicResourceProvider, ExpectContinueHandler,
    PlainBodyParser, ResourceContext,
};
use crate::header::{set_reserved, ReservedHeader};
use crate::message::startline::{self, DEFAULT_PROTOCOL};
use crate::message::{Request, Response};
use std::io::Read;

/// Parses one message at a time from a byte stream, delegating body
/// materialization to the configured [`BodyParser`] over a resource created
/// by the [`DynamicResourceProvider`].
///
/// `is_blocking` marks the transport as strictly blocking, in which case
/// request bodies must declare their length up front.
pub struct HttpParser {
    resource_provider: Box<dyn DynamicResourceProvider>,
    body_parser: Box<dyn BodyParser>,
    is_blocking: bool,
}

impl HttpParser {
    pub fn new(
        resource_provider: impl DynamicResourceProvider + 'static,
        is_blocking: bool,
    ) -> Self {
        HttpParser {
            resource_provider: Box::new(resource_provider),
            body_parser: Box::new(PlainBodyParser),
            is_blocking,
        }
    }

    /// Replaces the body-parsing collaborator.
    pub fn with_body_parser(mut self, body_parser: impl BodyParser + 'static) -> Self {
        self.body_parser = Box::new(body_parser);
        self
    }

    pub fn is_blocking(&self) -> bool {
        self.is_blocking
    }

    /// Parses a request with the default `HTTP` protocol token.
    ///
    /// Returns `Ok(None)` when the stream holds only an empty line: that is a
    /// harmless leftover (like a final linefeed) from a previous exchange,
    /// not a malformed message.
    pub fn parse_request<R: Read + 'static>(
        &self,
        stream: R,
        continue_handler: Option<&mut dyn ExpectContinueHandler>,
    ) -> Result<Option<Request>, HttpError> {
        self.parse_request_with_protocol(stream, continue_handler, DEFAULT_PROTOCOL)
    }

    pub fn parse_request_with_protocol<R: Read + 'static>(
        &self,
        mut stream: R,
        mut continue_handler: Option<&mut dyn ExpectContinueHandler>,
        protocol: &str,
    ) -> Result<Option<Request>, HttpError> {
        let line = read_line(&mut stream)?;
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let parsed = startline::parse_request_line(line, protocol)?;
        tracing::debug!(
            method = %parsed.method,
            target = %parsed.target,
            version = %parsed.version,
            "parsed request line"
        );

        if let Some(handler) = continue_handler.as_deref_mut() {
            handler.request_line(&parsed.method, &parsed.target);
        }

        let resource = self.resource_provider.create_contextual(
            ResourceContext::RequestTarget(&parsed.target),
            Box::new(stream),
            &format!("{}-request", protocol.to_ascii_lowercase()),
            "application/octet-stream",
        )?;
        let location = resource.location;
        let mut body = self.body_parser.parse(
            resource.reader,
            BodyParseOptions {
                known_length_required: self.is_blocking,
                allow_unknown_length_on_close: false,
            },
            continue_handler,
        )?;
        attach_resource_location(&mut body, location.as_ref())?;

        Ok(Some(Request::with_protocol(
            protocol,
            &parsed.method,
            &parsed.target,
            Some(body),
            parsed.version,
        )))
    }

    /// Parses a response with the default `HTTP` protocol token.
    pub fn parse_response<R: Read + 'static>(&self, stream: R) -> Result<Response, HttpError> {
        self.parse_response_with_protocol(stream, DEFAULT_PROTOCOL)
    }

    pub fn parse_response_with_protocol<R: Read + 'static>(
        &self,
        mut stream: R,
        protocol: &str,
    ) -> Result<Response, HttpError> {
        let line = read_line(&mut stream)?;
        let parsed = startline::parse_status_line(line.trim(), protocol)?;
        tracing::debug!(
            code = parsed.code,
            version = %parsed.version,
            "parsed status line"
        );

        // Peek exactly two bytes: a lone blank line means the response has no
        // body at all.
        let peeked = peek_two(&mut stream)?;
        if peeked.is_empty() || peeked == b"\n" || peeked == b"\r\n" {
            return Ok(Response::with_protocol(
                protocol,
                parsed.code,
                &parsed.reason,
                None,
                parsed.version,
            ));
        }

        // The peeked bytes must not be lost: chain them back in front.
        let combined = std::io::Cursor::new(peeked).chain(stream);
        let resource = self.resource_provider.create_contextual(
            ResourceContext::StatusCode(parsed.code),
            Box::new(combined),
            &format!("{}-response", protocol.to_ascii_lowercase()),
            "application/octet-stream",
        )?;
        let location = resource.location;
        let mut body = self.body_parser.parse(
            resource.reader,
            BodyParseOptions {
                known_length_required: self.is_blocking,
                allow_unknown_length_on_close: true,
            },
            None,
        )?;
        attach_resource_location(&mut body, location.as_ref())?;

        Ok(Response::with_protocol(
            protocol,
            parsed.code,
            &parsed.reason,
            Some(body),
            parsed.version,
        ))
    }
}

fn attach_resource_location(body: &mut Body, location: Option<&url::Url>) -> Result<(), HttpError> {
    if let Some(location) = location {
        set_reserved(
            body.headers_mut(),
            ReservedHeader::ResourceUri,
            Some(location.as_str()),
        )?;
    }
    Ok(())
}

/// Reads up to two bytes. Short reads happen only at end of stream.
fn peek_two(stream: &mut dyn Read) -> Result<Vec<u8>, HttpError> {
    let mut peeked = Vec::with_capacity(2);
    let mut byte = [0u8; 1];
    while peeked.len() < 2 {
        let n = stream.read(&mut byte)?;
        if n == 0 {
            break;
        }
        peeked.push(byte[0]);
    }
    Ok(peeked)
}
