//! Collaborator contracts consumed by the message parser and formatter.

use crate::base::HttpError;
use crate::body::Body;
use crate::header::HeaderMap;
use std::io::{self, Read, Write};
use url::Url;

/// How the body parser must treat message length.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyParseOptions {
    /// Body length must be known up front. Set when running over a strictly
    /// blocking transport, to avoid an indefinite read.
    pub known_length_required: bool,
    /// A missing length is acceptable because the transport signals closure.
    /// Valid for responses, never for requests.
    pub allow_unknown_length_on_close: bool,
}

/// Notified of an incoming request's method and target before its body is
/// parsed, so it can decide how to respond to `Expect: 100-continue`.
pub trait ExpectContinueHandler {
    /// Receives the parsed request line before body parsing begins.
    fn request_line(&mut self, _method: &str, _target: &str) {}

    /// Decides, from the headers, whether body parsing should proceed. When
    /// `false`, the parser stops at the headers and yields an empty body.
    fn should_continue(&mut self, _headers: &HeaderMap) -> bool {
        true
    }
}

/// The body-parsing collaborator: headers plus content framing.
pub trait BodyParser {
    fn parse(
        &self,
        stream: Box<dyn Read>,
        options: BodyParseOptions,
        continue_handler: Option<&mut dyn ExpectContinueHandler>,
    ) -> Result<Body, HttpError>;
}

/// The body-formatting collaborator: header and content serialization, with
/// configuration to suppress named headers and to disable on-the-fly
/// content-transfer-encoding.
pub trait BodyFormatter {
    /// Never emit this header name.
    fn ignore_header(&mut self, name: &str);

    /// Disable on-the-fly content encoding (and the chunked framing that goes
    /// with it). Used by diagnostic rendering, where compressed output would
    /// corrupt the trace.
    fn set_disable_content_encoding(&mut self, disable: bool);

    fn format_headers(&self, body: &Body, output: &mut dyn Write) -> Result<(), HttpError>;

    fn format_content(&self, body: &mut Body, output: &mut dyn Write) -> Result<(), HttpError>;

    /// Headers and content together.
    fn format(&self, body: &mut Body, output: &mut dyn Write) -> Result<(), HttpError> {
        self.format_headers(body, output)?;
        self.format_content(body, output)
    }
}

/// Extra placement context handed to a contextual resource provider.
#[derive(Debug, Clone, Copy)]
pub enum ResourceContext<'a> {
    /// The parsed request target.
    RequestTarget(&'a str),
    /// The parsed response status code.
    StatusCode(u16),
}

/// A resource-backed parse target: the byte source to parse from, plus an
/// optional stable location recorded on the body as `X-Resource-URI`.
pub struct DynamicResource {
    pub reader: Box<dyn Read>,
    pub location: Option<Url>,
}

/// Given a stream plus a logical name and content-type hint, returns a
/// resource-backed handle usable as the parse target.
pub trait DynamicResourceProvider {
    fn create(
        &self,
        source: Box<dyn Read>,
        name: &str,
        content_type: &str,
    ) -> io::Result<DynamicResource>;

    /// Contextual variant; the default ignores the context.
    fn create_contextual(
        &self,
        _context: ResourceContext<'_>,
        source: Box<dyn Read>,
        name: &str,
        content_type: &str,
    ) -> io::Result<DynamicResource> {
        self.create(source, name, content_type)
    }
}
