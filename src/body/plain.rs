//! Plain implementations of the body collaborators.
//!
//! These cover identity-framed messages: headers up to the blank line, then
//! `Content-Length`-bounded content or read-to-close. Chunked decoding and
//! multipart boundary scanning belong to a full MIME implementation plugged
//! in behind the same traits.

use crate::base::lineio::read_line;
use crate::base::HttpError;
use crate::body::{
    Body, BodyFormatter, BodyParseOptions, BodyParser, BodySource, ContentPart, DynamicResource,
    DynamicResourceProvider, ExpectContinueHandler,
};
use crate::header::Header;
use crate::header::HeaderMap;
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::io::{self, Read, Write};
use url::Url;

/// Identity-framed body parser.
#[derive(Debug, Default)]
pub struct PlainBodyParser;

impl BodyParser for PlainBodyParser {
    fn parse(
        &self,
        mut stream: Box<dyn Read>,
        options: BodyParseOptions,
        continue_handler: Option<&mut dyn ExpectContinueHandler>,
    ) -> Result<Body, HttpError> {
        let mut headers = HeaderMap::new();
        loop {
            let line = read_line(stream.as_mut())?;
            if line.trim().is_empty() {
                break;
            }
            let (name, raw_value) = line
                .split_once(':')
                .ok_or_else(|| HttpError::parse(format!("malformed header line: {line:?}")))?;
            headers.append(Header::parse(name.trim(), raw_value.trim()));
        }

        if let Some(handler) = continue_handler {
            let expects_continue = headers
                .value("Expect")
                .is_some_and(|v| v.eq_ignore_ascii_case("100-continue"));
            if expects_continue && !handler.should_continue(&headers) {
                return Ok(Body::Content(ContentPart::empty(headers)));
            }
        }

        if headers
            .values("Transfer-Encoding")
            .iter()
            .any(|v| v.eq_ignore_ascii_case("chunked"))
        {
            return Err(HttpError::UnsupportedStructure(
                "chunked transfer encoding is not supported by the plain body parser".to_string(),
            ));
        }

        let source = match headers.content_length() {
            Some(0) => BodySource::Empty,
            Some(length) => BodySource::Stream(Box::new(stream.take(length))),
            None if options.allow_unknown_length_on_close => BodySource::Stream(stream),
            None if options.known_length_required => {
                return Err(HttpError::parse(
                    "content length required on a blocking transport".to_string(),
                ))
            }
            None => BodySource::Stream(stream),
        };
        Ok(Body::Content(ContentPart::new(headers, source)))
    }
}

/// Identity-framed body formatter with optional on-the-fly gzip/deflate and
/// single-chunk chunked framing, driven entirely by the body's own headers.
#[derive(Debug, Default)]
pub struct PlainBodyFormatter {
    ignored: Vec<String>,
    disable_content_encoding: bool,
}

impl PlainBodyFormatter {
    pub fn new() -> Self {
        PlainBodyFormatter::default()
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignored.iter().any(|i| i.eq_ignore_ascii_case(name))
    }

    fn write_content_part(&self, part: &mut ContentPart, output: &mut dyn Write) -> Result<(), HttpError> {
        if part.source().is_empty() {
            return Ok(());
        }
        let data = part.bytes()?;

        let encoding = if self.disable_content_encoding {
            None
        } else {
            part.headers()
                .value("Content-Encoding")
                .map(str::to_ascii_lowercase)
        };
        let data = match encoding.as_deref() {
            Some("gzip") => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(&data)?;
                encoder.finish()?.into()
            }
            Some("deflate") => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(&data)?;
                encoder.finish()?.into()
            }
            _ => data,
        };

        let chunked = !self.disable_content_encoding
            && part
                .headers()
                .values("Transfer-Encoding")
                .iter()
                .any(|v| v.eq_ignore_ascii_case("chunked"));
        if chunked {
            output.write_all(format!("{:x}\r\n", data.len()).as_bytes())?;
            output.write_all(&data)?;
            output.write_all(b"\r\n0\r\n\r\n")?;
        } else {
            output.write_all(&data)?;
        }
        Ok(())
    }

    fn write_multipart(
        &self,
        multipart: &mut crate::body::MultipartBody,
        output: &mut dyn Write,
    ) -> Result<(), HttpError> {
        let boundary = multipart
            .headers()
            .get("Content-Type")
            .and_then(|h| h.parameter("boundary"))
            .map(str::to_string)
            .ok_or_else(|| {
                HttpError::format("multipart body without a boundary parameter".to_string())
            })?;
        for part in multipart.parts_mut() {
            output.write_all(format!("--{boundary}\r\n").as_bytes())?;
            self.format(part, output)?;
            output.write_all(b"\r\n")?;
        }
        output.write_all(format!("--{boundary}--\r\n").as_bytes())?;
        Ok(())
    }
}

impl BodyFormatter for PlainBodyFormatter {
    fn ignore_header(&mut self, name: &str) {
        if !self.is_ignored(name) {
            self.ignored.push(name.to_string());
        }
    }

    fn set_disable_content_encoding(&mut self, disable: bool) {
        self.disable_content_encoding = disable;
    }

    fn format_headers(&self, body: &Body, output: &mut dyn Write) -> Result<(), HttpError> {
        for header in body.headers().iter() {
            if self.is_ignored(header.name()) {
                continue;
            }
            output.write_all(format!("{}: {}\r\n", header.name(), header.wire_value()).as_bytes())?;
        }
        output.write_all(b"\r\n")?;
        Ok(())
    }

    fn format_content(&self, body: &mut Body, output: &mut dyn Write) -> Result<(), HttpError> {
        match body {
            Body::Content(part) => self.write_content_part(part, output),
            Body::Multipart(multipart) => self.write_multipart(multipart, output),
        }
    }
}

/// In-memory dynamic resource provider: hands the stream through untouched
/// and reports a `memory:/{name}` location.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryResourceProvider;

impl DynamicResourceProvider for MemoryResourceProvider {
    fn create(
        &self,
        source: Box<dyn Read>,
        name: &str,
        _content_type: &str,
    ) -> io::Result<DynamicResource> {
        let location = Url::parse(&format!("memory:/{name}")).ok();
        Ok(DynamicResource {
            reader: source,
            location,
        })
    }
}
