use crate::header::HeaderMap;
use bytes::Bytes;
use std::fmt;
use std::io::{self, Read};

/// Where the content of a part comes from.
///
/// `Empty` and `Buffer` sources are re-readable; `Stream` borrows the
/// caller's byte source and can be drained exactly once. Reading a stream
/// source through [`ContentPart::bytes`] spools it into a buffer, after which
/// the part is re-readable.
pub enum BodySource {
    Empty,
    Buffer(Bytes),
    Stream(Box<dyn Read>),
}

impl BodySource {
    /// Known content length, when the source is finite in memory.
    pub fn len(&self) -> Option<u64> {
        match self {
            BodySource::Empty => Some(0),
            BodySource::Buffer(b) => Some(b.len() as u64),
            BodySource::Stream(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Whether this source can be read more than once without side effects.
    pub fn is_reopenable(&self) -> bool {
        !matches!(self, BodySource::Stream(_))
    }
}

impl fmt::Debug for BodySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodySource::Empty => write!(f, "BodySource::Empty"),
            BodySource::Buffer(b) => write!(f, "BodySource::Buffer({} bytes)", b.len()),
            BodySource::Stream(_) => write!(f, "BodySource::Stream(..)"),
        }
    }
}

/// A leaf body part: mutable headers plus content.
#[derive(Debug)]
pub struct ContentPart {
    headers: HeaderMap,
    source: BodySource,
}

impl ContentPart {
    pub fn new(headers: HeaderMap, source: BodySource) -> Self {
        ContentPart { headers, source }
    }

    /// A part carrying headers but no content.
    pub fn empty(headers: HeaderMap) -> Self {
        ContentPart {
            headers,
            source: BodySource::Empty,
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn source(&self) -> &BodySource {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut BodySource {
        &mut self.source
    }

    pub fn set_source(&mut self, source: BodySource) {
        self.source = source;
    }

    pub fn is_reopenable(&self) -> bool {
        self.source.is_reopenable()
    }

    /// Reads the content. A stream source is drained into a buffer on first
    /// read and the part becomes re-readable afterwards.
    pub fn bytes(&mut self) -> io::Result<Bytes> {
        match &mut self.source {
            BodySource::Empty => Ok(Bytes::new()),
            BodySource::Buffer(b) => Ok(b.clone()),
            BodySource::Stream(stream) => {
                let mut buffer = Vec::new();
                stream.read_to_end(&mut buffer)?;
                let bytes = Bytes::from(buffer);
                self.source = BodySource::Buffer(bytes.clone());
                Ok(bytes)
            }
        }
    }

    /// Reads the content as UTF-8 text (lossy).
    pub fn text(&mut self) -> io::Result<String> {
        Ok(String::from_utf8_lossy(&self.bytes()?).into_owned())
    }
}

/// A multipart body: its own headers plus immediate child parts.
#[derive(Debug, Default)]
pub struct MultipartBody {
    headers: HeaderMap,
    parts: Vec<Body>,
}

impl MultipartBody {
    pub fn new(headers: HeaderMap) -> Self {
        MultipartBody {
            headers,
            parts: Vec::new(),
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn parts(&self) -> &[Body] {
        &self.parts
    }

    pub fn parts_mut(&mut self) -> &mut [Body] {
        &mut self.parts
    }

    pub fn push(&mut self, part: Body) {
        self.parts.push(part);
    }
}

/// The body handle attached to a message: either a single content part or a
/// multipart with immediate children.
#[derive(Debug)]
pub enum Body {
    Content(ContentPart),
    Multipart(MultipartBody),
}

impl Body {
    /// A content body with empty headers and no content.
    pub fn empty() -> Self {
        Body::Content(ContentPart::empty(HeaderMap::new()))
    }

    pub fn headers(&self) -> &HeaderMap {
        match self {
            Body::Content(part) => part.headers(),
            Body::Multipart(multipart) => multipart.headers(),
        }
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        match self {
            Body::Content(part) => part.headers_mut(),
            Body::Multipart(multipart) => multipart.headers_mut(),
        }
    }

    /// Safe to re-read: only a content part with a non-stream source is.
    /// Multiparts are conservatively treated as one-shot.
    pub fn is_reopenable(&self) -> bool {
        matches!(self, Body::Content(part) if part.is_reopenable())
    }

    pub fn as_content(&self) -> Option<&ContentPart> {
        match self {
            Body::Content(part) => Some(part),
            Body::Multipart(_) => None,
        }
    }

    pub fn as_content_mut(&mut self) -> Option<&mut ContentPart> {
        match self {
            Body::Content(part) => Some(part),
            Body::Multipart(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Header;

    #[test]
    fn test_stream_source_spools_on_read() {
        let stream: Box<dyn Read> = Box::new(&b"hello"[..]);
        let mut part = ContentPart::new(HeaderMap::new(), BodySource::Stream(stream));
        assert!(!part.is_reopenable());

        assert_eq!(part.bytes().unwrap(), Bytes::from_static(b"hello"));
        // Spooled: a second read sees the same content.
        assert!(part.is_reopenable());
        assert_eq!(part.text().unwrap(), "hello");
    }

    #[test]
    fn test_empty_source() {
        let mut part = ContentPart::empty(HeaderMap::new());
        assert!(part.source().is_empty());
        assert_eq!(part.source().len(), Some(0));
        assert_eq!(part.bytes().unwrap().len(), 0);
    }

    #[test]
    fn test_body_reopenable() {
        assert!(Body::empty().is_reopenable());

        let stream: Box<dyn Read> = Box::new(&b"x"[..]);
        let body = Body::Content(ContentPart::new(HeaderMap::new(), BodySource::Stream(stream)));
        assert!(!body.is_reopenable());

        let multipart = Body::Multipart(MultipartBody::default());
        assert!(!multipart.is_reopenable());
    }

    #[test]
    fn test_headers_shared_across_kinds() {
        let mut body = Body::empty();
        body.headers_mut().set(Header::new("Content-Type", "text/plain"));
        assert_eq!(body.headers().content_type(), Some("text/plain"));
    }
}
