use thiserror::Error;

/// Crate-wide error taxonomy.
///
/// Parse and format failures are always surfaced to the caller and never
/// retried internally. The one exception is diagnostic rendering
/// ([`crate::util::trace`]), which substitutes fallback text for a formatting
/// failure because tracing must never itself crash the caller.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Malformed start line or headers: missing separators, non-numeric
    /// version or status code, missing content length on a blocking read.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid target encoding or a failure surfaced from the body formatter.
    #[error("format error: {0}")]
    Format(String),

    /// Underlying stream failure. Always propagated.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Message structure the caller cannot process, e.g. a nested multipart
    /// during form-data extraction.
    #[error("unsupported structure: {0}")]
    UnsupportedStructure(String),

    /// A caller attempted to set a reserved header that is not user-settable
    /// while a value was already present. Carries 400 semantics.
    #[error("header not allowed: {name}")]
    HeaderPolicy { name: String },
}

impl HttpError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        HttpError::Parse(message.into())
    }

    pub(crate) fn format(message: impl Into<String>) -> Self {
        HttpError::Format(message.into())
    }

    /// The client-facing status semantic of this error, where one exists.
    ///
    /// Header-policy violations and parse failures map to 400; everything
    /// else has no protocol-level meaning and returns `None`.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HttpError::HeaderPolicy { .. } | HttpError::Parse(_) => Some(400),
            _ => None,
        }
    }
}
