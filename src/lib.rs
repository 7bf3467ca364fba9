//! # httpframe
//!
//! A thin HTTP/1.x message-framing library.
//!
//! `httpframe` turns raw byte streams into structured request/response
//! envelopes and serializes envelopes back into wire bytes. The body layer is
//! pluggable: the parser and formatter delegate header/body materialization to
//! collaborator traits, and plain default implementations are provided for
//! identity-framed messages.
//!
//! ## Features
//!
//! - **Start-line codec**: request-line and status-line parsing/formatting
//!   with defensive target normalization
//! - **Reserved headers**: an allow-list of internal metadata headers that are
//!   policy-checked on write and stripped from the wire on output
//! - **Header utilities**: proxy-aware client address resolution, keep-alive
//!   decisions, content-encoding negotiation, cookies, multipart form data
//! - **Diagnostic rendering**: redacted, trace-safe textual dumps of any
//!   message
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use httpframe::body::MemoryResourceProvider;
//! use httpframe::parser::HttpParser;
//!
//! let parser = HttpParser::new(MemoryResourceProvider::default(), true);
//! let wire = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nContent-Length: 0\r\n\r\n";
//! let request = parser.parse_request(&wire[..], None).unwrap().unwrap();
//! assert_eq!(request.method(), "GET");
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error taxonomy and the protocol version type
//! - [`header`] - Ordered, case-insensitive headers and the reserved-header table
//! - [`message`] - Request/response envelopes and the start-line codec
//! - [`body`] - Body model, collaborator traits, and plain implementations
//! - [`parser`] - Byte stream to structured message
//! - [`formatter`] - Structured message to wire bytes
//! - [`util`] - Pure header-level utilities

pub mod base;
pub mod body;
pub mod formatter;
pub mod header;
pub mod message;
pub mod parser;
pub mod util;
