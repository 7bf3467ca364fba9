//! Body handles and the collaborator seams around them.
//!
//! The framing layer does not care how headers are tokenized or how multipart
//! boundaries are found; it only needs a [`Body`] exposing a header
//! collection and readable content. [`BodyParser`] and [`BodyFormatter`] are
//! the seams where a full MIME implementation plugs in;
//! [`PlainBodyParser`]/[`PlainBodyFormatter`] are the built-in identity-framed
//! implementations.

pub mod collaborators;
pub mod model;
pub mod plain;

pub use collaborators::{
    BodyFormatter, BodyParseOptions, BodyParser, DynamicResource, DynamicResourceProvider,
    ExpectContinueHandler, ResourceContext,
};
pub use model::{Body, BodySource, ContentPart, MultipartBody};
pub use plain::{MemoryResourceProvider, PlainBodyFormatter, PlainBodyParser};
