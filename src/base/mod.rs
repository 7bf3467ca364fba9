//! Base types and error handling.
//!
//! Provides the foundational pieces shared by every other module:
//! - [`HttpError`]: the crate-wide error taxonomy
//! - [`Version`]: the protocol version as a major.minor pair

pub mod error;
pub mod version;

pub(crate) mod lineio;

pub use error::HttpError;
pub use version::Version;
