//! Headers: ordered name/value pairs with semicolon-style comments, and the
//! reserved-header allow-list used to carry out-of-band metadata.

pub mod map;
pub mod reserved;

pub use map::{Header, HeaderMap};
pub use reserved::{set_reserved, ReservedHeader};
