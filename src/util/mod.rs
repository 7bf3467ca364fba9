//! Pure header-level utilities.
//!
//! Everything here operates on parsed header data only; no function holds
//! shared mutable state, and lookups degrade gracefully (return `None` or an
//! empty collection) rather than raising unless stated otherwise.

pub mod address;
pub mod auth;
pub mod connection;
pub mod cookies;
pub mod date;
pub mod encoding;
pub mod factory;
pub mod form;
pub mod redirect;
pub mod trace;

pub use address::{forwarded_for, remote_address, remote_host, remote_port};
pub use auth::{authenticate_proxy, authenticate_server, ClientAuthenticationHandler, Credentials};
pub use connection::keep_alive;
pub use cookies::{
    cookie_header, cookies, set_cookie_header, set_cookie_header_with, CookieAttributes,
};
pub use date::{format_date, if_modified_since, parse_date};
pub use encoding::{accepted_encodings, is_compressible, negotiate_content_encoding};
pub use factory::{get, new_empty_response, new_response};
pub use form::multipart_form_data;
pub use redirect::{redirect, request_uri};
pub use trace::{to_message, TraceMessage};
