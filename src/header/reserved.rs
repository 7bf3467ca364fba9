use crate::base::HttpError;
use crate::header::{Header, HeaderMap};

/// Internally-reserved header names used to carry metadata between the core
/// and its host environment (resolved remote address, backing-resource
/// location, receipt timestamp).
///
/// Each entry is flagged whether an externally-supplied value is permitted.
/// Enforcement happens in [`set_reserved`]; the formatter additionally strips
/// every reserved name so none of them ever reaches the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedHeader {
    RemoteUser,
    RemoteHost,
    RemoteAddress,
    RemotePort,
    RemoteIsLocal,
    RequestProtocol,
    RequestUri,
    ResourceUri,
    RequestSecurity,
    AuthenticationScheme,
    LocalPort,
    RequestRelativeUri,
    RequestReceived,
    RequestType,
    ProxyPath,
}

impl ReservedHeader {
    pub const ALL: [ReservedHeader; 15] = [
        ReservedHeader::RemoteUser,
        ReservedHeader::RemoteHost,
        ReservedHeader::RemoteAddress,
        ReservedHeader::RemotePort,
        ReservedHeader::RemoteIsLocal,
        ReservedHeader::RequestProtocol,
        ReservedHeader::RequestUri,
        ReservedHeader::ResourceUri,
        ReservedHeader::RequestSecurity,
        ReservedHeader::AuthenticationScheme,
        ReservedHeader::LocalPort,
        ReservedHeader::RequestRelativeUri,
        ReservedHeader::RequestReceived,
        ReservedHeader::RequestType,
        ReservedHeader::ProxyPath,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReservedHeader::RemoteUser => "X-Remote-User",
            ReservedHeader::RemoteHost => "X-Remote-Host",
            ReservedHeader::RemoteAddress => "X-Remote-Address",
            ReservedHeader::RemotePort => "X-Remote-Port",
            ReservedHeader::RemoteIsLocal => "X-Remote-Is-Local",
            ReservedHeader::RequestProtocol => "X-Request-Protocol",
            ReservedHeader::RequestUri => "X-Request-URI",
            ReservedHeader::ResourceUri => "X-Resource-URI",
            ReservedHeader::RequestSecurity => "X-Request-Security",
            ReservedHeader::AuthenticationScheme => "X-Authentication-Scheme",
            ReservedHeader::LocalPort => "X-Local-Port",
            ReservedHeader::RequestRelativeUri => "X-Request-Relative-URI",
            ReservedHeader::RequestReceived => "X-Request-Received",
            ReservedHeader::RequestType => "X-Request-Type",
            ReservedHeader::ProxyPath => "X-Proxy-Path",
        }
    }

    /// Whether an externally-supplied value is permitted for this name.
    ///
    /// `X-Resource-URI` and `X-Request-Received` are injected by the parser
    /// before policy runs, so replacing an existing value must be allowed for
    /// those two.
    pub fn user_value_allowed(self) -> bool {
        matches!(
            self,
            ReservedHeader::ResourceUri | ReservedHeader::RequestReceived
        )
    }

    pub fn from_name(name: &str) -> Option<ReservedHeader> {
        ReservedHeader::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
    }
}

/// Set, replace, or remove a reserved header under the allow-list policy.
///
/// A `None` value removes the header. Setting a non-user-settable entry when
/// a value is already present fails with [`HttpError::HeaderPolicy`] (400
/// semantics); setting it for the first time, or setting a user-settable
/// entry repeatedly, replaces the value.
pub fn set_reserved(
    headers: &mut HeaderMap,
    reserved: ReservedHeader,
    value: Option<&str>,
) -> Result<(), HttpError> {
    match value {
        None => headers.remove(reserved.name()),
        Some(value) => {
            if !reserved.user_value_allowed() && headers.get(reserved.name()).is_some() {
                return Err(HttpError::HeaderPolicy {
                    name: reserved.name().to_string(),
                });
            }
            headers.set(Header::new(reserved.name(), value));
        }
    }
    Ok(())
}
