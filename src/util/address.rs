//! Remote address, port, and host resolution, direct or proxy-forwarded.

use crate::header::{HeaderMap, ReservedHeader};

/// Resolves the client address.
///
/// The internal `X-Remote-Address` header takes precedence: it is not
/// user-settable, so its presence is trustworthy as long as the allow-list is
/// enforced upstream. Behind a proxy the forwarding headers are consulted
/// next. Any trailing `:port` suffix is stripped.
pub fn remote_address(proxied: bool, headers: &HeaderMap) -> Option<String> {
    if let Some(address) = headers.value(ReservedHeader::RemoteAddress.name()) {
        return Some(strip_port(address));
    }
    if proxied {
        return forwarded_client(headers).map(|ip| strip_port(&ip));
    }
    None
}

/// Resolves the client port: the internal `X-Remote-Port` header first, then
/// an explicit `:port` suffix on the forwarded address.
pub fn remote_port(proxied: bool, headers: &HeaderMap) -> Option<u16> {
    if let Some(port) = headers.value(ReservedHeader::RemotePort.name()) {
        return port.trim().parse().ok();
    }
    if proxied {
        let forwarded = forwarded_client(headers)?;
        let (_, port) = forwarded.rsplit_once(':')?;
        return port.parse().ok();
    }
    None
}

/// Resolves the client host name: the internal `X-Remote-Host` header first,
/// falling back to the resolved address.
pub fn remote_host(proxied: bool, headers: &HeaderMap) -> Option<String> {
    if let Some(host) = headers.value(ReservedHeader::RemoteHost.name()) {
        return Some(host.to_string());
    }
    remote_address(proxied, headers)
}

/// The originating client as reported by forwarding headers, internal header
/// first, with any port suffix stripped.
pub fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    if let Some(address) = headers.value(ReservedHeader::RemoteAddress.name()) {
        return Some(strip_port(address));
    }
    forwarded_client(headers).map(|ip| strip_port(&ip))
}

/// RFC 7239 `Forwarded` (`for=` token) first, then the first entry of the
/// comma-separated `X-Forwarded-For` list: the originating client.
fn forwarded_client(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = headers.get("Forwarded") {
        // e.g. Forwarded: for=192.0.2.60;proto=http;by=203.0.113.43
        // The primary value and the comments are each candidate pairs.
        let segments = std::iter::once(forwarded.value()).chain(
            forwarded.comments().iter().map(String::as_str),
        );
        for segment in segments {
            if let Some((key, value)) = segment.split_once('=') {
                if key.trim().eq_ignore_ascii_case("for") {
                    return Some(value.trim().trim_matches('"').to_string());
                }
            }
        }
    }
    let forwarded_for = headers.value("X-Forwarded-For")?;
    forwarded_for
        .split(',')
        .next()
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
}

fn strip_port(address: &str) -> String {
    match address.split_once(':') {
        Some((host, _)) => host.to_string(),
        None => address.to_string(),
    }
}
