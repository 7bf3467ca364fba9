//! Connection persistence.

use crate::base::Version;
use crate::message::Entity;

/// Whether the connection should be kept open after this exchange.
///
/// An explicit `Connection: close` wins over everything, then an explicit
/// `keep-alive`. Without either token the protocol version decides: 1.1 and
/// later default to persistent, older versions to closing. A message with no
/// headers at all falls straight through to the version default.
pub fn keep_alive(entity: Entity<'_>) -> bool {
    if let Some(headers) = entity.headers() {
        let tokens = headers.values("Connection");
        if tokens.iter().any(|t| t.eq_ignore_ascii_case("close")) {
            return false;
        }
        if tokens.iter().any(|t| t.eq_ignore_ascii_case("keep-alive")) {
            return true;
        }
    }
    entity.version() >= Version::HTTP_11
}
