//! RFC 1123 date handling for headers like `Date` and `If-Modified-Since`.

use crate::base::HttpError;
use crate::header::HeaderMap;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// `Sun, 06 Nov 1994 08:49:37 GMT`. Header dates are always GMT, so the
/// description carries the zone as a literal and parsing assumes UTC.
const RFC_1123: &[FormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Formats an instant as an RFC 1123 header date in GMT.
pub fn format_date(instant: OffsetDateTime) -> Result<String, HttpError> {
    instant
        .to_offset(time::UtcOffset::UTC)
        .format(&RFC_1123)
        .map_err(|e| HttpError::format(format!("cannot format date: {e}")))
}

/// Parses an RFC 1123 header date.
pub fn parse_date(value: &str) -> Result<OffsetDateTime, HttpError> {
    PrimitiveDateTime::parse(value.trim(), &RFC_1123)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| HttpError::parse(format!("invalid header date '{value}': {e}")))
}

/// The parsed `If-Modified-Since` header, if present and well-formed.
pub fn if_modified_since(headers: &HeaderMap) -> Result<Option<OffsetDateTime>, HttpError> {
    match headers.value("If-Modified-Since") {
        Some(value) => parse_date(value).map(Some),
        None => Ok(None),
    }
}
