//! The start-line codec: parsing and formatting of the first line of a
//! request (`METHOD target PROTOCOL/version`) and of a response
//! (`PROTOCOL/version code reason`).

use crate::base::{HttpError, Version};
use crate::message::{reason_phrase, Request, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

/// Protocol token assumed when the caller does not specify one.
pub const DEFAULT_PROTOCOL: &str = "HTTP";

/// Bytes that must be escaped in a request target. `%` is deliberately not in
/// the set so already-encoded sequences pass through intact; non-ASCII bytes
/// are always escaped.
const TARGET_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

/// A parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub target: String,
    pub version: Version,
}

/// A parsed status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub code: u16,
    pub reason: String,
    pub version: Version,
}

/// Parses `"METHOD target PROTOCOL/version"`.
///
/// The first space ends the method. The *last* occurrence of `"{protocol}/"`
/// begins the version, which tolerates protocol-token-like substrings inside
/// the target. The target in between is trimmed and any run of two or more
/// slashes is collapsed to a single one.
pub fn parse_request_line(line: &str, protocol: &str) -> Result<RequestLine, HttpError> {
    let first_space = line
        .find(' ')
        .ok_or_else(|| HttpError::parse(format!("no method separator in request line: {line:?}")))?;
    let marker = format!("{protocol}/");
    let protocol_index = line
        .rfind(&marker)
        .filter(|&i| i > first_space)
        .ok_or_else(|| HttpError::parse(format!("no protocol marker in request line: {line:?}")))?;

    let method = line[..first_space].to_string();
    let target = collapse_slashes(line[first_space + 1..protocol_index].trim());
    let version: Version = line[protocol_index + marker.len()..].trim().parse()?;

    Ok(RequestLine {
        method,
        target,
        version,
    })
}

/// Parses `"PROTOCOL/version code [reason]"`.
///
/// The first space ends the version token; an optional second space separates
/// the status code from the reason phrase. A missing reason falls back to the
/// standard status-code table.
pub fn parse_status_line(line: &str, protocol: &str) -> Result<StatusLine, HttpError> {
    let first_space = line
        .find(' ')
        .ok_or_else(|| HttpError::parse(format!("not a status line: {line:?}")))?;
    let marker = format!("{protocol}/");
    let version_token = line[..first_space]
        .strip_prefix(&marker)
        .unwrap_or(&line[..first_space]);
    let version: Version = version_token.trim().parse()?;

    let rest = &line[first_space + 1..];
    let (code_token, reason) = match rest.find(' ') {
        Some(second_space) => (&rest[..second_space], Some(&rest[second_space + 1..])),
        None => (rest, None),
    };
    let code: u16 = code_token
        .trim()
        .parse()
        .map_err(|_| HttpError::parse(format!("non-numeric status code: {code_token:?}")))?;
    let reason = match reason {
        Some(reason) => reason.to_string(),
        None => reason_phrase(code).to_string(),
    };

    Ok(StatusLine {
        code,
        reason,
        version,
    })
}

/// Formats `"{method} {target} {protocol}/{version}\r\n"` as ASCII bytes.
///
/// The target is defensively percent-encoded and then validated as a
/// syntactically legal URI reference; an invalid reference or a non-ASCII
/// residue fails with a format error.
pub fn format_request_line(request: &Request) -> Result<Vec<u8>, HttpError> {
    let target = encode_target(request.target());
    validate_uri_reference(&target)?;
    let line = format!(
        "{} {} {}/{}\r\n",
        request.method(),
        target,
        request.protocol(),
        request.version()
    );
    ascii_bytes(line)
}

/// Formats `"{protocol}/{version} {code} {reason}\r\n"` as ASCII bytes.
pub fn format_status_line(response: &Response) -> Result<Vec<u8>, HttpError> {
    let line = format!(
        "{}/{} {} {}\r\n",
        response.protocol(),
        response.version(),
        response.code(),
        response.reason()
    );
    ascii_bytes(line)
}

/// Percent-encodes a target while leaving existing `%XX` sequences intact.
pub(crate) fn encode_target(target: &str) -> String {
    utf8_percent_encode(target, TARGET_ENCODE).to_string()
}

fn validate_uri_reference(target: &str) -> Result<(), HttpError> {
    let result = match Url::parse(target) {
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            // Origin-form target: resolve against a throwaway base.
            let base = Url::parse("http://validation.invalid").expect("static base url");
            base.join(target).map(|_| ())
        }
        other => other.map(|_| ()),
    };
    result.map_err(|e| HttpError::format(format!("invalid target {target:?}: {e}")))
}

fn ascii_bytes(line: String) -> Result<Vec<u8>, HttpError> {
    if !line.is_ascii() {
        return Err(HttpError::format(format!(
            "start line is not ASCII: {line:?}"
        )));
    }
    Ok(line.into_bytes())
}

/// Collapses every run of two or more consecutive slashes to a single slash.
fn collapse_slashes(target: &str) -> String {
    let mut out = String::with_capacity(target.len());
    let mut last_was_slash = false;
    for c in target.chars() {
        if c == '/' && last_was_slash {
            continue;
        }
        last_was_slash = c == '/';
        out.push(c);
    }
    out
}
