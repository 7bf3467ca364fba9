//! Byte-at-a-time line reading shared by the message and body parsers.

use std::io::{self, Read};

/// Reads one `\n`-terminated line, treating a trailing `\r` as part of the
/// delimiter. Returns the line without the delimiter; at end of stream the
/// bytes read so far are returned (possibly an empty string).
///
/// Bytes are decoded leniently so a stray non-UTF-8 byte in a start line
/// produces a replacement character instead of an IO failure; the start-line
/// codec rejects it downstream.
pub(crate) fn read_line(stream: &mut dyn Read) -> io::Result<String> {
    let mut line = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        let n = stream.read(&mut byte)?;
        if n == 0 || byte[0] == b'\n' {
            break;
        }
        line.push(byte[0]);
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Ok(String::from_utf8_lossy(&line).into_owned())
}
