use std::fmt;

/// A single header: name, primary value, and an ordered list of
/// semicolon-style comments.
///
/// Comments carry the parameter segments of structured values
/// (`Content-Disposition: form-data; name="field"`) as well as cookie
/// attributes on `Set-Cookie`. Name matching is case-insensitive throughout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    value: String,
    comments: Vec<String>,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Header {
            name: name.into(),
            value: value.into(),
            comments: Vec::new(),
        }
    }

    /// Splits a raw wire value into the primary value plus comments:
    /// `"form-data; name=\"a\""` -> value `form-data`, comments `[name="a"]`.
    pub fn parse(name: impl Into<String>, raw_value: &str) -> Self {
        let mut segments = raw_value.split(';').map(str::trim);
        let value = segments.next().unwrap_or("").to_string();
        Header {
            name: name.into(),
            value,
            comments: segments.map(str::to_string).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }

    /// Case-insensitive name check.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Looks up a `key=value` comment by key (case-insensitive), stripping
    /// surrounding double quotes from the value.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        for comment in &self.comments {
            if let Some((k, v)) = comment.split_once('=') {
                if k.trim().eq_ignore_ascii_case(key) {
                    return Some(v.trim().trim_matches('"'));
                }
            }
        }
        None
    }

    /// The full wire rendering of the value: primary value followed by each
    /// comment, joined with `"; "`.
    pub fn wire_value(&self) -> String {
        if self.comments.is_empty() {
            return self.value.clone();
        }
        let mut out = self.value.clone();
        for comment in &self.comments {
            out.push_str("; ");
            out.push_str(comment);
        }
        out
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.wire_value())
    }
}

/// A header collection that preserves insertion order.
///
/// Lookups are case-insensitive; `set` replaces the first matching entry in
/// place so header order stays stable across updates, `append` always adds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    headers: Vec<Header>,
}

impl HeaderMap {
    pub fn new() -> Self {
        HeaderMap {
            headers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.headers.iter()
    }

    /// First header with the given name.
    pub fn get(&self, name: &str) -> Option<&Header> {
        self.headers.iter().find(|h| h.is(name))
    }

    /// All headers with the given name, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Header> {
        self.headers.iter().filter(move |h| h.is(name))
    }

    /// Primary value of the first header with the given name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(Header::value)
    }

    /// Every value token for a name: each matching header contributes its
    /// primary value split on commas, trimmed. A repeated header and a
    /// comma-separated one read the same.
    pub fn values(&self, name: &str) -> Vec<String> {
        self.get_all(name)
            .flat_map(|h| h.value().split(','))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Replace the first header with a matching name, or append.
    pub fn set(&mut self, header: Header) {
        if let Some(existing) = self.headers.iter_mut().find(|h| h.is(header.name())) {
            *existing = header;
        } else {
            self.headers.push(header);
        }
    }

    /// Always append, allowing repeats.
    pub fn append(&mut self, header: Header) {
        self.headers.push(header);
    }

    /// Remove every header with the given name.
    pub fn remove(&mut self, name: &str) {
        self.headers.retain(|h| !h.is(name));
    }

    /// Primary value of `Content-Type`, without parameters.
    pub fn content_type(&self) -> Option<&str> {
        self.value("Content-Type")
    }

    /// Parsed `Content-Length`, if present and numeric.
    pub fn content_length(&self) -> Option<u64> {
        self.value("Content-Length")?.trim().parse().ok()
    }
}

impl FromIterator<Header> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = Header>>(iter: T) -> Self {
        HeaderMap {
            headers: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for HeaderMap {
    type Item = Header;
    type IntoIter = std::vec::IntoIter<Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.into_iter()
    }
}
