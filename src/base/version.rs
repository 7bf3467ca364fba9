use crate::base::HttpError;
use std::fmt;
use std::str::FromStr;

/// Protocol version as a major.minor pair.
///
/// The wire carries the version as a decimal token (`HTTP/1.1`); we keep the
/// two components separately so comparisons are exact. Ordering is
/// lexicographic on (major, minor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u16,
    minor: u16,
}

impl Version {
    pub const HTTP_10: Version = Version { major: 1, minor: 0 };
    pub const HTTP_11: Version = Version { major: 1, minor: 1 };

    pub fn new(major: u16, minor: u16) -> Self {
        Version { major, minor }
    }

    pub fn major(&self) -> u16 {
        self.major
    }

    pub fn minor(&self) -> u16 {
        self.minor
    }
}

impl Default for Version {
    /// Unspecified versions default to 1.1.
    fn default() -> Self {
        Version::HTTP_11
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = HttpError;

    /// Parses the decimal version token: `"1.1"` -> 1.1, `"1"` -> 1.0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, "0"),
        };
        let major = major
            .parse::<u16>()
            .map_err(|_| HttpError::parse(format!("non-numeric version: {s:?}")))?;
        let minor = minor
            .parse::<u16>()
            .map_err(|_| HttpError::parse(format!("non-numeric version: {s:?}")))?;
        Ok(Version { major, minor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_major_minor() {
        let v: Version = "1.1".parse().unwrap();
        assert_eq!(v, Version::HTTP_11);
    }

    #[test]
    fn test_parse_bare_major() {
        let v: Version = "1".parse().unwrap();
        assert_eq!(v, Version::HTTP_10);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("one.one".parse::<Version>().is_err());
        assert!("".parse::<Version>().is_err());
        assert!("1.x".parse::<Version>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(Version::HTTP_10.to_string(), "1.0");
        assert_eq!(Version::HTTP_11.to_string(), "1.1");
        assert_eq!(Version::new(2, 0).to_string(), "2.0");
    }

    #[test]
    fn test_ordering() {
        assert!(Version::HTTP_11 > Version::HTTP_10);
        assert!(Version::HTTP_11 >= Version::HTTP_11);
        assert!(Version::new(2, 0) > Version::HTTP_11);
    }

    #[test]
    fn test_default_is_1_1() {
        assert_eq!(Version::default(), Version::HTTP_11);
    }
}
