use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::PersistError;

/// A `major.minor.patch` version, as found in designer project files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VersionInfo {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionInfo {
    /// Returned for text with fewer than two components.
    pub const ERROR_VERSION: VersionInfo = VersionInfo::new(0, 0, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `major.minor` or `major.minor.patch`.
    ///
    /// Text with fewer than two components reads as [`Self::ERROR_VERSION`];
    /// a component that is not a number is an error.
    pub fn parse(text: &str) -> Result<Self, PersistError> {
        let parts: Vec<&str> = text.trim().split('.').collect();
        if parts.len() < 2 {
            return Ok(Self::ERROR_VERSION);
        }

        let number = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| PersistError::InvalidVersion(text.to_string()))
        };
        let patch = match parts.get(2) {
            Some(patch) => number(patch)?,
            None => 0,
        };
        Ok(Self::new(number(parts[0])?, number(parts[1])?, patch))
    }

    pub fn is_same_or_newer_than(&self, other: &VersionInfo) -> bool {
        self >= other
    }

    /// Single comparable number: `major * 1_000_000 + minor * 1000 + patch`.
    pub fn as_int(&self) -> u64 {
        u64::from(self.major) * 1_000_000 + u64::from(self.minor) * 1000 + u64::from(self.patch)
    }
}

impl PartialOrd for VersionInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl FromStr for VersionInfo {
    type Err = PersistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn newer_or_same(src: &str, dst: &str) -> bool {
        let src: VersionInfo = src.parse().unwrap();
        let dst: VersionInfo = dst.parse().unwrap();
        dst.is_same_or_newer_than(&src)
    }

    #[test]
    fn versions_without_patch() {
        assert!(newer_or_same("1.2", "1.2"));
        assert!(newer_or_same("1.1", "1.2"));
        assert!(!newer_or_same("1.2", "1.1"));
    }

    #[test]
    fn newer_versions() {
        assert!(newer_or_same("1.2.3", "1.2.3"));
        assert!(newer_or_same("1.2.3", "1.3.3"));
        assert!(newer_or_same("1.2.3", "1.2.4"));
        assert!(newer_or_same("1.2.2", "10.2.2"));
    }

    #[test]
    fn older_versions() {
        assert!(!newer_or_same("1.2.3", "1.2.2"));
        assert!(!newer_or_same("1.2.3", "1.1.3"));
        assert!(!newer_or_same("10.2.2", "1.2.2"));
    }

    #[test]
    fn short_text_is_error_version() {
        assert_eq!(VersionInfo::parse("7").unwrap(), VersionInfo::ERROR_VERSION);
        assert_eq!(VersionInfo::parse("").unwrap().to_string(), "0.0.0");
    }

    #[test]
    fn bad_component_is_rejected() {
        assert!(matches!(
            VersionInfo::parse("1.x.3"),
            Err(PersistError::InvalidVersion(_))
        ));
    }

    #[test]
    fn displays_and_packs() {
        let version = VersionInfo::parse("2.4").unwrap();
        assert_eq!(version.to_string(), "2.4.0");
        assert_eq!(version.as_int(), 2_004_000);
    }
}
