//! Runtime version parsing and the version predicates that gate patches.
//!
//! Only `(major, minor)` participates in any predicate; the patch level is
//! parsed so that full version strings are accepted, but never consulted.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?$").expect("version regex is valid")
});

/// Rejected runtime version string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("runtime version is empty")]
    Empty,
    #[error("invalid runtime version '{0}': expected MAJOR.MINOR[.PATCH]")]
    Malformed(String),
    #[error("runtime version component out of range in '{0}'")]
    OutOfRange(String),
}

/// Comparable `(major, minor, patch)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl RuntimeVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    fn at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }

    /// 3.0 or later. A 4.x runtime still qualifies.
    pub fn is_3x(&self) -> bool {
        self.at_least(3, 0)
    }

    pub fn is_31_or_above(&self) -> bool {
        self.at_least(3, 1)
    }

    /// Exactly the 3.2 series, any patch level.
    pub fn is_32_exact(&self) -> bool {
        self.major == 3 && self.minor == 2
    }

    pub fn is_32_or_above(&self) -> bool {
        self.at_least(3, 2)
    }
}

impl FromStr for RuntimeVersion {
    type Err = VersionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }
        let caps = VERSION_RE
            .captures(trimmed)
            .ok_or_else(|| VersionError::Malformed(trimmed.to_string()))?;
        let component = |idx: usize| -> Result<u32, VersionError> {
            match caps.get(idx) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|_| VersionError::OutOfRange(trimmed.to_string())),
                None => Ok(0),
            }
        };
        Ok(Self::new(component(1)?, component(2)?, component(3)?))
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
