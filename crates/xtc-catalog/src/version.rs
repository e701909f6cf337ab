//! GCC version strings.
//!
//! Catalog keys are usually full `major.minor.patch` versions, but user hints
//! are often partial ("12" or "15.1"). Missing components compare as zero for
//! ordering; matching against a hint only looks at the components it names.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A possibly partial `major[.minor[.patch]]` version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct GccVersion {
    raw: String,
    major: u64,
    minor: Option<u64>,
    patch: Option<u64>,
}

impl GccVersion {
    /// Major component.
    pub fn major(&self) -> u64 {
        self.major
    }

    /// Minor component, if written.
    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    /// Patch component, if written.
    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    /// The version exactly as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Zero-padded semantic version used for ordering.
    pub fn to_semver(&self) -> semver::Version {
        semver::Version::new(self.major, self.minor.unwrap_or(0), self.patch.unwrap_or(0))
    }

    /// Whether this (full) version satisfies a partial `hint`.
    ///
    /// Majors must be equal; minors must be equal only if the hint has one.
    /// The hint's patch component is ignored.
    pub fn matches_hint(&self, hint: &GccVersion) -> bool {
        self.major == hint.major && hint.minor.map_or(true, |m| self.minor == Some(m))
    }
}

impl FromStr for GccVersion {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidVersion {
            version: s.to_string(),
        };
        let trimmed = s.trim();
        let mut parts = trimmed.split('.');
        let mut next = || -> Result<Option<u64>, CatalogError> {
            parts
                .next()
                .map(|p| {
                    // `u64::from_str` also accepts a leading `+`.
                    if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(invalid());
                    }
                    p.parse::<u64>().map_err(|_| invalid())
                })
                .transpose()
        };
        let major = next()?.ok_or_else(invalid)?;
        let minor = next()?;
        let patch = next()?;
        if next()?.is_some() {
            return Err(invalid());
        }
        Ok(GccVersion {
            raw: trimmed.to_string(),
            major,
            minor,
            patch,
        })
    }
}

impl TryFrom<String> for GccVersion {
    type Error = CatalogError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<GccVersion> for String {
    fn from(v: GccVersion) -> Self {
        v.raw
    }
}

impl fmt::Display for GccVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for GccVersion {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for GccVersion {}

impl PartialOrd for GccVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GccVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_semver()
            .cmp(&other.to_semver())
            .then_with(|| self.raw.cmp(&other.raw))
    }
}
