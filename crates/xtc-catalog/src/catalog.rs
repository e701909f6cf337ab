//! Catalog model, loading, and lookups.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::integrity::ContentHash;
use crate::version::GccVersion;

/// The only host the published toolchains run on.
pub const DEFAULT_HOST_PLATFORM: &str = "Linux-x86_64";

/// Download location of one toolchain archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Artifact {
    /// Host platform the toolchain runs on (e.g., "Linux-x86_64").
    pub host: String,
    /// Target triplet the toolchain compiles for.
    pub triplet: String,
    /// Archive URL.
    pub url: String,
    /// SHA-256 of the archive.
    pub sha256: String,
}

impl Artifact {
    /// Expected content hash of the archive.
    pub fn content_hash(&self) -> ContentHash {
        ContentHash(self.sha256.to_ascii_lowercase())
    }

    /// Whether `data` matches the expected checksum.
    pub fn verify(&self, data: &[u8]) -> bool {
        ContentHash::compute(data) == self.content_hash()
    }

    /// Check a downloaded archive against the expected checksum.
    pub fn verify_file(&self, path: &Path) -> Result<()> {
        self.content_hash().verify_file(path)
    }
}

/// All artifacts published for one GCC version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Release {
    /// GCC version of every toolchain in this release.
    pub gcc_version: GccVersion,
    /// Published archives.
    #[serde(default, rename = "artifact")]
    pub artifacts: Vec<Artifact>,
}

impl Release {
    /// Find the artifact for a host and triplet.
    pub fn artifact(&self, host: &str, triplet: &str) -> Option<&Artifact> {
        self.artifacts
            .iter()
            .find(|a| a.host == host && a.triplet == triplet)
    }
}

/// A flattened `(gcc_version, host, triplet) → artifact` view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    pub gcc_version: &'a GccVersion,
    pub artifact: &'a Artifact,
}

/// The full toolchain catalog, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, rename = "release")]
    releases: Vec<Release>,
}

impl Catalog {
    /// Build a catalog from releases, validating it.
    pub fn new(releases: Vec<Release>) -> Result<Self> {
        let catalog = Catalog { releases };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a TOML catalog.
    pub fn parse_toml(s: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a JSON catalog with the same shape as the TOML one.
    pub fn parse_json(s: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CatalogError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::parse_json(&content)?,
            _ => Self::parse_toml(&content)?,
        };
        debug!(
            path = %path.display(),
            releases = catalog.releases.len(),
            "loaded toolchain catalog"
        );
        Ok(catalog)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check structural invariants: at least one release, no duplicate keys,
    /// well-formed checksums.
    pub fn validate(&self) -> Result<()> {
        let invalid = |detail: String| Err(CatalogError::Validation { detail });
        if self.releases.is_empty() {
            return invalid("catalog has no releases".into());
        }
        let mut versions = HashSet::new();
        for release in &self.releases {
            if !versions.insert(release.gcc_version.as_str()) {
                return invalid(format!("duplicate release for GCC {}", release.gcc_version));
            }
            let mut keys = HashSet::new();
            for a in &release.artifacts {
                if !keys.insert((a.host.as_str(), a.triplet.as_str())) {
                    return invalid(format!(
                        "duplicate artifact for GCC {} {} {}",
                        release.gcc_version, a.host, a.triplet
                    ));
                }
                if !ContentHash::is_valid_hex(&a.sha256) {
                    return invalid(format!(
                        "artifact {} for GCC {} has malformed sha256 '{}'",
                        a.triplet, release.gcc_version, a.sha256
                    ));
                }
            }
        }
        Ok(())
    }

    /// Releases in catalog order.
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// GCC versions in catalog order.
    pub fn versions(&self) -> impl Iterator<Item = &GccVersion> {
        self.releases.iter().map(|r| &r.gcc_version)
    }

    /// Every artifact, flattened, in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> {
        self.releases.iter().flat_map(|r| {
            r.artifacts.iter().map(move |a| CatalogEntry {
                gcc_version: &r.gcc_version,
                artifact: a,
            })
        })
    }

    /// Whether any release publishes toolchains for `host`.
    pub fn supports_host(&self, host: &str) -> bool {
        self.entries().any(|e| e.artifact.host == host)
    }

    /// Distinct host platforms, in first-seen order.
    pub fn hosts(&self) -> Vec<&str> {
        let mut hosts: Vec<&str> = Vec::new();
        for e in self.entries() {
            if !hosts.contains(&e.artifact.host.as_str()) {
                hosts.push(&e.artifact.host);
            }
        }
        hosts
    }

    /// Highest GCC version under semantic-version ordering.
    pub fn max_version(&self) -> Option<&GccVersion> {
        self.versions().max()
    }

    /// Pick a GCC version for an optional, possibly partial hint.
    ///
    /// - no hint: the highest version in the catalog;
    /// - a hint equal to a catalog version: that version;
    /// - otherwise the *first* release (catalog order) whose major, and minor
    ///   if the hint has one, equal the hint's. This is not a best-match
    ///   search: with releases `11.2.0, 11.3.0` the hint `11` picks `11.2.0`.
    pub fn resolve_gcc_version(&self, hint: Option<&str>) -> Result<GccVersion> {
        let unsupported = |requested: &str| CatalogError::UnsupportedToolchainVersion {
            requested: requested.to_string(),
            available: self.versions().map(|v| v.to_string()).collect(),
        };

        let Some(hint) = hint else {
            let max = self.max_version().ok_or_else(|| unsupported("<latest>"))?;
            debug!(gcc_version = %max, "no GCC version requested, using latest");
            return Ok(max.clone());
        };

        if let Some(exact) = self.versions().find(|v| v.as_str() == hint) {
            return Ok(exact.clone());
        }

        let wanted: GccVersion = hint.parse().map_err(|_| unsupported(hint))?;
        let found = self
            .versions()
            .find(|v| v.matches_hint(&wanted))
            .ok_or_else(|| unsupported(hint))?;
        debug!(hint, gcc_version = %found, "partial GCC version match");
        Ok(found.clone())
    }

    /// Look up an artifact by its full key.
    pub fn artifact(&self, gcc_version: &GccVersion, host: &str, triplet: &str) -> Option<&Artifact> {
        self.releases
            .iter()
            .find(|r| r.gcc_version == *gcc_version)
            .and_then(|r| r.artifact(host, triplet))
    }

    /// Require an artifact for `(gcc_version, host, triplet)`.
    ///
    /// There is no fallback to another version or host.
    pub fn validate_availability(
        &self,
        gcc_version: &GccVersion,
        triplet: &str,
        host: &str,
    ) -> Result<&Artifact> {
        self.artifact(gcc_version, host, triplet)
            .ok_or_else(|| CatalogError::UnsupportedTargetTriplet {
                triplet: triplet.to_string(),
                gcc_version: gcc_version.to_string(),
                host: host.to_string(),
            })
    }
}
