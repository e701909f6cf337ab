//! Catalog error types.

use std::path::PathBuf;

/// Errors that can occur while loading or querying the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No catalog release matches the requested GCC version.
    #[error(
        "invalid GCC version '{requested}': only the following versions are supported: {}",
        available.join(", ")
    )]
    UnsupportedToolchainVersion {
        requested: String,
        available: Vec<String>,
    },

    /// The release exists but has no artifact for this host and triplet.
    #[error("unsupported toolchain target triplet '{triplet}' for GCC version {gcc_version} on host {host}")]
    UnsupportedTargetTriplet {
        triplet: String,
        gcc_version: String,
        host: String,
    },

    /// A version string that is not `major[.minor[.patch]]`.
    #[error("invalid version string '{version}'")]
    InvalidVersion { version: String },

    /// Structural problem in a catalog file.
    #[error("invalid catalog: {detail}")]
    Validation { detail: String },

    /// Downloaded archive does not match the catalog checksum.
    #[error("integrity check failed for {}: expected {expected}, got {actual}", path.display())]
    IntegrityFailure {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Catalog file not found.
    #[error("catalog file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
