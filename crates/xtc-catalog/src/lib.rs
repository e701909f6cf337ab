//! Versioned catalog of prebuilt GCC cross-toolchains.
//!
//! The catalog maps `gcc_version → host_platform → triplet → artifact` and is
//! supplied as external data (a TOML or JSON file). Release order in the file
//! is significant: partial version hints pick the first matching release.
//!
//! # Example
//!
//! ```toml
//! [[release]]
//! gcc-version = "12.2.0"
//!
//! [[release.artifact]]
//! host = "Linux-x86_64"
//! triplet = "x86_64-bionic-linux-gnu"
//! url = "https://example.org/x-tools-x86_64-bionic-linux-gnu-gcc12.tar.xz"
//! sha256 = "..."
//! ```

pub mod catalog;
pub mod error;
pub mod integrity;
pub mod version;

pub use catalog::{Artifact, Catalog, CatalogEntry, Release, DEFAULT_HOST_PLATFORM};
pub use error::{CatalogError, Result};
pub use integrity::ContentHash;
pub use version::GccVersion;
