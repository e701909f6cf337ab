//! Resolution error types.

use xtc_catalog::CatalogError;
use xtc_targets::TargetError;

/// Errors that can occur while resolving a toolchain.
///
/// Every variant is a configuration error: nothing is retried and no partial
/// result is produced.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Triplet derivation failed (`UnsupportedArchitecture`, `UnsupportedVendor`, ...).
    #[error(transparent)]
    Target(#[from] TargetError),

    /// Catalog lookup failed (`UnsupportedToolchainVersion`, `UnsupportedTargetTriplet`, ...).
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Compiler is not gcc, clang, or intel-cc.
    #[error("unsupported compiler '{compiler}': this toolchain only supports gcc, clang, and intel-cc")]
    UnsupportedCompiler { compiler: String },

    /// clang/intel-cc must link against a GCC-provided standard library.
    #[error(
        "the C++ standard library is set to '{}', but this toolchain only supports {}",
        libcxx.as_deref().unwrap_or("<unset>"),
        accepted.join(" or ")
    )]
    UnsupportedStandardLibrary {
        libcxx: Option<String>,
        accepted: Vec<String>,
    },

    /// intel-cc must run in the accepted compiler mode.
    #[error(
        "the Intel compiler mode is set to '{}', but this toolchain only supports '{expected}' mode",
        mode.as_deref().unwrap_or("<unset>")
    )]
    UnsupportedCompilerMode {
        mode: Option<String>,
        expected: String,
    },

    /// Toolchains only target Linux.
    #[error("unsupported target OS '{os}': toolchains only target Linux")]
    UnsupportedTargetOs { os: String },

    /// The catalog publishes nothing that runs on this host.
    #[error("toolchains cannot run on host '{host}' (available hosts: {})", supported.join(", "))]
    UnsupportedHostPlatform { host: String, supported: Vec<String> },

    /// No `<lib>/<gcc>/<triplet>/<version>*` directory in the extracted toolchain.
    #[error("GCC installation not found; searched: {}", searched.join(", "))]
    GccInstallationNotFound { searched: Vec<String> },

    /// A required setting is missing from the settings tree.
    #[error("missing required setting '{key}'")]
    MissingSetting { key: String },

    /// A `key=value` assignment that could not be parsed.
    #[error("invalid setting '{assignment}': expected key=value")]
    InvalidSetting { assignment: String },

    /// I/O error while scanning the toolchain directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
