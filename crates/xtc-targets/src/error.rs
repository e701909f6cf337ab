//! Error types for triplet resolution.

/// Errors that can occur while deriving a target triplet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// Neither a CPU override nor a default CPU for the architecture exists.
    #[error(
        "unsupported toolchain CPU type for arch '{arch}': arch must be one of ({supported}), \
         or set arch.toolchain-cpu explicitly"
    )]
    UnsupportedArchitecture {
        /// The requested architecture.
        arch: String,
        /// Comma-separated list of architectures with a default CPU.
        supported: String,
    },

    /// Neither a vendor override nor a default vendor for the CPU exists.
    #[error(
        "unsupported toolchain vendor for CPU '{cpu}': make sure arch.toolchain-cpu is one of \
         ({supported}), or set os.toolchain-vendor explicitly"
    )]
    UnsupportedVendor {
        /// The resolved CPU.
        cpu: String,
        /// Comma-separated list of CPUs with a default vendor.
        supported: String,
    },

    /// A triplet string that is not in the metadata table.
    #[error("unknown target triplet '{triplet}' (known: {known})")]
    UnknownTriplet {
        /// The offending triplet string.
        triplet: String,
        /// Comma-separated list of known triplets.
        known: String,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
