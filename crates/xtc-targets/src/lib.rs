//! Cross-compilation target triplets for the xtc toolchain resolver.
//!
//! A toolchain target is named by a `cpu-vendor-os_abi` triplet. Triplets are
//! never written by hand: they are derived from the requested architecture
//! (and optional CPU/vendor overrides) through fixed tables, and every triplet
//! the tables can produce maps to exactly one processor/bitness pair.

pub mod error;
pub mod metadata;
pub mod tables;
pub mod triplet;

pub use error::{Result, TargetError};
pub use metadata::TripletMetadata;
pub use triplet::{resolve_triplet, Triplet};
