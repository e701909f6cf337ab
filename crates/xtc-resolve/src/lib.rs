//! Cross-toolchain resolution for the xtc toolchain resolver.
//!
//! Turns a possibly underspecified [`TargetRequest`] into a concrete
//! [`ResolvedToolchain`] from a [`Catalog`](xtc_catalog::Catalog), then into the
//! compiler flags and build-system variables needed to drive it.
//!
//! Resolution either succeeds completely or fails before any build step with
//! a [`ResolveError`] naming the valid alternatives.

pub mod build_config;
pub mod compiler;
pub mod error;
pub mod flags;
pub mod identity;
pub mod request;
pub mod resolver;
pub mod settings;

pub use build_config::BuildConfiguration;
pub use compiler::CompilerKind;
pub use error::{ResolveError, Result};
pub use flags::{derive_flags, find_gcc_install_dir, FlagSet};
pub use identity::PackageIdentity;
pub use request::TargetRequest;
pub use resolver::{resolve_triplet, ResolvedToolchain, Resolver};
pub use settings::Settings;
