//! Toolchain resolution.
//!
//! Resolution order, each step failing fast:
//!
//! 1. compiler-specific checks (standard library, Intel mode), before any
//!    catalog lookup;
//! 2. target OS and host platform;
//! 3. triplet from the arch/cpu/vendor tables;
//! 4. GCC version from the catalog;
//! 5. catalog availability of `(gcc_version, host, triplet)`;
//! 6. processor/bitness metadata of the triplet.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use xtc_catalog::{Artifact, Catalog, GccVersion, DEFAULT_HOST_PLATFORM};
use xtc_targets::{metadata, TargetError, Triplet};

use crate::compiler::CompilerKind;
use crate::error::{ResolveError, Result};
use crate::request::TargetRequest;

/// The only target OS the toolchains support.
pub const SUPPORTED_TARGET_OS: &str = "Linux";

/// A concrete, available toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedToolchain {
    /// Compiler family the toolchain was resolved for.
    pub compiler: CompilerKind,
    /// Major version of the invoking compiler, if known.
    pub compiler_major: Option<u64>,
    pub triplet: Triplet,
    pub gcc_version: GccVersion,
    /// CMake system processor name.
    pub processor: String,
    /// Target pointer width in bits.
    pub bitness: u32,
    /// Directory the toolchain archive is extracted into.
    pub install_root: PathBuf,
    /// Catalog artifact backing this toolchain.
    pub artifact: Artifact,
}

impl ResolvedToolchain {
    /// `<install_root>/<triplet>`: the root of the extracted toolchain.
    pub fn toolchain_dir(&self) -> PathBuf {
        self.install_root.join(self.triplet.to_string())
    }

    /// `<toolchain_dir>/bin`.
    pub fn bin_dir(&self) -> PathBuf {
        self.toolchain_dir().join("bin")
    }

    /// `<toolchain_dir>/<triplet>/sysroot`.
    pub fn sysroot(&self) -> PathBuf {
        self.toolchain_dir()
            .join(self.triplet.to_string())
            .join("sysroot")
    }
}

/// Derive the triplet for a request.
pub fn resolve_triplet(request: &TargetRequest) -> Result<Triplet> {
    let triplet = xtc_targets::resolve_triplet(
        &request.target_arch,
        request.custom_cpu_hint.as_deref(),
        request.custom_vendor_hint.as_deref(),
    )?;
    Ok(triplet)
}

/// Resolves requests against one catalog, host, and install location.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    host_platform: String,
    install_root: PathBuf,
}

impl<'a> Resolver<'a> {
    /// A resolver for the default host, installing into the current directory.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            host_platform: DEFAULT_HOST_PLATFORM.to_string(),
            install_root: PathBuf::from("."),
        }
    }

    /// Set the host platform (e.g., "Linux-x86_64").
    pub fn with_host_platform(mut self, host: impl Into<String>) -> Self {
        self.host_platform = host.into();
        self
    }

    /// Set where the toolchain archive is extracted.
    pub fn with_install_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.install_root = root.into();
        self
    }

    pub fn host_platform(&self) -> &str {
        &self.host_platform
    }

    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Pick the GCC version for a request.
    ///
    /// gcc requests use the compiler version; clang/intel-cc requests use the
    /// linked libstdc++ version.
    pub fn resolve_gcc_version(
        &self,
        compiler: CompilerKind,
        request: &TargetRequest,
    ) -> Result<GccVersion> {
        let hint = compiler.toolchain_version_hint(request);
        Ok(self.catalog.resolve_gcc_version(hint)?)
    }

    /// Require a catalog artifact for this host.
    pub fn validate_availability(
        &self,
        gcc_version: &GccVersion,
        triplet: &Triplet,
    ) -> Result<&'a Artifact> {
        let artifact = self.catalog.validate_availability(
            gcc_version,
            &triplet.to_string(),
            &self.host_platform,
        )?;
        Ok(artifact)
    }

    fn check_platforms(&self, request: &TargetRequest) -> Result<()> {
        if request.target_os != SUPPORTED_TARGET_OS {
            return Err(ResolveError::UnsupportedTargetOs {
                os: request.target_os.clone(),
            });
        }
        if !self.catalog.supports_host(&self.host_platform) {
            return Err(ResolveError::UnsupportedHostPlatform {
                host: self.host_platform.clone(),
                supported: self.catalog.hosts().iter().map(|h| h.to_string()).collect(),
            });
        }
        Ok(())
    }

    /// Resolve a request to a concrete toolchain.
    pub fn resolve(&self, request: &TargetRequest) -> Result<ResolvedToolchain> {
        let compiler: CompilerKind = request.compiler_name.parse()?;
        compiler.validate(request)?;
        self.check_platforms(request)?;

        let triplet = resolve_triplet(request)?;
        debug!(%triplet, "resolved target triplet");

        let gcc_version = self.resolve_gcc_version(compiler, request)?;
        debug!(%gcc_version, %compiler, "resolved GCC version");

        let artifact = self.validate_availability(&gcc_version, &triplet)?;

        let meta = triplet.metadata().ok_or_else(|| TargetError::UnknownTriplet {
            triplet: triplet.to_string(),
            known: metadata::known_triplets().collect::<Vec<_>>().join(", "),
        })?;

        info!(
            %triplet,
            %gcc_version,
            processor = meta.processor,
            bitness = meta.bitness,
            "resolved toolchain"
        );

        Ok(ResolvedToolchain {
            compiler,
            compiler_major: request.compiler_major(),
            triplet,
            gcc_version,
            processor: meta.processor.to_string(),
            bitness: meta.bitness,
            install_root: self.install_root.clone(),
            artifact: artifact.clone(),
        })
    }
}
