//! Compiler flag derivation.
//!
//! gcc is driven through the toolchain's own prefixed executables. clang and
//! intel-cc are pointed at the toolchain's GCC installation: older clangs via
//! `--gcc-toolchain`/`--gcc-triple`, clang 16 and newer via the exact
//! `--gcc-install-dir`, which has to be located on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use xtc_catalog::GccVersion;

use crate::compiler::CompilerKind;
use crate::error::{ResolveError, Result};
use crate::resolver::ResolvedToolchain;

/// First clang major version that understands `--gcc-install-dir`.
pub const GCC_INSTALL_DIR_MIN_CLANG: u64 = 16;

/// Everything a build needs to invoke the resolved toolchain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagSet {
    /// Directories to prepend to `PATH`.
    pub path: Vec<PathBuf>,
    /// Compiler executable per language ("c", "cpp", "fortran").
    pub compiler_executables: BTreeMap<String, String>,
    pub cflags: Vec<String>,
    pub cxxflags: Vec<String>,
    pub exelinkflags: Vec<String>,
    pub sharedlinkflags: Vec<String>,
    /// Target sysroot (clang only).
    pub sysroot: Option<PathBuf>,
    /// Extra CMake cache variables (clang only).
    pub cmake_variables: BTreeMap<String, String>,
}

/// Derive the flags for a resolved toolchain.
///
/// Only the clang 16+ path touches the filesystem.
pub fn derive_flags(resolved: &ResolvedToolchain) -> Result<FlagSet> {
    match resolved.compiler {
        CompilerKind::Gcc => Ok(gcc_flags(resolved)),
        CompilerKind::Clang | CompilerKind::IntelCc => clang_flags(resolved),
    }
}

fn gcc_flags(resolved: &ResolvedToolchain) -> FlagSet {
    let triplet = resolved.triplet.to_string();
    let compiler_executables = [
        ("c", format!("{triplet}-gcc")),
        ("cpp", format!("{triplet}-g++")),
        ("fortran", format!("{triplet}-gfortran")),
    ]
    .into_iter()
    .map(|(lang, exe)| (lang.to_string(), exe))
    .collect();
    FlagSet {
        path: vec![resolved.bin_dir()],
        compiler_executables,
        ..FlagSet::default()
    }
}

fn clang_flags(resolved: &ResolvedToolchain) -> Result<FlagSet> {
    let triplet = resolved.triplet.to_string();
    let toolchain_dir = resolved.toolchain_dir();
    let mut flags = FlagSet::default();

    let toolchain_flags = match resolved.compiler_major {
        Some(major) if major >= GCC_INSTALL_DIR_MIN_CLANG => {
            let install_dir = find_gcc_install_dir(
                &toolchain_dir,
                &triplet,
                &resolved.gcc_version,
                resolved.bitness,
            )?;
            let link = format!("-L{}", install_dir.display());
            flags.exelinkflags.push(link.clone());
            flags.sharedlinkflags.push(link);
            vec![format!("--gcc-install-dir={}", install_dir.display())]
        }
        _ => vec![
            format!("--gcc-toolchain={}", toolchain_dir.display()),
            format!("--gcc-triple={triplet}"),
        ],
    };
    debug!(flags = ?toolchain_flags, "clang toolchain flags");

    flags.cflags = toolchain_flags.clone();
    flags.cxxflags = toolchain_flags;
    flags.sysroot = Some(resolved.sysroot());
    for lang in ["C", "CXX", "ASM"] {
        flags
            .cmake_variables
            .insert(format!("CMAKE_{lang}_COMPILER_TARGET"), triplet.clone());
    }
    Ok(flags)
}

/// Library directories searched for a GCC installation, in priority order.
fn lib_dirs(bitness: u32) -> [&'static str; 2] {
    if bitness == 64 {
        ["lib64", "lib"]
    } else {
        ["lib32", "lib"]
    }
}

/// Locate `<toolchain_dir>/<lib>/<gcc|gcc-cross>/<triplet>/<gcc_version>*`.
///
/// Search roots are tried in order (`lib64`/`lib32` before `lib`, `gcc` before
/// `gcc-cross`); the first root with any match wins. Within that root the
/// entry with the highest version is selected, so the result never depends on
/// directory listing order.
pub fn find_gcc_install_dir(
    toolchain_dir: &Path,
    triplet: &str,
    gcc_version: &GccVersion,
    bitness: u32,
) -> Result<PathBuf> {
    let prefix = gcc_version.as_str();
    let mut searched = Vec::new();

    for lib in lib_dirs(bitness) {
        for gcc in ["gcc", "gcc-cross"] {
            let root = toolchain_dir.join(lib).join(gcc).join(triplet);
            searched.push(format!("{}/{prefix}*", root.display()));
            let mut candidates = matching_dirs(&root, prefix)?;
            if candidates.is_empty() {
                continue;
            }
            if candidates.len() > 1 {
                warn!(
                    root = %root.display(),
                    count = candidates.len(),
                    "several GCC installations match, picking the highest version"
                );
            }
            candidates.sort_by(|a, b| version_key(a).cmp(&version_key(b)));
            if let Some(best) = candidates.pop() {
                debug!(path = %best.display(), "found GCC installation");
                return Ok(best);
            }
        }
    }

    Err(ResolveError::GccInstallationNotFound { searched })
}

/// Sub-directories of `root` whose name starts with `prefix`.
fn matching_dirs(root: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let mut found = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(prefix));
        if matches && path.is_dir() {
            found.push(path);
        }
    }
    Ok(found)
}

/// Sort key: parsed version first (unparsable names lowest), then the name.
fn version_key(path: &Path) -> (Option<GccVersion>, String) {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    (name.parse().ok(), name)
}
