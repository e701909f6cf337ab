//! Package identity reduction.
//!
//! Two consumers share a toolchain package iff the settings that pick the
//! archive are equal. Everything else in the settings tree (build type, C++
//! standard, the invoking clang's own version) is dropped before hashing.

use serde::Serialize;
use xtc_catalog::ContentHash;

use crate::compiler::CompilerKind;
use crate::error::Result;
use crate::settings::{self, Settings};

/// The reduced settings identifying one toolchain package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageIdentity {
    /// Settings that affect the package.
    pub settings: Settings,
    /// SHA-256 over the sorted `key=value` lines of `settings`.
    pub digest: String,
}

impl PackageIdentity {
    /// Reduce a settings tree to its package identity.
    pub fn from_settings(full: &Settings) -> Result<Self> {
        let compiler: CompilerKind = full.require(settings::COMPILER)?.parse()?;
        let mut keep = vec![
            settings::OS,
            settings::OS_TOOLCHAIN_VENDOR,
            settings::ARCH,
            settings::ARCH_TOOLCHAIN_CPU,
            settings::COMPILER,
        ];
        match compiler {
            CompilerKind::Gcc => keep.push(settings::COMPILER_VERSION),
            CompilerKind::Clang | CompilerKind::IntelCc => {
                keep.push(settings::COMPILER_LIBCXX);
                if full.get(settings::COMPILER_LIBCXX).is_some() {
                    keep.push(settings::COMPILER_LIBCXX_GCC_VERSION);
                }
            }
        }

        let mut reduced = full.clone();
        reduced.retain_keys(&keep);
        let digest = digest(&reduced);
        Ok(Self {
            settings: reduced,
            digest,
        })
    }
}

fn digest(settings: &Settings) -> String {
    let mut lines = String::new();
    for (k, v) in settings.iter() {
        lines.push_str(&format!("{k}={v}\n"));
    }
    ContentHash::compute(lines.as_bytes()).0
}
