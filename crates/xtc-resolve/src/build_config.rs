//! Translation into downstream build-system configuration.
//!
//! The downstream build (CMake or autotools) accepts a flat map of string
//! variables plus flag lists. Variable names follow the package manager's
//! `tools.*` configuration namespace.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::flags::FlagSet;
use crate::resolver::ResolvedToolchain;

pub const SYSTEM_NAME: &str = "tools.cmake.cmaketoolchain:system_name";
pub const SYSTEM_PROCESSOR: &str = "tools.cmake.cmaketoolchain:system_processor";
pub const HOST_TRIPLET: &str = "tools.gnu:host_triplet";
pub const CROSS_BUILD: &str = "tools.build.cross_building:cross_build";
pub const SYSROOT: &str = "tools.build:sysroot";
pub const COMPILER_EXECUTABLES: &str = "tools.build:compiler_executables";
pub const CMAKE_EXTRA_VARIABLES: &str = "tools.cmake.cmaketoolchain:extra_variables";

/// Flags and variables handed to the downstream build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildConfiguration {
    /// Directories to prepend to `PATH`.
    pub path: Vec<PathBuf>,
    pub cflags: Vec<String>,
    pub cxxflags: Vec<String>,
    pub exelinkflags: Vec<String>,
    pub sharedlinkflags: Vec<String>,
    /// Flat string variables. Map-valued settings use `<name>.<key>`.
    pub variables: BTreeMap<String, String>,
}

impl BuildConfiguration {
    /// Combine the common cross-build variables with compiler-specific flags.
    pub fn new(resolved: &ResolvedToolchain, flags: &FlagSet) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert(SYSTEM_NAME.to_string(), "Linux".to_string());
        variables.insert(SYSTEM_PROCESSOR.to_string(), resolved.processor.clone());
        variables.insert(HOST_TRIPLET.to_string(), resolved.triplet.to_string());
        variables.insert(CROSS_BUILD.to_string(), "true".to_string());
        if let Some(sysroot) = &flags.sysroot {
            variables.insert(SYSROOT.to_string(), sysroot.display().to_string());
        }
        for (lang, exe) in &flags.compiler_executables {
            variables.insert(format!("{COMPILER_EXECUTABLES}.{lang}"), exe.clone());
        }
        for (name, value) in &flags.cmake_variables {
            variables.insert(format!("{CMAKE_EXTRA_VARIABLES}.{name}"), value.clone());
        }

        Self {
            path: flags.path.clone(),
            cflags: flags.cflags.clone(),
            cxxflags: flags.cxxflags.clone(),
            exelinkflags: flags.exelinkflags.clone(),
            sharedlinkflags: flags.sharedlinkflags.clone(),
            variables,
        }
    }

    /// Look up a variable.
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// `PATH` value with the toolchain directories prepended to `existing`.
    pub fn path_env(&self, existing: Option<&str>) -> String {
        let mut parts: Vec<String> = self.path.iter().map(|p| p.display().to_string()).collect();
        if let Some(existing) = existing.filter(|e| !e.is_empty()) {
            parts.push(existing.to_string());
        }
        parts.join(":")
    }
}
