//! Flat dotted settings tree.
//!
//! Package-manager settings are a nested tree (`compiler` → `libcxx` →
//! `gcc_version`). They are handled here flattened to dotted keys such as
//! `compiler.libcxx.gcc_version`, which is also how they are written on the
//! command line (`-s compiler.libcxx=libstdc++11`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};

/// Key of the target OS.
pub const OS: &str = "os";
/// Key of the toolchain vendor override.
pub const OS_TOOLCHAIN_VENDOR: &str = "os.toolchain-vendor";
/// Key of the target architecture.
pub const ARCH: &str = "arch";
/// Key of the toolchain CPU override.
pub const ARCH_TOOLCHAIN_CPU: &str = "arch.toolchain-cpu";
/// Key of the compiler name.
pub const COMPILER: &str = "compiler";
/// Key of the compiler version.
pub const COMPILER_VERSION: &str = "compiler.version";
/// Key of the C++ standard library.
pub const COMPILER_LIBCXX: &str = "compiler.libcxx";
/// Key of the libstdc++ (GCC) version linked by clang/intel-cc.
pub const COMPILER_LIBCXX_GCC_VERSION: &str = "compiler.libcxx.gcc_version";
/// Key of the Intel compiler mode.
pub const COMPILER_MODE: &str = "compiler.mode";

/// A flattened settings tree, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, String>);

impl Settings {
    /// Empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a list of `key=value` assignments. Later keys override earlier ones.
    pub fn parse_assignments<I, S>(assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut settings = Settings::new();
        for a in assignments {
            let a = a.as_ref();
            let (key, value) = a
                .split_once('=')
                .map(|(k, v)| (k.trim(), v.trim()))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| ResolveError::InvalidSetting {
                    assignment: a.to_string(),
                })?;
            settings.set(key, value);
        }
        Ok(settings)
    }

    /// Get a setting; unset and empty values are both `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Get a setting that must be present.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| ResolveError::MissingSetting {
            key: key.to_string(),
        })
    }

    /// Set a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Set a value only if `value` is `Some`.
    pub fn set_opt(&mut self, key: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.set(key, v);
        }
    }

    /// Overlay `other` on top of `self`.
    pub fn merge(&mut self, other: &Settings) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Keep only the listed keys.
    pub fn retain_keys(&mut self, keys: &[&str]) {
        self.0.retain(|k, _| keys.contains(&k.as_str()));
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
