//! `xtc.toml` project configuration and settings profiles.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use xtc_resolve::Settings;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "xtc.toml";

/// The top-level `xtc.toml` structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct XtcConfig {
    /// Toolchain catalog location.
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
    /// Host the toolchains run on.
    #[serde(default)]
    pub host: Option<HostConfig>,
    /// Where toolchain archives are extracted.
    #[serde(default)]
    pub install: Option<InstallConfig>,
    /// Default target settings (dotted keys).
    #[serde(default)]
    pub settings: Settings,
}

/// `[catalog]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog file, relative to `xtc.toml`.
    pub path: PathBuf,
}

/// `[host]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Host platform, e.g. "Linux-x86_64".
    pub platform: String,
}

/// `[install]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Extraction root, relative to `xtc.toml`.
    pub root: PathBuf,
}

/// A settings profile file: just a `[settings]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub settings: Settings,
}

impl XtcConfig {
    /// Search upward from `start_dir` for `xtc.toml`, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config = Self::from_toml(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Catalog path resolved against the config directory.
    pub fn catalog_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.catalog.as_ref().map(|c| config_dir.join(&c.path))
    }

    /// Install root resolved against the config directory.
    pub fn install_root(&self, config_dir: &Path) -> Option<PathBuf> {
        self.install.as_ref().map(|i| config_dir.join(&i.root))
    }

    pub fn host_platform(&self) -> Option<&str> {
        self.host.as_ref().map(|h| h.platform.as_str())
    }

    /// Template written by `xtc init`.
    pub fn template() -> String {
        r#"[catalog]
path = "catalog.toml"

[host]
platform = "Linux-x86_64"

[install]
root = "toolchains"

[settings]
os = "Linux"
arch = "x86_64"
compiler = "gcc"
"#
        .to_string()
    }
}

impl Profile {
    /// Load a profile file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading profile {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing profile {}", path.display()))
    }
}
