//! CLI command implementations.

pub mod doctor;
pub mod init;
pub mod package_id;
pub mod resolve;
pub mod triplets;
pub mod verify;
pub mod versions;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use xtc_catalog::{Catalog, DEFAULT_HOST_PLATFORM};
use xtc_resolve::{Resolver, Settings, TargetRequest};

use crate::config::{Profile, XtcConfig};

/// Output format for machine-readable commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    Toml,
}

impl Format {
    /// Parse `--format`; `None` means text.
    pub fn parse(s: Option<&str>) -> Result<Self> {
        match s {
            None | Some("text") => Ok(Format::Text),
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            Some(other) => bail!("unknown format '{other}' (expected text, json, or toml)"),
        }
    }

    /// Render a value as JSON or TOML.
    pub fn render<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        match self {
            Format::Json => Ok(serde_json::to_string_pretty(value)?),
            Format::Toml => Ok(toml::to_string_pretty(value)?),
            Format::Text => bail!("text output is rendered by each command"),
        }
    }
}

/// Options shared by every command, merged from `xtc.toml` and the command line.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub catalog_path: Option<PathBuf>,
    pub host_platform: String,
    pub install_root: PathBuf,
    /// Settings from `xtc.toml`, then the profile, then `-s` assignments.
    pub settings: Settings,
}

/// Command-line overrides of the configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides<'a> {
    pub catalog: Option<&'a Path>,
    pub host: Option<&'a str>,
    pub install_root: Option<&'a Path>,
    pub profile: Option<&'a Path>,
    pub settings: &'a [String],
}

impl Invocation {
    /// Merge configuration layers. Command-line values win.
    pub fn build(
        cwd: &Path,
        config: Option<&(XtcConfig, PathBuf)>,
        overrides: &Overrides<'_>,
    ) -> Result<Self> {
        let mut settings = Settings::new();
        let mut catalog_path = None;
        let mut host_platform = None;
        let mut install_root = None;

        if let Some((config, dir)) = config {
            settings.merge(&config.settings);
            catalog_path = config.catalog_path(dir);
            host_platform = config.host_platform().map(str::to_string);
            install_root = config.install_root(dir);
        }
        if let Some(profile) = overrides.profile {
            settings.merge(&Profile::load(profile)?.settings);
        }
        settings.merge(&Settings::parse_assignments(overrides.settings)?);

        Ok(Self {
            catalog_path: overrides.catalog.map(Path::to_path_buf).or(catalog_path),
            host_platform: overrides
                .host
                .map(str::to_string)
                .or(host_platform)
                .unwrap_or_else(|| DEFAULT_HOST_PLATFORM.to_string()),
            install_root: overrides
                .install_root
                .map(Path::to_path_buf)
                .or(install_root)
                .unwrap_or_else(|| cwd.join("toolchains")),
            settings,
        })
    }

    /// Load the configured catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        let Some(path) = &self.catalog_path else {
            bail!("no catalog configured: pass --catalog or set [catalog] path in xtc.toml");
        };
        Catalog::load(path).with_context(|| format!("loading catalog {}", path.display()))
    }

    /// The target request described by the merged settings.
    pub fn request(&self) -> Result<TargetRequest> {
        Ok(TargetRequest::from_settings(&self.settings)?)
    }

    /// A resolver over `catalog` for this host and install root.
    pub fn resolver<'c>(&self, catalog: &'c Catalog) -> Resolver<'c> {
        Resolver::new(catalog)
            .with_host_platform(self.host_platform.clone())
            .with_install_root(self.install_root.clone())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_beats_profile_beats_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = XtcConfig::from_toml(
            "[catalog]\npath = \"c.toml\"\n[settings]\narch = \"x86_64\"\ncompiler = \"gcc\"\nbuild_type = \"Release\"\n",
        )
        .unwrap();
        let profile = dir.path().join("p.toml");
        std::fs::write(&profile, "[settings]\narch = \"armv6\"\ncompiler = \"clang\"\n").unwrap();
        let assignments = vec!["compiler=gcc".to_string()];
        let overrides = Overrides {
            profile: Some(&profile),
            settings: &assignments,
            host: Some("Linux-aarch64"),
            ..Overrides::default()
        };
        let inv = Invocation::build(
            dir.path(),
            Some(&(config, dir.path().to_path_buf())),
            &overrides,
        )
        .unwrap();
        assert_eq!(inv.settings.get("arch"), Some("armv6"));
        assert_eq!(inv.settings.get("compiler"), Some("gcc"));
        assert_eq!(inv.settings.get("build_type"), Some("Release"));
        assert_eq!(inv.catalog_path, Some(dir.path().join("c.toml")));
        assert_eq!(inv.host_platform, "Linux-aarch64");
        assert_eq!(inv.install_root, dir.path().join("toolchains"));
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let inv = Invocation::build(dir.path(), None, &Overrides::default()).unwrap();
        assert_eq!(inv.host_platform, DEFAULT_HOST_PLATFORM);
        assert!(inv.catalog().is_err());
        assert!(inv.request().is_err());
    }

    #[test]
    fn format_parsing() {
        assert_eq!(Format::parse(None).unwrap(), Format::Text);
        assert_eq!(Format::parse(Some("json")).unwrap(), Format::Json);
        assert!(Format::parse(Some("yaml")).is_err());
    }
}
