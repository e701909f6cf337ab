//! Target requests.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::settings::{self, Settings};

fn default_os() -> String {
    "Linux".to_string()
}

/// Optional string field where an empty value means unset, as in [`Settings::get`].
fn non_empty<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty()))
}

/// What the consumer wants to build for.
///
/// Everything except the architecture and compiler may be left out; the
/// resolver fills in table defaults and catalog maxima.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetRequest {
    /// Target OS (only "Linux" is supported).
    #[serde(rename = "os", default = "default_os")]
    pub target_os: String,
    /// Target architecture setting (e.g., "armv7hf").
    #[serde(rename = "arch")]
    pub target_arch: String,
    /// Compiler name: "gcc", "clang", or "intel-cc".
    #[serde(rename = "compiler")]
    pub compiler_name: String,
    /// Compiler version, possibly partial ("13", "17.0").
    #[serde(default, deserialize_with = "non_empty")]
    pub compiler_version: Option<String>,
    /// C++ standard library (e.g., "libstdc++11").
    #[serde(default, deserialize_with = "non_empty", rename = "libcxx")]
    pub libcxx_kind: Option<String>,
    /// GCC version whose libstdc++ clang/intel-cc should link against.
    #[serde(default, deserialize_with = "non_empty")]
    pub libcxx_gcc_version: Option<String>,
    /// Intel compiler mode (e.g., "icx").
    #[serde(default, deserialize_with = "non_empty")]
    pub compiler_mode: Option<String>,
    /// Explicit toolchain CPU, overriding the architecture default.
    #[serde(default, deserialize_with = "non_empty", rename = "toolchain-cpu")]
    pub custom_cpu_hint: Option<String>,
    /// Explicit toolchain vendor, overriding the CPU default.
    #[serde(default, deserialize_with = "non_empty", rename = "toolchain-vendor")]
    pub custom_vendor_hint: Option<String>,
}

impl TargetRequest {
    /// A request with only the mandatory fields set.
    pub fn new(arch: impl Into<String>, compiler: impl Into<String>) -> Self {
        Self {
            target_os: default_os(),
            target_arch: arch.into(),
            compiler_name: compiler.into(),
            compiler_version: None,
            libcxx_kind: None,
            libcxx_gcc_version: None,
            compiler_mode: None,
            custom_cpu_hint: None,
            custom_vendor_hint: None,
        }
    }

    /// Read a request from a flattened settings tree.
    ///
    /// `arch` and `compiler` are required; `os` defaults to "Linux".
    pub fn from_settings(s: &Settings) -> Result<Self> {
        let owned = |key: &str| s.get(key).map(str::to_string);
        Ok(Self {
            target_os: owned(settings::OS).unwrap_or_else(default_os),
            target_arch: s.require(settings::ARCH)?.to_string(),
            compiler_name: s.require(settings::COMPILER)?.to_string(),
            compiler_version: owned(settings::COMPILER_VERSION),
            libcxx_kind: owned(settings::COMPILER_LIBCXX),
            libcxx_gcc_version: owned(settings::COMPILER_LIBCXX_GCC_VERSION),
            compiler_mode: owned(settings::COMPILER_MODE),
            custom_cpu_hint: owned(settings::ARCH_TOOLCHAIN_CPU),
            custom_vendor_hint: owned(settings::OS_TOOLCHAIN_VENDOR),
        })
    }

    /// Flatten back into a settings tree.
    pub fn to_settings(&self) -> Settings {
        let mut s = Settings::new();
        s.set(settings::OS, self.target_os.as_str());
        s.set(settings::ARCH, self.target_arch.as_str());
        s.set(settings::COMPILER, self.compiler_name.as_str());
        s.set_opt(settings::COMPILER_VERSION, self.compiler_version.as_deref());
        s.set_opt(settings::COMPILER_LIBCXX, self.libcxx_kind.as_deref());
        s.set_opt(
            settings::COMPILER_LIBCXX_GCC_VERSION,
            self.libcxx_gcc_version.as_deref(),
        );
        s.set_opt(settings::COMPILER_MODE, self.compiler_mode.as_deref());
        s.set_opt(settings::ARCH_TOOLCHAIN_CPU, self.custom_cpu_hint.as_deref());
        s.set_opt(settings::OS_TOOLCHAIN_VENDOR, self.custom_vendor_hint.as_deref());
        s
    }

    /// Major component of the compiler version, if it has a numeric one.
    pub fn compiler_major(&self) -> Option<u64> {
        self.compiler_version
            .as_deref()
            .and_then(|v| v.split('.').next())
            .and_then(|m| m.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;

    #[test]
    fn from_settings_reads_overrides() {
        let s = Settings::parse_assignments([
            "arch=armv7hf",
            "arch.toolchain-cpu=armv8",
            "os.toolchain-vendor=rpi3",
            "compiler=clang",
            "compiler.version=17",
            "compiler.libcxx=libstdc++11",
            "compiler.libcxx.gcc_version=14",
        ])
        .unwrap();
        let r = TargetRequest::from_settings(&s).unwrap();
        assert_eq!(r.target_os, "Linux");
        assert_eq!(r.custom_cpu_hint.as_deref(), Some("armv8"));
        assert_eq!(r.custom_vendor_hint.as_deref(), Some("rpi3"));
        assert_eq!(r.libcxx_gcc_version.as_deref(), Some("14"));
        assert_eq!(r.compiler_major(), Some(17));
        assert_eq!(r.to_settings(), {
            let mut expected = s.clone();
            expected.set("os", "Linux");
            expected
        });
    }

    #[test]
    fn arch_is_required() {
        let s = Settings::parse_assignments(["compiler=gcc"]).unwrap();
        let err = TargetRequest::from_settings(&s).unwrap_err();
        assert!(matches!(err, ResolveError::MissingSetting { ref key } if key == "arch"));
    }

    #[test]
    fn compiler_major_parsing() {
        let mut r = TargetRequest::new("x86_64", "clang");
        assert_eq!(r.compiler_major(), None);
        r.compiler_version = Some("15.0.7".into());
        assert_eq!(r.compiler_major(), Some(15));
        r.compiler_version = Some("trunk".into());
        assert_eq!(r.compiler_major(), None);
    }

    #[test]
    fn deserialize_profile_table() {
        let r: TargetRequest = toml::from_str(
            r#"
arch = "armv6"
compiler = "gcc"
compiler-version = "12"
toolchain-vendor = "rpi"
"#,
        )
        .unwrap();
        assert_eq!(r.target_os, "Linux");
        assert_eq!(r.target_arch, "armv6");
        assert_eq!(r.compiler_version.as_deref(), Some("12"));
        assert_eq!(r.custom_vendor_hint.as_deref(), Some("rpi"));
    }

    #[test]
    fn empty_fields_are_unset() {
        let r: TargetRequest = toml::from_str(
            r#"
arch = "armv7hf"
compiler = "gcc"
compiler-version = ""
libcxx = ""
toolchain-cpu = ""
toolchain-vendor = ""
"#,
        )
        .unwrap();
        assert_eq!(r.custom_cpu_hint, None);
        assert_eq!(r.custom_vendor_hint, None);
        assert_eq!(r.compiler_version, None);
        assert_eq!(r.libcxx_kind, None);
        let triplet = crate::resolver::resolve_triplet(&r).unwrap();
        assert_eq!(triplet.to_string(), "armv7-neon-linux-gnueabihf");

        // Both constructors agree on the same input.
        let s = Settings::parse_assignments([
            "arch=armv7hf",
            "compiler=gcc",
            "compiler.version=",
            "compiler.libcxx=",
            "arch.toolchain-cpu=",
            "os.toolchain-vendor=",
        ])
        .unwrap();
        assert_eq!(TargetRequest::from_settings(&s).unwrap(), r);
    }
}
