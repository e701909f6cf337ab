//! Compiler-specific validation rules.
//!
//! The toolchain serves three compiler families. gcc uses the toolchain's own
//! compilers, so its version *is* the toolchain version. clang and intel-cc only
//! borrow the toolchain's libstdc++, sysroot and binutils; their toolchain
//! version comes from the separate `compiler.libcxx.gcc_version` setting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};
use crate::request::TargetRequest;

/// Standard libraries clang/intel-cc may use with a GCC toolchain.
pub const ACCEPTED_LIBCXX: &[&str] = &["libstdc++11", "libstdc++"];

/// The only supported Intel compiler mode.
pub const INTEL_MODE: &str = "icx";

/// A supported compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerKind {
    Gcc,
    Clang,
    IntelCc,
}

impl CompilerKind {
    /// Settings name of the compiler.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerKind::Gcc => "gcc",
            CompilerKind::Clang => "clang",
            CompilerKind::IntelCc => "intel-cc",
        }
    }

    /// Whether the compiler drives a GCC toolchain it did not come with.
    pub fn uses_gcc_toolchain(&self) -> bool {
        match self {
            CompilerKind::Gcc => false,
            CompilerKind::Clang | CompilerKind::IntelCc => true,
        }
    }

    /// Compiler-specific checks that need no catalog.
    pub fn validate(&self, request: &TargetRequest) -> Result<()> {
        match self {
            CompilerKind::Gcc => Ok(()),
            CompilerKind::Clang => validate_libcxx(request),
            CompilerKind::IntelCc => {
                if request.compiler_mode.as_deref() != Some(INTEL_MODE) {
                    return Err(ResolveError::UnsupportedCompilerMode {
                        mode: request.compiler_mode.clone(),
                        expected: INTEL_MODE.to_string(),
                    });
                }
                validate_libcxx(request)
            }
        }
    }

    /// The GCC version hint for this compiler, if any.
    pub fn toolchain_version_hint<'r>(&self, request: &'r TargetRequest) -> Option<&'r str> {
        match self {
            CompilerKind::Gcc => request.compiler_version.as_deref(),
            CompilerKind::Clang | CompilerKind::IntelCc => request.libcxx_gcc_version.as_deref(),
        }
    }
}

fn validate_libcxx(request: &TargetRequest) -> Result<()> {
    match request.libcxx_kind.as_deref() {
        Some(libcxx) if ACCEPTED_LIBCXX.contains(&libcxx) => Ok(()),
        _ => Err(ResolveError::UnsupportedStandardLibrary {
            libcxx: request.libcxx_kind.clone(),
            accepted: ACCEPTED_LIBCXX.iter().map(|s| s.to_string()).collect(),
        }),
    }
}

impl FromStr for CompilerKind {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gcc" => Ok(CompilerKind::Gcc),
            "clang" => Ok(CompilerKind::Clang),
            "intel-cc" => Ok(CompilerKind::IntelCc),
            other => Err(ResolveError::UnsupportedCompiler {
                compiler: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CompilerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(compiler: &str) -> TargetRequest {
        let mut r = TargetRequest::new("x86_64", compiler);
        r.compiler_version = Some("17".into());
        r.libcxx_gcc_version = Some("13".into());
        r
    }

    #[test]
    fn parse_names() {
        for kind in [CompilerKind::Gcc, CompilerKind::Clang, CompilerKind::IntelCc] {
            assert_eq!(kind.as_str().parse::<CompilerKind>().unwrap(), kind);
        }
        assert!(matches!(
            "msvc".parse::<CompilerKind>(),
            Err(ResolveError::UnsupportedCompiler { .. })
        ));
    }

    #[test]
    fn gcc_needs_nothing_else() {
        let r = request("gcc");
        assert!(CompilerKind::Gcc.validate(&r).is_ok());
        assert_eq!(CompilerKind::Gcc.toolchain_version_hint(&r), Some("17"));
    }

    #[test]
    fn clang_requires_libstdcxx() {
        let mut r = request("clang");
        assert!(matches!(
            CompilerKind::Clang.validate(&r),
            Err(ResolveError::UnsupportedStandardLibrary { libcxx: None, .. })
        ));
        r.libcxx_kind = Some("libc++".into());
        let err = CompilerKind::Clang.validate(&r).unwrap_err();
        assert!(err.to_string().contains("libstdc++11 or libstdc++"));
        for ok in ACCEPTED_LIBCXX {
            r.libcxx_kind = Some(ok.to_string());
            assert!(CompilerKind::Clang.validate(&r).is_ok());
        }
        assert_eq!(CompilerKind::Clang.toolchain_version_hint(&r), Some("13"));
    }

    #[test]
    fn intel_requires_icx_mode_first() {
        let mut r = request("intel-cc");
        r.libcxx_kind = Some("libc++".into());
        assert!(matches!(
            CompilerKind::IntelCc.validate(&r),
            Err(ResolveError::UnsupportedCompilerMode { .. })
        ));
        r.compiler_mode = Some("icx".into());
        assert!(matches!(
            CompilerKind::IntelCc.validate(&r),
            Err(ResolveError::UnsupportedStandardLibrary { .. })
        ));
        r.libcxx_kind = Some("libstdc++".into());
        assert!(CompilerKind::IntelCc.validate(&r).is_ok());
    }
}
