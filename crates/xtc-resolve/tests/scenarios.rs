//! End-to-end resolution scenarios.

use std::path::PathBuf;

use xtc_catalog::{Catalog, CatalogError};
use xtc_resolve::{
    derive_flags, BuildConfiguration, PackageIdentity, ResolveError, Resolver, Settings,
    TargetRequest,
};
use xtc_targets::metadata;

const HASH: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

fn catalog_toml(releases: &[(&str, Vec<&str>)]) -> String {
    let mut out = String::new();
    for (version, triplets) in releases {
        out.push_str(&format!("[[release]]\ngcc-version = \"{version}\"\n\n"));
        for t in triplets {
            out.push_str(&format!(
                "[[release.artifact]]\nhost = \"Linux-x86_64\"\ntriplet = \"{t}\"\n\
                 url = \"https://example.org/x-tools-{t}-gcc{version}.tar.xz\"\nsha256 = \"{HASH}\"\n\n"
            ));
        }
    }
    out
}

#[test]
fn clang_x86_64_single_release() {
    let catalog =
        Catalog::parse_toml(&catalog_toml(&[("12.2.0", vec!["x86_64-bionic-linux-gnu"])])).unwrap();
    let mut request = TargetRequest::new("x86_64", "clang");
    request.compiler_version = Some("15".into());
    request.libcxx_kind = Some("libstdc++11".into());

    let resolved = Resolver::new(&catalog)
        .with_install_root("/pkg")
        .resolve(&request)
        .unwrap();
    assert_eq!(resolved.triplet.to_string(), "x86_64-bionic-linux-gnu");
    assert_eq!(resolved.gcc_version.as_str(), "12.2.0");
    assert_eq!(resolved.processor, "x86_64");
    assert_eq!(resolved.bitness, 64);

    let flags = derive_flags(&resolved).unwrap();
    assert_eq!(
        flags.cflags,
        [
            "--gcc-toolchain=/pkg/x86_64-bionic-linux-gnu",
            "--gcc-triple=x86_64-bionic-linux-gnu"
        ]
    );

    let config = BuildConfiguration::new(&resolved, &flags);
    assert_eq!(
        config.variable("tools.build:sysroot"),
        Some("/pkg/x86_64-bionic-linux-gnu/x86_64-bionic-linux-gnu/sysroot")
    );
    assert_eq!(
        config.variable("tools.cmake.cmaketoolchain:system_processor"),
        Some("x86_64")
    );
}

#[test]
fn clang_with_libcxx_fails_before_catalog_lookup() {
    let catalog =
        Catalog::parse_toml(&catalog_toml(&[("12.2.0", vec!["x86_64-bionic-linux-gnu"])])).unwrap();
    let mut request = TargetRequest::new("x86_64", "clang");
    request.libcxx_kind = Some("libc++".into());
    // A GCC version the catalog does not have would fail later; it must not be reached.
    request.libcxx_gcc_version = Some("7".into());
    let err = Resolver::new(&catalog).resolve(&request).unwrap_err();
    assert!(matches!(err, ResolveError::UnsupportedStandardLibrary { .. }));
}

#[test]
fn every_default_arch_resolves_to_a_published_triplet() {
    let all: Vec<&str> = metadata::known_triplets().collect();
    let catalog = Catalog::parse_toml(&catalog_toml(&[("14.2.0", all)])).unwrap();
    let cases = [
        ("x86_64", "x86_64-bionic-linux-gnu", "x86_64", 64),
        ("armv8", "aarch64-rpi3-linux-gnu", "aarch64", 64),
        ("armv7hf", "armv7-neon-linux-gnueabihf", "armv7l", 32),
        ("armv6", "armv6-rpi-linux-gnueabihf", "armv6l", 32),
    ];
    for (arch, triplet, processor, bitness) in cases {
        let resolved = Resolver::new(&catalog)
            .resolve(&TargetRequest::new(arch, "gcc"))
            .unwrap();
        assert_eq!(resolved.triplet.to_string(), triplet);
        assert_eq!(resolved.processor, processor);
        assert_eq!(resolved.bitness, bitness);
    }
}

#[test]
fn settings_driven_gcc_resolution() {
    let catalog = Catalog::parse_toml(&catalog_toml(&[
        ("11.2.0", vec!["armv8-rpi3-linux-gnueabihf"]),
        ("11.3.0", vec!["armv8-rpi3-linux-gnueabihf"]),
        ("13.2.0", vec!["armv8-rpi3-linux-gnueabihf"]),
    ]))
    .unwrap();
    let settings = Settings::parse_assignments([
        "os=Linux",
        "arch=armv7hf",
        "arch.toolchain-cpu=armv8",
        "compiler=gcc",
        "compiler.version=11",
        "build_type=Release",
    ])
    .unwrap();
    let request = TargetRequest::from_settings(&settings).unwrap();
    let resolved = Resolver::new(&catalog)
        .with_install_root("/pkg")
        .resolve(&request)
        .unwrap();
    // First "11.x" in catalog order, not the newest one.
    assert_eq!(resolved.gcc_version.as_str(), "11.2.0");
    assert_eq!(resolved.processor, "armv7l");

    let flags = derive_flags(&resolved).unwrap();
    let config = BuildConfiguration::new(&resolved, &flags);
    assert_eq!(
        config.variable("tools.build:compiler_executables.c"),
        Some("armv8-rpi3-linux-gnueabihf-gcc")
    );
    assert_eq!(config.path, [PathBuf::from("/pkg/armv8-rpi3-linux-gnueabihf/bin")]);

    let identity = PackageIdentity::from_settings(&settings).unwrap();
    assert_eq!(identity.settings.get("build_type"), None);
}

#[test]
fn unknown_version_lists_catalog() {
    let catalog = Catalog::parse_toml(&catalog_toml(&[
        ("12.4.0", vec!["x86_64-bionic-linux-gnu"]),
        ("13.3.0", vec!["x86_64-bionic-linux-gnu"]),
    ]))
    .unwrap();
    let mut request = TargetRequest::new("x86_64", "gcc");
    request.compiler_version = Some("9".into());
    let err = Resolver::new(&catalog).resolve(&request).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::Catalog(CatalogError::UnsupportedToolchainVersion { .. })
    ));
    assert!(err.to_string().contains("12.4.0, 13.3.0"));
}

#[test]
fn new_clang_against_extracted_toolchain() {
    let dir = tempfile::tempdir().unwrap();
    let triplet = "aarch64-rpi3-linux-gnu";
    let install_dir = dir
        .path()
        .join(triplet)
        .join("lib/gcc")
        .join(triplet)
        .join("14.2.0");
    std::fs::create_dir_all(&install_dir).unwrap();

    let catalog = Catalog::parse_toml(&catalog_toml(&[("14.2.0", vec![triplet])])).unwrap();
    let mut request = TargetRequest::new("armv8", "clang");
    request.compiler_version = Some("18.1.3".into());
    request.libcxx_kind = Some("libstdc++11".into());
    request.libcxx_gcc_version = Some("14".into());

    let resolved = Resolver::new(&catalog)
        .with_install_root(dir.path())
        .resolve(&request)
        .unwrap();
    let flags = derive_flags(&resolved).unwrap();
    assert_eq!(
        flags.cxxflags,
        [format!("--gcc-install-dir={}", install_dir.display())]
    );
    assert_eq!(flags.sharedlinkflags, [format!("-L{}", install_dir.display())]);
}
