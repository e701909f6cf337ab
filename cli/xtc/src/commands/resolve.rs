//! `xtc resolve` and `xtc flags`: toolchain resolution output.

use anyhow::Result;
use xtc_resolve::{derive_flags, BuildConfiguration, ResolvedToolchain};

use super::{Format, Invocation};

/// Resolve the configured request and print the chosen toolchain.
pub fn run(inv: &Invocation, format: Format) -> Result<()> {
    let catalog = inv.catalog()?;
    let resolved = inv.resolver(&catalog).resolve(&inv.request()?)?;
    let out = match format {
        Format::Text => render_resolved(&resolved),
        _ => format.render(&resolved)?,
    };
    print!("{out}");
    Ok(())
}

/// Resolve the configured request and print the build configuration.
pub fn flags(inv: &Invocation, format: Format) -> Result<()> {
    let catalog = inv.catalog()?;
    let resolved = inv.resolver(&catalog).resolve(&inv.request()?)?;
    let flags = derive_flags(&resolved)?;
    let config = BuildConfiguration::new(&resolved, &flags);
    let out = match format {
        Format::Text => render_config(&config),
        _ => format.render(&config)?,
    };
    print!("{out}");
    Ok(())
}

pub fn render_resolved(r: &ResolvedToolchain) -> String {
    let mut out = String::new();
    out.push_str(&format!("Compiler:     {}\n", r.compiler));
    out.push_str(&format!("Triplet:      {}\n", r.triplet));
    out.push_str(&format!("GCC version:  {}\n", r.gcc_version));
    out.push_str(&format!("Processor:    {} ({}-bit)\n", r.processor, r.bitness));
    out.push_str(&format!("Toolchain:    {}\n", r.toolchain_dir().display()));
    out.push_str(&format!("Archive:      {}\n", r.artifact.url));
    out.push_str(&format!("SHA-256:      {}\n", r.artifact.sha256));
    out
}

pub fn render_config(config: &BuildConfiguration) -> String {
    let mut out = String::new();
    if !config.path.is_empty() {
        out.push_str("PATH prepend:\n");
        for p in &config.path {
            out.push_str(&format!("  {}\n", p.display()));
        }
    }
    let lists = [
        ("cflags", &config.cflags),
        ("cxxflags", &config.cxxflags),
        ("exelinkflags", &config.exelinkflags),
        ("sharedlinkflags", &config.sharedlinkflags),
    ];
    for (name, values) in lists {
        if !values.is_empty() {
            out.push_str(&format!("{name}: {}\n", values.join(" ")));
        }
    }
    out.push_str("Variables:\n");
    for (k, v) in &config.variables {
        out.push_str(&format!("  {k} = {v}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testutil::write_catalog;
    use crate::commands::Overrides;

    #[test]
    fn resolve_and_render() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = write_catalog(dir.path(), &["12.2.0"], &["x86_64-bionic-linux-gnu"]);
        let settings = vec![
            "arch=x86_64".to_string(),
            "compiler=clang".to_string(),
            "compiler.version=15".to_string(),
            "compiler.libcxx=libstdc++11".to_string(),
        ];
        let overrides = Overrides {
            catalog: Some(&catalog),
            install_root: Some(dir.path()),
            settings: &settings,
            ..Overrides::default()
        };
        let inv = Invocation::build(dir.path(), None, &overrides).unwrap();

        let c = inv.catalog().unwrap();
        let resolved = inv.resolver(&c).resolve(&inv.request().unwrap()).unwrap();
        let text = render_resolved(&resolved);
        assert!(text.contains("x86_64-bionic-linux-gnu"));
        assert!(text.contains("12.2.0"));
        assert!(text.contains("(64-bit)"));

        let config = BuildConfiguration::new(&resolved, &derive_flags(&resolved).unwrap());
        let text = render_config(&config);
        assert!(text.contains("--gcc-triple=x86_64-bionic-linux-gnu"));
        assert!(text.contains("tools.build:sysroot"));

        run(&inv, Format::Json).unwrap();
        flags(&inv, Format::Toml).unwrap();
    }

    #[test]
    fn resolve_reports_unsupported_libcxx() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = write_catalog(dir.path(), &["12.2.0"], &["x86_64-bionic-linux-gnu"]);
        let settings = vec![
            "arch=x86_64".to_string(),
            "compiler=clang".to_string(),
            "compiler.libcxx=libc++".to_string(),
        ];
        let overrides = Overrides {
            catalog: Some(&catalog),
            settings: &settings,
            ..Overrides::default()
        };
        let inv = Invocation::build(dir.path(), None, &overrides).unwrap();
        let err = run(&inv, Format::Text).unwrap_err();
        assert!(err.to_string().contains("libstdc++11 or libstdc++"));
    }
}
