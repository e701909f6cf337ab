//! `xtc versions`: catalog contents.

use anyhow::Result;
use xtc_catalog::Catalog;

use super::Invocation;

/// Print every release in catalog order with its triplets for the host.
pub fn run(inv: &Invocation) -> Result<()> {
    let catalog = inv.catalog()?;
    print!("{}", render(&catalog, &inv.host_platform));
    Ok(())
}

pub fn render(catalog: &Catalog, host: &str) -> String {
    let latest = catalog.max_version();
    let mut out = format!("GCC releases for {host}:\n");
    for release in catalog.releases() {
        let marker = if Some(&release.gcc_version) == latest {
            " (latest)"
        } else {
            ""
        };
        out.push_str(&format!("  {}{marker}\n", release.gcc_version));
        for a in release.artifacts.iter().filter(|a| a.host == host) {
            out.push_str(&format!("    {}\n", a.triplet));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testutil::write_catalog;

    #[test]
    fn marks_latest_in_catalog_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(
            dir.path(),
            &["13.2.0", "14.2.0", "12.4.0"],
            &["aarch64-rpi3-linux-gnu"],
        );
        let catalog = Catalog::load(&path).unwrap();
        let text = render(&catalog, "Linux-x86_64");
        let pos = |s: &str| text.find(s).unwrap();
        assert!(pos("13.2.0") < pos("14.2.0 (latest)"));
        assert!(pos("14.2.0") < pos("12.4.0"));
        assert!(text.contains("    aarch64-rpi3-linux-gnu"));
        // Other hosts list versions but no triplets.
        assert!(!render(&catalog, "Darwin-arm64").contains("aarch64-rpi3"));
    }
}
