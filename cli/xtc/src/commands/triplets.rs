//! `xtc triplets`: the fixed target tables.

use anyhow::Result;
use xtc_targets::{metadata, resolve_triplet, tables};

/// Print default triplets per architecture and the metadata table.
pub fn run() -> Result<()> {
    print!("{}", render());
    Ok(())
}

pub fn render() -> String {
    let mut out = String::from("Default triplets:\n");
    for (arch, _) in tables::DEFAULT_CPU {
        // Every arch in the table has a default CPU and vendor.
        if let Ok(t) = resolve_triplet(arch, None, None) {
            out.push_str(&format!("  {arch:<10} {t}\n"));
        }
    }
    out.push_str("\nPublished triplets:\n");
    for (name, meta) in metadata::TRIPLET_METADATA {
        out.push_str(&format!(
            "  {name:<30} {:<8} {}-bit\n",
            meta.processor, meta.bitness
        ));
    }
    out.push_str(&format!(
        "\nVendors: {}\n",
        tables::KNOWN_VENDORS.join(", ")
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_defaults_and_metadata() {
        let text = render();
        assert!(text.contains("armv7hf    armv7-neon-linux-gnueabihf"));
        assert!(text.contains("armv6-rpi-linux-gnueabihf"));
        assert!(text.contains("centos7"));
        assert!(run().is_ok());
    }
}
