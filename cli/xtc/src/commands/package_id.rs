//! `xtc package-id`: settings that select the toolchain package.

use anyhow::Result;
use xtc_resolve::PackageIdentity;

use super::{Format, Invocation};

/// Print the reduced settings and their digest.
pub fn run(inv: &Invocation, format: Format) -> Result<()> {
    let identity = PackageIdentity::from_settings(&inv.settings)?;
    let out = match format {
        Format::Text => render(&identity),
        _ => format.render(&identity)?,
    };
    print!("{out}");
    Ok(())
}

pub fn render(identity: &PackageIdentity) -> String {
    let mut out = String::new();
    for (k, v) in identity.settings.iter() {
        out.push_str(&format!("{k}={v}\n"));
    }
    out.push_str(&format!("package-id: {}\n", identity.digest));
    out
}
