//! `xtc verify`: check a downloaded archive against the catalog.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::Invocation;

/// Resolve the configured request and check `archive` against its checksum.
pub fn run(inv: &Invocation, archive: &Path) -> Result<()> {
    let catalog = inv.catalog()?;
    let resolved = inv.resolver(&catalog).resolve(&inv.request()?)?;
    resolved
        .artifact
        .verify_file(archive)
        .with_context(|| format!("verifying {} for {}", archive.display(), resolved.triplet))?;
    info!(archive = %archive.display(), triplet = %resolved.triplet, "checksum OK");
    println!("{}: OK ({})", archive.display(), resolved.artifact.sha256);
    Ok(())
}
