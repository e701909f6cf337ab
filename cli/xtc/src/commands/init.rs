//! `xtc init`: write a starter `xtc.toml`.

use std::path::Path;

use anyhow::{bail, Result};

use crate::config::{XtcConfig, CONFIG_FILE};

/// Create `xtc.toml` in `dir`, refusing to overwrite an existing one.
pub fn run(dir: &Path) -> Result<()> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    std::fs::write(&path, XtcConfig::template())?;
    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_once() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();
        let (config, _) = XtcConfig::find_and_load(dir.path()).unwrap().unwrap();
        assert!(config.catalog.is_some());
        assert!(run(dir.path()).is_err());
    }
}
