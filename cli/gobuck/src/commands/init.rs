//! `gobuck init` — write a starter `gobuck.toml`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{GobuckManifest, MANIFEST_NAME};

/// Write a template manifest into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(MANIFEST_NAME);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    fs::write(&path, GobuckManifest::template())
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}
