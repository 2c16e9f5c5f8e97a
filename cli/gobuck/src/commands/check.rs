//! `gobuck check` — verify BUCK files on disk match what would be rendered.

use std::path::Path;

use anyhow::{bail, Result};
use gobuck_render::check_buck_files;

use crate::commands::load_inputs;
use crate::manifest::GobuckManifest;

/// Fail if any BUCK file is stale, missing, or cannot be rendered.
pub fn run(
    project_dir: &Path,
    manifest: &GobuckManifest,
    targets: Option<&Path>,
    third_party_dir: Option<&Path>,
) -> Result<()> {
    let inputs = load_inputs(project_dir, manifest, targets, third_party_dir)?;
    let report = check_buck_files(&manifest.buck, &inputs.third_party_dir, &inputs.targets);
    print!("{report}");
    if !report.is_clean() {
        bail!("BUCK files are out of date (run `gobuck render`)");
    }
    Ok(())
}
