//! `gobuck render` — write BUCK files for every descriptor.

use std::path::Path;

use anyhow::{Context, Result};
use gobuck_render::{render_buck_files, RenderReport};

use crate::commands::load_inputs;
use crate::manifest::GobuckManifest;

/// Render all descriptors into the vendor tree.
///
/// Only file-creation failures make this return an error; per-target render
/// failures are logged and listed in the printed report.
pub fn run(
    project_dir: &Path,
    manifest: &GobuckManifest,
    targets: Option<&Path>,
    third_party_dir: Option<&Path>,
) -> Result<RenderReport> {
    let inputs = load_inputs(project_dir, manifest, targets, third_party_dir)?;
    let report = render_buck_files(&manifest.buck, &inputs.third_party_dir, &inputs.targets)
        .context("rendering BUCK files")?;
    print!("{report}");
    Ok(report)
}
