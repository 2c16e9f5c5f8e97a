//! CLI command implementations.

pub mod check;
pub mod init;
pub mod render;
pub mod show;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gobuck_model::{load_targets, BuckTarget};

use crate::manifest::GobuckManifest;

/// Descriptor batch and output location for a command run.
pub struct Inputs {
    pub third_party_dir: PathBuf,
    pub targets: Vec<BuckTarget>,
}

/// Resolve paths from the manifest (or command-line overrides) and load descriptors.
pub fn load_inputs(
    project_dir: &Path,
    manifest: &GobuckManifest,
    targets_override: Option<&Path>,
    third_party_override: Option<&Path>,
) -> Result<Inputs> {
    let third_party_dir = third_party_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest.third_party_dir(project_dir));
    let targets_path = targets_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest.targets_path(project_dir));

    let targets = load_targets(&targets_path)
        .with_context(|| format!("loading targets from {}", targets_path.display()))?;
    tracing::info!(
        count = targets.len(),
        path = %targets_path.display(),
        "loaded target descriptors"
    );

    Ok(Inputs {
        third_party_dir,
        targets,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::fs;
    use std::path::Path;

    use crate::manifest::GobuckManifest;

    pub const TARGETS_JSON: &str = r#"[
  {
    "name": "foo",
    "import-path": "github.com/x/foo",
    "common-deps": ["github.com/x/bar"],
    "platform-deps": { "linux": { "amd64": ["golang.org/x/sys/unix"] } }
  },
  { "name": "bar", "import-path": "github.com/x/bar" },
  { "name": "cmd", "import-path": "github.com/x/cmd", "is-binary": true }
]"#;

    /// A project with a manifest, a descriptor file and the vendor directories.
    pub fn project(root: &Path) -> GobuckManifest {
        fs::write(root.join("gobuck.toml"), GobuckManifest::template()).unwrap();
        let manifest = GobuckManifest::from_str(&GobuckManifest::template()).unwrap();
        let third_party = manifest.third_party_dir(root);
        for pkg in ["github.com/x/foo", "github.com/x/bar", "github.com/x/cmd"] {
            fs::create_dir_all(third_party.join("vendor").join(pkg)).unwrap();
        }
        fs::write(manifest.targets_path(root), TARGETS_JSON).unwrap();
        manifest
    }
}
