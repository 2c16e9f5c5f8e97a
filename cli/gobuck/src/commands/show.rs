//! `gobuck show` — print one target's BUCK file without writing it.

use std::path::Path;

use anyhow::{Context, Result};
use gobuck_model::find_target;
use gobuck_render::{buck_file_path, render_target_to_string};

use crate::commands::load_inputs;
use crate::manifest::GobuckManifest;

/// Render the target with the given import path to a string.
pub fn render_one(
    project_dir: &Path,
    manifest: &GobuckManifest,
    import_path: &str,
    targets: Option<&Path>,
) -> Result<String> {
    let inputs = load_inputs(project_dir, manifest, targets, None)?;
    let target = find_target(&inputs.targets, import_path)
        .with_context(|| format!("no target with import path '{import_path}'"))?;
    tracing::debug!(
        path = %buck_file_path(&inputs.third_party_dir, import_path, &manifest.buck.buildfile_name).display(),
        kind = target.rule_kind().name(),
        "rendering to stdout"
    );
    render_target_to_string(&manifest.buck, target)
        .with_context(|| format!("rendering {import_path}"))
}

/// Print the rendered target to stdout.
pub fn run(
    project_dir: &Path,
    manifest: &GobuckManifest,
    import_path: &str,
    targets: Option<&Path>,
) -> Result<()> {
    print!("{}", render_one(project_dir, manifest, import_path, targets)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;

    #[test]
    fn show_known_target() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = fixtures::project(dir.path());
        let text = render_one(dir.path(), &manifest, "github.com/x/cmd", None).unwrap();
        assert!(text.contains("go_binary(\n    name = \"cmd\","));
        assert!(!dir.path().join("third-party/go/vendor/github.com/x/cmd/BUCK").exists());
    }

    #[test]
    fn show_unknown_target() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = fixtures::project(dir.path());
        let err = render_one(dir.path(), &manifest, "github.com/x/nope", None).unwrap_err();
        assert!(err.to_string().contains("no target with import path"));
    }

    #[test]
    fn show_surfaces_render_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = fixtures::project(dir.path());
        manifest.buck.library_rule.clear();
        let err = render_one(dir.path(), &manifest, "github.com/x/bar", None).unwrap_err();
        assert!(format!("{err:#}").contains("library-rule"));
    }
}
