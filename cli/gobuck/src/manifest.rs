//! `gobuck.toml` parsing and path resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gobuck_render::BuckConfig;
use serde::{Deserialize, Serialize};

/// File name searched for when locating the project configuration.
pub const MANIFEST_NAME: &str = "gobuck.toml";

/// The top-level `gobuck.toml` structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GobuckManifest {
    /// Rule primitives and load statements.
    #[serde(default)]
    pub buck: BuckConfig,
    /// Where the vendor tree and descriptor file live.
    #[serde(default)]
    pub vendor: VendorConfig,
}

/// `[vendor]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VendorConfig {
    /// Directory holding `vendor/`, relative to the manifest.
    #[serde(default = "default_third_party_dir")]
    pub third_party_dir: String,
    /// Descriptor file written by the resolver, relative to the manifest.
    /// Defaults to `<third-party-dir>/targets.json`.
    #[serde(default)]
    pub targets: Option<String>,
}

fn default_third_party_dir() -> String {
    "third-party/go".to_string()
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            third_party_dir: default_third_party_dir(),
            targets: None,
        }
    }
}

impl GobuckManifest {
    /// Search upward from `start_dir` for a `gobuck.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_NAME);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: GobuckManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                tracing::debug!(path = %candidate.display(), "loaded manifest");
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing gobuck.toml")
    }

    /// Absolute third-party directory for a manifest found in `project_dir`.
    pub fn third_party_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vendor.third_party_dir)
    }

    /// Absolute descriptor file path for a manifest found in `project_dir`.
    pub fn targets_path(&self, project_dir: &Path) -> PathBuf {
        match &self.vendor.targets {
            Some(targets) => project_dir.join(targets),
            None => self.third_party_dir(project_dir).join("targets.json"),
        }
    }

    /// Generate the default template for `gobuck init`.
    pub fn template() -> String {
        r##"[buck]
preamble = "# @generated by gobuck. Do not edit.\n\n"
load-binary-rule = ""
load-library-rule = ""
binary-rule = "go_binary"
library-rule = "go_library"
deps-attr = "deps"
deps-target-label-prefix = "//third-party/go/vendor"
embed-srcs = "when-present"

[vendor]
third-party-dir = "third-party/go"
# targets = "third-party/go/targets.json"
"##
        .to_string()
    }
}
