//! Loading target descriptors from resolver output.
//!
//! The resolver hands over its finalized batch either as a JSON array of
//! descriptors (`targets.json`) or as a TOML file of `[[target]]` tables
//! (`targets.toml`). Order in the file is the order the batch is rendered in.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ModelError, Result};
use crate::target::BuckTarget;

#[derive(Debug, Default, Deserialize)]
struct TargetsToml {
    #[serde(default, rename = "target")]
    targets: Vec<BuckTarget>,
}

/// Load descriptors from a `.json` or `.toml` file.
pub fn load_targets(path: &Path) -> Result<Vec<BuckTarget>> {
    if !path.exists() {
        return Err(ModelError::NotFound {
            path: path.to_path_buf(),
        });
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_targets_json(&std::fs::read_to_string(path)?),
        Some("toml") => parse_targets_toml(&std::fs::read_to_string(path)?),
        _ => Err(ModelError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Parse descriptors from a JSON array.
pub fn parse_targets_json(json_str: &str) -> Result<Vec<BuckTarget>> {
    let targets: Vec<BuckTarget> = serde_json::from_str(json_str)?;
    Ok(targets)
}

/// Parse descriptors from TOML `[[target]]` tables.
pub fn parse_targets_toml(toml_str: &str) -> Result<Vec<BuckTarget>> {
    let file: TargetsToml = toml::from_str(toml_str)?;
    Ok(file.targets)
}

/// Find a descriptor by import path.
pub fn find_target<'a>(targets: &'a [BuckTarget], import_path: &str) -> Option<&'a BuckTarget> {
    targets.iter().find(|t| t.import_path == import_path)
}
