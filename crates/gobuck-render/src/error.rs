//! Rendering errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a single target from rendering.
///
/// These never abort a batch: the emission loop logs them and moves on.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("missing required config field: {field}")]
    MissingConfig { field: String },

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a whole batch.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("can't create BUCK file {}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
