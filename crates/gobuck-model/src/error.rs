//! Error types for descriptor loading.

use std::path::PathBuf;

/// Errors that can occur while reading target descriptors.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// JSON deserialization error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error reading a descriptor file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Descriptor file not found.
    #[error("descriptor file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Descriptor file extension is neither `.json` nor `.toml`.
    #[error("unsupported descriptor format: {} (expected .json or .toml)", path.display())]
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
