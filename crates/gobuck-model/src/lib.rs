//! Target descriptor model for gobuck.
//!
//! A descriptor describes one vendored Go package after dependency resolution:
//! its identity, its unconditional and per-platform dependencies, the files it
//! embeds, and the platforms it is compatible with. Descriptors are produced by
//! an external resolver and only read here.

pub mod error;
pub mod parse;
pub mod target;

pub use error::{ModelError, Result};
pub use parse::{find_target, load_targets, parse_targets_json, parse_targets_toml};
pub use target::{BuckTarget, Compatibility, PlatformDeps, RuleKind};
