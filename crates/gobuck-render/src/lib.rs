//! BUCK file rendering for vendored Go packages.
//!
//! Turns resolved target descriptors into Buck build rules: picks the binary or
//! library rule shape, builds platform-conditional `select` expressions for
//! dependencies and compatibility, and writes one file per target under
//! `<third-party-dir>/vendor/<import-path>/`.
//!
//! Rendering is deterministic: set-valued inputs are sorted before emission
//! and order-significant inputs are emitted as given.

pub mod config;
pub mod emit;
pub mod error;
pub mod label;
pub mod report;
pub mod rule;
pub mod starlark;

pub use config::{BuckConfig, EmbedSrcs, RuleShape};
pub use emit::{buck_file_path, check_buck_files, render_buck_files};
pub use error::{EmitError, RenderError};
pub use label::{dep_label, target_label};
pub use report::{CheckReport, RenderFailure, RenderReport};
pub use rule::{compatibility_expr, deps_expr, render_target, render_target_to_string};
pub use starlark::{Expr, Select, StarlarkWriter};
