//! Renderer configuration.
//!
//! A [`BuckConfig`] is built once (usually from the `[buck]` table of
//! `gobuck.toml`) and passed by reference into every render call. Nothing in
//! the renderer mutates it.

use gobuck_model::RuleKind;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// When to emit the `embed_srcs` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbedSrcs {
    /// Never emit it.
    #[default]
    Off,
    /// Emit it when the target embeds at least one file.
    WhenPresent,
    /// Always emit it, as an empty list if need be.
    Always,
}

impl EmbedSrcs {
    /// Whether the attribute is emitted for the given embed list.
    pub fn emits(&self, embed_files: &[String]) -> bool {
        match self {
            EmbedSrcs::Off => false,
            EmbedSrcs::WhenPresent => !embed_files.is_empty(),
            EmbedSrcs::Always => true,
        }
    }
}

/// Load statement and rule name for one rule kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleShape<'a> {
    /// Emitted verbatim before the rule invocation.
    pub load: &'a str,
    /// Rule invocation name.
    pub rule: &'a str,
}

/// Build-rule primitives and load statements the renderer emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuckConfig {
    /// Text prepended verbatim to every generated file.
    #[serde(default)]
    pub preamble: String,
    /// Load statement for binary targets.
    #[serde(default)]
    pub load_binary_rule: String,
    /// Load statement for library targets.
    #[serde(default)]
    pub load_library_rule: String,
    /// Rule name for binary targets.
    #[serde(default = "default_binary_rule")]
    pub binary_rule: String,
    /// Rule name for library targets.
    #[serde(default = "default_library_rule")]
    pub library_rule: String,
    /// Attribute that carries dependencies.
    #[serde(default = "default_deps_attr")]
    pub deps_attr: String,
    /// Prefix used to turn a dependency import path into a label.
    #[serde(default)]
    pub deps_target_label_prefix: Option<String>,
    /// `embed_srcs` policy.
    #[serde(default)]
    pub embed_srcs: EmbedSrcs,
    /// Name of the generated file in each package directory.
    #[serde(default = "default_buildfile_name")]
    pub buildfile_name: String,
}

fn default_binary_rule() -> String {
    "go_binary".to_string()
}

fn default_library_rule() -> String {
    "go_library".to_string()
}

fn default_deps_attr() -> String {
    "deps".to_string()
}

fn default_buildfile_name() -> String {
    "BUCK".to_string()
}

impl Default for BuckConfig {
    fn default() -> Self {
        Self {
            preamble: String::new(),
            load_binary_rule: String::new(),
            load_library_rule: String::new(),
            binary_rule: default_binary_rule(),
            library_rule: default_library_rule(),
            deps_attr: default_deps_attr(),
            deps_target_label_prefix: None,
            embed_srcs: EmbedSrcs::default(),
            buildfile_name: default_buildfile_name(),
        }
    }
}

impl BuckConfig {
    /// Load statement and rule name for a rule kind.
    ///
    /// Fails when the rule name is empty; an empty load statement is allowed
    /// for rules the build system provides natively.
    pub fn rule_shape(&self, kind: RuleKind) -> Result<RuleShape<'_>, RenderError> {
        let (load, rule, field) = match kind {
            RuleKind::Binary => (&self.load_binary_rule, &self.binary_rule, "binary-rule"),
            RuleKind::Library => (&self.load_library_rule, &self.library_rule, "library-rule"),
        };
        if rule.trim().is_empty() {
            return Err(RenderError::MissingConfig {
                field: field.to_string(),
            });
        }
        Ok(RuleShape { load, rule })
    }

    /// The configured label prefix, if any.
    pub fn label_prefix(&self) -> Option<&str> {
        self.deps_target_label_prefix
            .as_deref()
            .filter(|prefix| !prefix.is_empty())
    }
}
