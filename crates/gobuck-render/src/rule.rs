//! Rendering one target descriptor into BUCK file text.

use std::collections::BTreeSet;
use std::io::Write;

use gobuck_model::{BuckTarget, Compatibility};

use crate::config::BuckConfig;
use crate::error::RenderError;
use crate::label::dep_label;
use crate::starlark::{Expr, Select, StarlarkWriter};

/// Source files picked up from the package directory.
pub const SRCS_GLOB: &str = r#"native.glob(["*.go", "*.s", "*.h", "*.c", "*.cc", "*.cpp", "*.S"])"#;

/// Constraint that never matches; marks a platform as incompatible.
pub const INCOMPATIBLE: &str = "config//:none";

/// Render `target` as a complete BUCK file into `out`.
///
/// Output is written as it is produced, so an error part-way through leaves
/// whatever was already written in the sink.
pub fn render_target<W: Write>(
    config: &BuckConfig,
    target: &BuckTarget,
    out: W,
) -> Result<(), RenderError> {
    let mut w = StarlarkWriter::new(out);
    w.raw(&config.preamble)?;

    let shape = config.rule_shape(target.rule_kind())?;
    w.raw(shape.load)?;
    w.open_call(shape.rule)?;
    w.attr("name", &Expr::str(&target.name))?;
    w.attr("package_name", &Expr::str(&target.import_path))?;
    w.attr("srcs", &Expr::raw(SRCS_GLOB))?;
    w.attr("header_namespace", &Expr::str(""))?;

    if let Some(deps) = deps_expr(config, target) {
        if config.deps_attr.trim().is_empty() {
            return Err(RenderError::MissingConfig {
                field: "deps-attr".to_string(),
            });
        }
        w.attr(&config.deps_attr, &deps)?;
    }

    if config.embed_srcs.emits(&target.embed_files) {
        // Embed order is kept as given; it can matter to the consumer.
        w.attr("embed_srcs", &Expr::List(target.embed_files.clone()))?;
    }

    if let Some(compat) = compatibility_expr(&target.target_compatible_with) {
        w.attr("target_compatible_with", &compat)?;
    }

    w.attr("visibility", &Expr::InlineList(vec!["PUBLIC".to_string()]))?;
    w.close_call()?;
    w.flush()?;
    Ok(())
}

/// Render `target` into a string.
pub fn render_target_to_string(
    config: &BuckConfig,
    target: &BuckTarget,
) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    render_target(config, target, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// The dependency attribute value, or `None` when the target has no deps.
///
/// Common deps keep their input order with exact repeats dropped. Platform
/// deps become a two-level `select` keyed by OS then architecture; keys come
/// out of `PlatformDeps` in sorted order and each leaf is a sorted set.
/// Labels are rewritten after ordering, and entries that only collide after
/// rewriting are left as they are.
pub fn deps_expr(config: &BuckConfig, target: &BuckTarget) -> Option<Expr> {
    if !target.has_deps() {
        return None;
    }
    let prefix = config.label_prefix();

    let mut seen = BTreeSet::new();
    let common: Vec<String> = target
        .common_deps
        .iter()
        .map(String::as_str)
        .filter(|dep| seen.insert(*dep))
        .map(|dep| dep_label(prefix, dep))
        .collect();
    let common = Expr::List(common);

    if target.platform_deps.is_empty() {
        return Some(common);
    }

    let mut by_os = Select::new(Expr::InlineList(Vec::new()));
    for (os, archs) in target.platform_deps.iter() {
        let mut by_arch = Select::new(Expr::InlineList(Vec::new()));
        for arch in archs.keys() {
            let deps = target
                .platform_deps
                .deps_for(os, arch)
                .into_iter()
                .map(|dep| dep_label(prefix, dep))
                .collect();
            by_arch.arm(arch.as_str(), Expr::List(deps));
        }
        by_os.arm(os.as_str(), Expr::Select(by_arch));
    }

    Some(Expr::concat(common, Expr::Select(by_os)))
}

/// The `target_compatible_with` value, or `None` when unrestricted.
///
/// OS keys are sorted; architectures keep the order the resolver gave.
pub fn compatibility_expr(compat: &Compatibility) -> Option<Expr> {
    if compat.is_unrestricted() {
        return None;
    }
    let incompatible = || Expr::InlineList(vec![INCOMPATIBLE.to_string()]);

    let mut by_os = Select::new(incompatible());
    for (os, archs) in compat.iter() {
        let mut by_arch = Select::new(incompatible());
        for arch in archs {
            by_arch.arm(arch.as_str(), Expr::InlineList(Vec::new()));
        }
        by_os.arm(os.as_str(), Expr::Select(by_arch));
    }
    Some(Expr::Select(by_os))
}
