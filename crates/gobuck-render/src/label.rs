//! Import path to build label rewriting.

/// Build the label of a vendored package from its import path.
///
/// The prefix is joined to the import path (with a `/` unless the prefix
/// already ends in one), and the last path segment becomes the target name:
/// `("//third-party/go/vendor", "github.com/x/foo")` gives
/// `//third-party/go/vendor/github.com/x/foo:foo`.
pub fn target_label(prefix: &str, import_path: &str) -> String {
    let import_path = import_path.trim_matches('/');
    let name = import_path.rsplit('/').next().unwrap_or(import_path);
    if prefix.is_empty() || prefix.ends_with('/') {
        format!("{prefix}{import_path}:{name}")
    } else {
        format!("{prefix}/{import_path}:{name}")
    }
}

/// Label for a dependency entry.
///
/// With no prefix configured the entry is already a label and passes through.
pub fn dep_label(prefix: Option<&str>, dep: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => target_label(prefix, dep),
        _ => dep.to_string(),
    }
}
