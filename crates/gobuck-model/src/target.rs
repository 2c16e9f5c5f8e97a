//! Target descriptors.
//!
//! A [`BuckTarget`] is the resolved metadata for one vendored Go package. The
//! resolver that produces it is external; everything here is read-only data
//! plus a handful of lookups the renderer needs.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

/// Which rule shape a target renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// A `main` package, rendered with the binary rule.
    Binary,
    /// Any other package, rendered with the library rule.
    Library,
}

impl RuleKind {
    /// Display name for this rule kind.
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Binary => "binary",
            RuleKind::Library => "library",
        }
    }
}

/// Platform-conditional dependencies: OS -> architecture -> dependencies.
///
/// Keys are held in `BTreeMap`s so iteration is always in sorted key order.
/// The dependency lists are semantically sets; they are stored as given and
/// only sorted/deduplicated when read through [`PlatformDeps::deps_for`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformDeps(BTreeMap<String, BTreeMap<String, Vec<String>>>);

impl PlatformDeps {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one dependency for an (OS, architecture) pair.
    pub fn insert(&mut self, os: impl Into<String>, arch: impl Into<String>, dep: impl Into<String>) {
        self.0
            .entry(os.into())
            .or_default()
            .entry(arch.into())
            .or_default()
            .push(dep.into());
    }

    /// Builder-style [`PlatformDeps::insert`].
    pub fn with(mut self, os: &str, arch: &str, dep: &str) -> Self {
        self.insert(os, arch, dep);
        self
    }

    /// Whether no OS entry exists at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sorted, deduplicated dependencies for an (OS, architecture) pair.
    ///
    /// Absent keys on either axis yield an empty set.
    pub fn deps_for(&self, os: &str, arch: &str) -> BTreeSet<&str> {
        self.0
            .get(os)
            .and_then(|archs| archs.get(arch))
            .map(|deps| deps.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Iterate OS entries in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, Vec<String>>)> {
        self.0.iter()
    }

    /// Every dependency mentioned for any platform, sorted and deduplicated.
    pub fn all_deps(&self) -> BTreeSet<&str> {
        self.0
            .values()
            .flat_map(|archs| archs.values())
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

/// Platform compatibility constraints: OS -> compatible architectures.
///
/// An empty mapping means the target builds everywhere. Architecture lists
/// keep the order the resolver supplied, with repeats dropped; this holds for
/// deserialized values too, since each arch becomes a `select` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Compatibility(BTreeMap<String, Vec<String>>);

impl<'de> Deserialize<'de> for Compatibility {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
        let mut compat = Compatibility::new();
        for (os, archs) in raw {
            // An OS listed with no archs stays present: it is fully incompatible.
            compat.0.entry(os.clone()).or_default();
            for arch in archs {
                compat.allow(os.clone(), arch);
            }
        }
        Ok(compat)
    }
}

impl Compatibility {
    /// Create an unrestricted constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an (OS, architecture) pair as compatible.
    pub fn allow(&mut self, os: impl Into<String>, arch: impl Into<String>) {
        let archs = self.0.entry(os.into()).or_default();
        let arch = arch.into();
        if !archs.contains(&arch) {
            archs.push(arch);
        }
    }

    /// Builder-style [`Compatibility::allow`].
    pub fn with(mut self, os: &str, arch: &str) -> Self {
        self.allow(os, arch);
        self
    }

    /// Whether there are no constraints.
    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate OS entries in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

/// A resolved Go package to be rendered as one BUCK file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuckTarget {
    /// Short target name.
    pub name: String,
    /// Go import path; also the package's location under `vendor/`.
    pub import_path: String,
    /// Whether this is a `main` package.
    #[serde(default)]
    pub is_binary: bool,
    /// Dependencies applied on every platform.
    #[serde(default)]
    pub common_deps: Vec<String>,
    /// Dependencies applied only on specific platforms.
    #[serde(default)]
    pub platform_deps: PlatformDeps,
    /// Files bundled through `//go:embed`, in resolver order.
    #[serde(default)]
    pub embed_files: Vec<String>,
    /// Platforms the target can build on.
    #[serde(default)]
    pub target_compatible_with: Compatibility,
}

impl BuckTarget {
    /// A library target with no dependencies.
    pub fn library(name: impl Into<String>, import_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            import_path: import_path.into(),
            is_binary: false,
            common_deps: Vec::new(),
            platform_deps: PlatformDeps::new(),
            embed_files: Vec::new(),
            target_compatible_with: Compatibility::new(),
        }
    }

    /// A binary target with no dependencies.
    pub fn binary(name: impl Into<String>, import_path: impl Into<String>) -> Self {
        Self {
            is_binary: true,
            ..Self::library(name, import_path)
        }
    }

    /// The rule shape this target renders to.
    pub fn rule_kind(&self) -> RuleKind {
        if self.is_binary {
            RuleKind::Binary
        } else {
            RuleKind::Library
        }
    }

    /// Whether any common or platform dependency exists.
    pub fn has_deps(&self) -> bool {
        !self.common_deps.is_empty() || !self.platform_deps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_kind_follows_is_binary() {
        assert_eq!(BuckTarget::library("foo", "x/foo").rule_kind(), RuleKind::Library);
        assert_eq!(BuckTarget::binary("foo", "x/foo").rule_kind(), RuleKind::Binary);
        assert_eq!(RuleKind::Binary.name(), "binary");
    }

    #[test]
    fn has_deps_checks_both_sets() {
        let mut t = BuckTarget::library("foo", "x/foo");
        assert!(!t.has_deps());
        t.platform_deps.insert("linux", "amd64", "dep");
        assert!(t.has_deps());

        let mut t = BuckTarget::library("foo", "x/foo");
        t.common_deps.push("//bar:bar".into());
        assert!(t.has_deps());
    }

    #[test]
    fn platform_deps_sorted_and_deduplicated() {
        let deps = PlatformDeps::new()
            .with("linux", "amd64", "b")
            .with("linux", "amd64", "a")
            .with("linux", "amd64", "b");
        let got: Vec<&str> = deps.deps_for("linux", "amd64").into_iter().collect();
        assert_eq!(got, vec!["a", "b"]);
    }

    #[test]
    fn platform_deps_absent_keys_are_empty() {
        let deps = PlatformDeps::new().with("linux", "amd64", "a");
        assert!(deps.deps_for("darwin", "amd64").is_empty());
        assert!(deps.deps_for("linux", "arm64").is_empty());
    }

    #[test]
    fn platform_deps_iterate_sorted_os() {
        let deps = PlatformDeps::new()
            .with("windows", "amd64", "w")
            .with("darwin", "arm64", "d")
            .with("linux", "amd64", "l");
        let oses: Vec<&str> = deps.iter().map(|(os, _)| os.as_str()).collect();
        assert_eq!(oses, vec!["darwin", "linux", "windows"]);
        assert_eq!(deps.all_deps().len(), 3);
    }

    #[test]
    fn compatibility_unrestricted_when_empty() {
        assert!(Compatibility::new().is_unrestricted());
        assert!(!Compatibility::new().with("linux", "amd64").is_unrestricted());
    }

    #[test]
    fn compatibility_keeps_arch_order_without_duplicates() {
        let c = Compatibility::new()
            .with("linux", "arm64")
            .with("linux", "amd64")
            .with("linux", "arm64");
        let (_, archs) = c.iter().next().unwrap();
        assert_eq!(archs, &vec!["arm64".to_string(), "amd64".to_string()]);
    }

    #[test]
    fn compatibility_deserialize_drops_repeated_archs() {
        let c: Compatibility =
            serde_json::from_str(r#"{"linux": ["arm64", "amd64", "arm64"], "plan9": []}"#).unwrap();
        let entries: Vec<(&String, &Vec<String>)> = c.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].1, &vec!["arm64".to_string(), "amd64".to_string()]);
        assert!(entries[1].1.is_empty());
    }
}
