use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::debug;

use super::AuditError;
use crate::input::lockfile::{DependencyNode, Lockfile};

/// Path markers a package name can be derived from when the flat map entry
/// carries no explicit name. The text after the LAST marker occurrence is
/// the package name (covers scoped packages like `@scope/pkg` and nested
/// installs like `node_modules/a/node_modules/b`).
const PACKAGE_DIR_MARKERS: [&str; 2] = ["node_modules/", "node_modules\\"];

/// Index of every package name to every version string found anywhere in
/// the lockfile. Built once per audit, read-only afterwards.
///
/// Versions are deduplicated by exact string equality: "1.0" and "1.0.0"
/// are distinct entries even though the comparator orders them equal.
/// BTree storage keeps iteration deterministic across runs.
#[derive(Debug, Default)]
pub struct VersionIndex {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl VersionIndex {
    /// Builds the index from both lockfile shapes.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::EmptyIndex`] when neither shape yielded a
    /// single (name, version) pair, which usually means the file is not a
    /// lockfile of the expected structure.
    pub fn build(lockfile: &Lockfile) -> Result<Self, AuditError> {
        let mut index = Self::default();

        if let Some(packages) = &lockfile.packages {
            for (path, package) in packages {
                let name = match &package.name {
                    Some(name) => Some(name.as_str()),
                    None => name_from_path(path),
                };
                let Some(name) = name else {
                    debug!(%path, "no package name derivable from path, skipping");
                    continue;
                };
                index.insert(name, package.version.as_deref().unwrap_or(""));
            }
        }

        if let Some(dependencies) = &lockfile.dependencies {
            let mut visited = HashSet::new();
            for (name, node) in dependencies {
                walk_tree(name, node, &mut index, &mut visited);
            }
        }

        if index.entries.is_empty() {
            return Err(AuditError::EmptyIndex);
        }

        debug!(packages = index.entries.len(), "version index built");
        Ok(index)
    }

    /// Inserts a (name, version) pair, trimming both. Empty names or
    /// versions are skipped; duplicate pairs are a no-op.
    fn insert(&mut self, name: &str, version: &str) {
        let name = name.trim();
        let version = version.trim();
        if name.is_empty() || version.is_empty() {
            return;
        }
        self.entries
            .entry(name.to_string())
            .or_default()
            .insert(version.to_string());
    }

    /// Returns the indexed versions of a package, if present.
    pub fn versions(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(name)
    }

    /// Number of distinct package names in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derives a package name from a flat-map path, taking the text after the
/// last `node_modules` marker. Paths without a marker (the root project
/// entry, workspace links) yield nothing.
fn name_from_path(path: &str) -> Option<&str> {
    let cut = PACKAGE_DIR_MARKERS
        .iter()
        .filter_map(|marker| path.rfind(marker).map(|pos| pos + marker.len()))
        .max()?;
    Some(&path[cut..])
}

/// Recursive walk of the v1 dependency tree, adding (name, version) at
/// every level. Nodes are tracked by address so a hand-built
/// self-referential tree cannot loop the walk; serde-produced trees are
/// always acyclic.
fn walk_tree(
    name: &str,
    node: &DependencyNode,
    index: &mut VersionIndex,
    visited: &mut HashSet<*const DependencyNode>,
) {
    if !visited.insert(node as *const _) {
        return;
    }

    index.insert(name, node.version.as_deref().unwrap_or(""));

    if let Some(children) = &node.dependencies {
        for (child_name, child) in children {
            walk_tree(child_name, child, index, visited);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::lockfile::Lockfile;

    fn lockfile(json: &str) -> Lockfile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_flat_map_with_explicit_names() {
        let lf = lockfile(
            r#"{"packages": {
                "whatever/path": { "name": "left-pad", "version": "1.3.0" }
            }}"#,
        );
        let index = VersionIndex::build(&lf).unwrap();
        assert!(index.versions("left-pad").unwrap().contains("1.3.0"));
    }

    #[test]
    fn test_flat_map_derives_name_from_path() {
        let lf = lockfile(
            r#"{"packages": {
                "node_modules/left-pad": { "version": "1.3.0" },
                "node_modules/@scope/pkg": { "version": "2.0.0" }
            }}"#,
        );
        let index = VersionIndex::build(&lf).unwrap();
        assert!(index.versions("left-pad").is_some());
        assert!(index.versions("@scope/pkg").is_some());
    }

    #[test]
    fn test_name_from_path_uses_last_marker() {
        assert_eq!(
            name_from_path("node_modules/outer/node_modules/inner-pkg"),
            Some("inner-pkg")
        );
        assert_eq!(
            name_from_path(r"node_modules\outer\node_modules\inner-pkg"),
            Some("inner-pkg")
        );
        assert_eq!(name_from_path(""), None);
        assert_eq!(name_from_path("packages/my-workspace"), None);
    }

    #[test]
    fn test_nested_tree_indexed_at_every_depth() {
        let lf = lockfile(
            r#"{"dependencies": {
                "a": {
                    "version": "1.0.0",
                    "dependencies": {
                        "b": {
                            "version": "2.0.0",
                            "dependencies": {
                                "c": { "version": "3.0.0" }
                            }
                        }
                    }
                }
            }}"#,
        );
        let index = VersionIndex::build(&lf).unwrap();
        assert_eq!(index.len(), 3);
        assert!(index.versions("c").unwrap().contains("3.0.0"));
    }

    #[test]
    fn test_duplicate_pair_across_sources_is_deduplicated() {
        let lf = lockfile(
            r#"{
                "packages": {
                    "node_modules/left-pad": { "version": "1.3.0" }
                },
                "dependencies": {
                    "left-pad": { "version": "1.3.0" }
                }
            }"#,
        );
        let index = VersionIndex::build(&lf).unwrap();
        assert_eq!(index.versions("left-pad").unwrap().len(), 1);
    }

    #[test]
    fn test_distinct_version_strings_stay_distinct() {
        let lf = lockfile(
            r#"{"dependencies": {
                "a": {
                    "version": "1.0",
                    "dependencies": { "a": { "version": "1.0.0" } }
                }
            }}"#,
        );
        let index = VersionIndex::build(&lf).unwrap();
        assert_eq!(index.versions("a").unwrap().len(), 2);
    }

    #[test]
    fn test_missing_or_empty_fields_are_skipped() {
        let lf = lockfile(
            r#"{
                "packages": {
                    "node_modules/no-version": {},
                    "node_modules/blank": { "version": "  " },
                    "": { "name": "root", "version": "0.1.0" }
                },
                "dependencies": {
                    "ok": { "version": "1.0.0" },
                    "  ": { "version": "1.0.0" }
                }
            }"#,
        );
        let index = VersionIndex::build(&lf).unwrap();
        assert!(index.versions("no-version").is_none());
        assert!(index.versions("blank").is_none());
        assert!(index.versions("root").is_some());
        assert!(index.versions("ok").is_some());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_empty_lockfile_is_an_error() {
        let lf = lockfile(r#"{"packages": {}, "dependencies": {}}"#);
        assert!(matches!(
            VersionIndex::build(&lf),
            Err(AuditError::EmptyIndex)
        ));

        let lf = lockfile(r#"{}"#);
        assert!(matches!(
            VersionIndex::build(&lf),
            Err(AuditError::EmptyIndex)
        ));
    }
}
