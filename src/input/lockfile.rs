use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A parsed npm-style lockfile.
///
/// Both shapes are optional and processed independently: v2/v3 lockfiles
/// carry a flat `packages` map keyed by install path, v1 lockfiles carry a
/// recursively nested `dependencies` tree. Hybrid files (npm writes both
/// during migration) contribute through both.
#[derive(Debug, Default, Deserialize)]
pub struct Lockfile {
    pub packages: Option<HashMap<String, LockfilePackage>>,
    pub dependencies: Option<HashMap<String, DependencyNode>>,
}

/// One entry of the flat `packages` map.
#[derive(Debug, Default, Deserialize)]
pub struct LockfilePackage {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// One node of the nested v1 dependency tree.
#[derive(Debug, Default, Deserialize)]
pub struct DependencyNode {
    pub version: Option<String>,
    pub dependencies: Option<HashMap<String, DependencyNode>>,
}

/// Reads and deserializes a lockfile from disk.
pub fn load_lockfile(path: &Path) -> Result<Lockfile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read lockfile: {}", path.display()))?;
    let lockfile: Lockfile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse lockfile JSON: {}", path.display()))?;
    Ok(lockfile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_packages_map() {
        let json = r#"{
            "lockfileVersion": 3,
            "packages": {
                "": { "name": "my-app", "version": "0.1.0" },
                "node_modules/left-pad": { "version": "1.3.0" }
            }
        }"#;
        let lockfile: Lockfile = serde_json::from_str(json).unwrap();
        let packages = lockfile.packages.unwrap();
        assert_eq!(
            packages["node_modules/left-pad"].version.as_deref(),
            Some("1.3.0")
        );
        assert!(lockfile.dependencies.is_none());
    }

    #[test]
    fn test_parse_nested_dependency_tree() {
        let json = r#"{
            "dependencies": {
                "a": {
                    "version": "1.0.0",
                    "dependencies": {
                        "b": { "version": "2.0.0" }
                    }
                }
            }
        }"#;
        let lockfile: Lockfile = serde_json::from_str(json).unwrap();
        let deps = lockfile.dependencies.unwrap();
        let a = &deps["a"];
        assert_eq!(a.version.as_deref(), Some("1.0.0"));
        let b = &a.dependencies.as_ref().unwrap()["b"];
        assert_eq!(b.version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{
            "name": "my-app",
            "lockfileVersion": 2,
            "requires": true,
            "packages": {}
        }"#;
        let lockfile: Lockfile = serde_json::from_str(json).unwrap();
        assert!(lockfile.packages.unwrap().is_empty());
    }

    #[test]
    fn test_load_lockfile_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package-lock.json");
        std::fs::write(&path, r#"{"packages": {}}"#).unwrap();
        let lockfile = load_lockfile(&path).unwrap();
        assert!(lockfile.packages.is_some());

        let missing = dir.path().join("nope.json");
        assert!(load_lockfile(&missing).is_err());
    }
}
