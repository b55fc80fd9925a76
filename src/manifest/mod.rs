//! Project manifest model and persistence
//!
//! The manifest (`pkgit.req`) records the target directory and every
//! dependency resolved so far. Field names match the on-disk format of
//! existing manifests:
//!
//! ```json
//! {"targetDir": "vendor", "dependencies": [{"Semver": "1.0.0", "Hash": "…", "Repo": "octocat/Hello-World@1.0.0"}]}
//! ```

mod store;

pub use store::{ManifestStore, DEFAULT_MANIFEST_FILE};

use serde::{Deserialize, Deserializer, Serialize};

/// Target directory used when `init` is called without one
pub const DEFAULT_TARGET_DIR: &str = "pkgit";

/// Persisted record of a fetched dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    /// Normalised semantic version of the resolved tag
    #[serde(rename = "Semver")]
    pub semver: String,
    /// Commit hash of the resolved tag
    #[serde(rename = "Hash")]
    pub hash: String,
    /// Spec string exactly as the user gave it
    #[serde(rename = "Repo")]
    pub original_spec: String,
}

impl ResolvedDependency {
    /// Creates a new record
    pub fn new(
        semver: impl Into<String>,
        hash: impl Into<String>,
        original_spec: impl Into<String>,
    ) -> Self {
        Self {
            semver: semver.into(),
            hash: hash.into(),
            original_spec: original_spec.into(),
        }
    }
}

/// The project manifest
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Directory archives are extracted into
    #[serde(rename = "targetDir", default)]
    pub target_dir: String,
    /// Resolved dependencies in resolution order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: Vec<ResolvedDependency>,
}

impl Manifest {
    /// Creates an empty manifest for the given target directory
    pub fn new(target_dir: impl Into<String>) -> Self {
        Self {
            target_dir: target_dir.into(),
            dependencies: Vec::new(),
        }
    }

    /// Record a dependency, replacing an existing record for the same spec
    ///
    /// Returns the replaced record, if any. New specs are appended, so
    /// resolution order is kept.
    pub fn upsert(&mut self, dependency: ResolvedDependency) -> Option<ResolvedDependency> {
        match self
            .dependencies
            .iter_mut()
            .find(|d| d.original_spec == dependency.original_spec)
        {
            Some(existing) => Some(std::mem::replace(existing, dependency)),
            None => {
                self.dependencies.push(dependency);
                None
            }
        }
    }

    /// Number of recorded dependencies
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns true if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// Older manifests may carry `"dependencies": null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ResolvedDependency>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<ResolvedDependency>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_new_is_empty() {
        let manifest = Manifest::new("vendor");
        assert_eq!(manifest.target_dir, "vendor");
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_upsert_appends_new_specs_in_order() {
        let mut manifest = Manifest::new("vendor");
        assert!(manifest.upsert(ResolvedDependency::new("1.0.0", "a", "x/a")).is_none());
        assert!(manifest.upsert(ResolvedDependency::new("2.0.0", "b", "x/b")).is_none());

        let specs: Vec<&str> = manifest
            .dependencies
            .iter()
            .map(|d| d.original_spec.as_str())
            .collect();
        assert_eq!(specs, vec!["x/a", "x/b"]);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut manifest = Manifest::new("vendor");
        manifest.upsert(ResolvedDependency::new("1.0.0", "a", "x/a"));
        manifest.upsert(ResolvedDependency::new("1.0.0", "b", "x/b"));

        let replaced = manifest.upsert(ResolvedDependency::new("1.1.0", "c", "x/a"));

        assert_eq!(replaced.unwrap().semver, "1.0.0");
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.dependencies[0].semver, "1.1.0");
        assert_eq!(manifest.dependencies[0].hash, "c");
    }

    #[test]
    fn test_serde_field_names() {
        let mut manifest = Manifest::new("vendor");
        manifest.upsert(ResolvedDependency::new("1.0.0", "abc", "octocat/Hello-World@1.0.0"));

        let json = serde_json::to_string(&manifest).unwrap();
        assert_eq!(
            json,
            r#"{"targetDir":"vendor","dependencies":[{"Semver":"1.0.0","Hash":"abc","Repo":"octocat/Hello-World@1.0.0"}]}"#
        );
    }

    #[test]
    fn test_deserialize_null_dependencies() {
        let manifest: Manifest =
            serde_json::from_str(r#"{"targetDir":"pkgit","dependencies":null}"#).unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.target_dir, "pkgit");
    }
}
