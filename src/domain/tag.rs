//! Provider-neutral tag model
//!
//! Provider adapters deserialize their own tag records and expose them
//! through [`TaggedRelease`], which normalises them into [`Tag`].

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};

/// Capability shared by every provider's tag record
pub trait TaggedRelease {
    /// Tag name as published (e.g. `v1.2.3`)
    fn tag_name(&self) -> &str;

    /// Commit identifier the tag points at
    fn hash(&self) -> &str;

    /// URL of the downloadable zip archive
    fn archive_url(&self) -> &str;

    /// Normalise into a [`Tag`]
    fn to_tag(&self) -> Tag {
        Tag::new(self.tag_name(), self.hash(), self.archive_url())
    }
}

/// A named, hash-addressed snapshot of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name, usually a semantic version with an optional `v` prefix
    pub name: String,
    /// Commit the tag points at
    pub commit_hash: String,
    /// Zip archive URL for this tag
    pub archive_url: String,
}

impl Tag {
    /// Creates a new tag
    pub fn new(
        name: impl Into<String>,
        commit_hash: impl Into<String>,
        archive_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            commit_hash: commit_hash.into(),
            archive_url: archive_url.into(),
        }
    }

    /// Tag name with a single leading `v` removed
    pub fn version_name(&self) -> &str {
        self.name.strip_prefix('v').unwrap_or(&self.name)
    }

    /// Returns true if the tag name equals the constraint after prefix strip
    pub fn matches(&self, constraint: &str) -> bool {
        self.version_name() == constraint
    }

    /// Parses the tag name as a semantic version
    ///
    /// Partial versions such as `1` or `1.2` are completed with zeros.
    pub fn semver(&self) -> Result<semver::Version, RegistryError> {
        parse_lenient(self.version_name()).map_err(|e| RegistryError::InvalidTagName {
            tag: self.name.clone(),
            message: e.to_string(),
        })
    }
}

/// Parse a version, padding missing minor/patch components
fn parse_lenient(version: &str) -> Result<semver::Version, semver::Error> {
    let strict_err = match semver::Version::parse(version) {
        Ok(parsed) => return Ok(parsed),
        Err(e) => e,
    };

    let split_at = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(split_at);
    let parts: Vec<&str> = core.split('.').collect();

    let numeric = parts
        .iter()
        .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    if parts.len() >= 3 || !numeric {
        return Err(strict_err);
    }

    let mut padded = parts.join(".");
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);

    semver::Version::parse(&padded).map_err(|_| strict_err)
}
