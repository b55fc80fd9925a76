//! Dependency spec parsing
//!
//! Accepts `owner/repo`, `owner/repo@version` and URL-like forms such as
//! `https://github.com/owner/repo@version`. Only the last two path segments
//! are significant.

use crate::error::SpecError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed `owner/repo[@version]` dependency spec
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Repository owner (user or organisation)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Exact version constraint without a `v` prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<String>,
}

impl DependencySpec {
    /// Creates a new spec from its parts
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        constraint: Option<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            constraint,
        }
    }

    /// Parses a raw dependency string
    pub fn parse(raw: &str) -> Result<Self, SpecError> {
        let trimmed = raw.trim();

        let mut halves = trimmed.split('@');
        let path = halves.next().unwrap_or_default();
        let constraint = halves.next();
        if halves.next().is_some() {
            return Err(SpecError::invalid(raw, "too many '@' separators"));
        }

        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() < 2 {
            return Err(SpecError::invalid(raw, "expected 'owner/repo'"));
        }

        let repo = segments[segments.len() - 1];
        let owner = segments[segments.len() - 2];
        if owner.is_empty() {
            return Err(SpecError::invalid(raw, "owner is empty"));
        }
        if repo.is_empty() {
            return Err(SpecError::invalid(raw, "repository name is empty"));
        }

        let constraint = constraint
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| c.to_string());

        Ok(Self::new(owner, repo, constraint))
    }

    /// Returns `owner/repo`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Returns true if a version constraint is present
    pub fn is_constrained(&self) -> bool {
        self.constraint.is_some()
    }
}

impl FromStr for DependencySpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.constraint {
            Some(constraint) => write!(f, "{}/{}@{}", self.owner, self.repo, constraint),
            None => write!(f, "{}/{}", self.owner, self.repo),
        }
    }
}
