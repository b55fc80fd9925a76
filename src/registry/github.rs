//! GitHub tags adapter
//!
//! Fetches the tag list of a repository from the GitHub REST API.
//! API endpoint: https://api.github.com/repos/{owner}/{repo}/tags
//!
//! Tags are returned in the order GitHub lists them; no re-sorting is done.

use crate::domain::{DependencySpec, Provider, Tag, TaggedRelease};
use crate::error::RegistryError;
use crate::registry::{HttpClient, TagSource};
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

/// GitHub adapter
pub struct GitHubAdapter {
    client: HttpClient,
    api_url: String,
}

/// Commit reference inside a tag record
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommit {
    /// Commit SHA
    pub sha: String,
    /// API URL of the commit
    #[serde(default)]
    pub url: Option<String>,
}

/// One entry of the GitHub tags response
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubTag {
    /// Tag name
    pub name: String,
    /// Zip archive URL
    pub zipball_url: String,
    /// Tarball archive URL
    #[serde(default)]
    pub tarball_url: Option<String>,
    /// Tagged commit
    pub commit: GitHubCommit,
    /// GraphQL node id
    #[serde(default)]
    pub node_id: Option<String>,
}

impl TaggedRelease for GitHubTag {
    fn tag_name(&self) -> &str {
        &self.name
    }

    fn hash(&self) -> &str {
        &self.commit.sha
    }

    fn archive_url(&self) -> &str {
        &self.zipball_url
    }
}

impl GitHubAdapter {
    /// Create a new GitHub adapter against the public API
    pub fn new(client: HttpClient) -> Self {
        Self::with_api_url(client, Provider::GitHub.default_api_url())
    }

    /// Create a new GitHub adapter against a custom API base URL
    pub fn with_api_url(client: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the tags URL for a repository
    fn build_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}/tags", self.api_url, owner, repo)
    }
}

#[async_trait]
impl TagSource for GitHubAdapter {
    fn provider(&self) -> Provider {
        Provider::GitHub
    }

    async fn fetch_tags(&self, spec: &DependencySpec) -> Result<Vec<Tag>, RegistryError> {
        let url = self.build_url(&spec.owner, &spec.repo);
        let response: Vec<GitHubTag> = self
            .client
            .get_json(&url, &spec.slug(), self.provider().display_name())
            .await?;

        debug!("{} lists {} tags", spec.slug(), response.len());
        Ok(response.iter().map(TaggedRelease::to_tag).collect())
    }
}
