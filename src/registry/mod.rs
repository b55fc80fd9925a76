//! Tag feed adapters for source hosting providers
//!
//! This module provides:
//! - HTTP client shared foundation
//! - GitHub tags API adapter

mod client;
mod github;

pub use client::{HttpClient, DEFAULT_USER_AGENT};
pub use github::{GitHubAdapter, GitHubCommit, GitHubTag};

use crate::domain::{DependencySpec, Provider, Tag};
use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for tag feed adapters
#[async_trait]
pub trait TagSource: Send + Sync {
    /// Get the provider this adapter talks to
    fn provider(&self) -> Provider;

    /// Fetch the repository's tags in the order the provider returns them
    async fn fetch_tags(&self, spec: &DependencySpec) -> Result<Vec<Tag>, RegistryError>;
}

/// Create a tag source for the given provider
pub fn create_source(
    provider: Provider,
    client: HttpClient,
    api_url: Option<&str>,
) -> Box<dyn TagSource> {
    match provider {
        Provider::GitHub => match api_url {
            Some(url) => Box::new(GitHubAdapter::with_api_url(client, url)),
            None => Box::new(GitHubAdapter::new(client)),
        },
    }
}
