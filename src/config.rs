//! Runtime settings shared by the pipeline
//!
//! Built from CLI arguments in the binary, or directly in tests.

use crate::domain::Provider;
use crate::manifest::DEFAULT_MANIFEST_FILE;
use crate::registry::DEFAULT_USER_AGENT;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for a pkgit run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Location of the manifest file
    pub manifest_path: PathBuf,
    /// Hosting provider to query
    pub provider: Provider,
    /// Override for the provider's API base URL
    pub api_url: Option<String>,
    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Whether to draw a spinner while working
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_FILE),
            provider: Provider::default(),
            api_url: None,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            show_progress: true,
        }
    }
}

impl Settings {
    /// Override the manifest location (builder pattern)
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    /// Override the API base URL (builder pattern)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set a request timeout (builder pattern)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable the progress spinner (builder pattern)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }
}
