//! Hosting provider definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported source hosting providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// github.com REST API
    #[default]
    GitHub,
}

impl Provider {
    /// Returns the display name for this provider
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::GitHub => "GitHub",
        }
    }

    /// Returns the default API base URL for this provider
    pub fn default_api_url(&self) -> &'static str {
        match self {
            Provider::GitHub => "https://api.github.com",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
