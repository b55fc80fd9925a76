//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable User-Agent (GitHub rejects anonymous requests without one)
//! - Optional request timeout (none by default)
//! - Status checking that separates transport failures from bad payloads
//!
//! Requests are never retried; the first failure is returned to the caller.

use crate::error::{ArchiveError, RegistryError};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Duration;

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = concat!("pkgit/", env!("CARGO_PKG_VERSION"));

/// Accept header understood by the GitHub REST API
const ACCEPT_JSON: &str = "application/vnd.github+json";

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(None, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Option<Duration>, user_agent: &str) -> Result<Self, RegistryError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));

        let mut builder = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| RegistryError::Client {
            message: e.to_string(),
        })?;

        Ok(Self { client })
    }

    /// Perform a GET request, failing on transport errors and non-2xx statuses
    async fn send(&self, url: &str) -> Result<reqwest::Response, String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status));
        }

        Ok(response)
    }

    /// Perform a GET request and parse the JSON body
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        repo: &str,
        provider: &str,
    ) -> Result<T, RegistryError> {
        let response = self
            .send(url)
            .await
            .map_err(|message| RegistryError::lookup(repo, provider, message))?;

        let body = response.text().await.map_err(|e| {
            RegistryError::lookup(repo, provider, format!("failed to read body: {}", e))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            RegistryError::invalid_response(repo, provider, format!("failed to parse JSON: {}", e))
        })
    }

    /// Perform a GET request and return the full body
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, ArchiveError> {
        let response = self
            .send(url)
            .await
            .map_err(|message| ArchiveError::download(url, message))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ArchiveError::download(url, format!("failed to read body: {}", e)))?;

        debug!("downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
