//! Application error types using thiserror
//!
//! Error hierarchy:
//! - SpecError: Malformed dependency spec strings
//! - RegistryError: Issues with tag feed communication and tag selection
//! - ArchiveError: Download and extraction failures
//! - ManifestError: Issues with the pkgit.req manifest file

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Dependency spec related errors
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Tag feed related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Archive download and extraction errors
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Errors related to dependency spec parsing
#[derive(Error, Debug)]
pub enum SpecError {
    /// The spec string does not have the `owner/repo[@version]` shape
    #[error("invalid dependency spec '{spec}': {message}")]
    InvalidSpec { spec: String, message: String },
}

/// Errors related to the hosting provider's tag feed
#[derive(Error, Debug)]
pub enum RegistryError {
    /// HTTP client could not be set up
    #[error("failed to create HTTP client: {message}")]
    Client { message: String },

    /// Network request failed or returned a non-success status
    #[error("failed to look up tags for '{repo}' on {provider}: {message}")]
    Lookup {
        repo: String,
        provider: String,
        message: String,
    },

    /// Feed response is not well-formed
    #[error("invalid tag feed from {provider} for '{repo}': {message}")]
    InvalidResponse {
        repo: String,
        provider: String,
        message: String,
    },

    /// Tag name cannot be read as a semantic version
    #[error("tag '{tag}' is not a semantic version: {message}")]
    InvalidTagName { tag: String, message: String },

    /// No tag satisfies the requested constraint
    #[error("no tag of '{repo}' matches version '{constraint}'")]
    NoMatch { repo: String, constraint: String },
}

/// Errors related to archive retrieval and extraction
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Transport failure while downloading
    #[error("failed to download archive {url}: {message}")]
    Download { url: String, message: String },

    /// Payload is not a readable zip archive
    #[error("invalid archive {url}: {message}")]
    Format { url: String, message: String },

    /// Entry would be written outside the target directory
    #[error("archive entry '{entry}' escapes target directory {target}")]
    PathTraversal { entry: String, target: PathBuf },

    /// Write failure while extracting
    #[error("failed to write {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path} (run `pkgit init` first)")]
    NotFound { path: PathBuf },

    /// Manifest already present when initialising
    #[error("manifest file already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored bytes are not a valid manifest
    #[error("failed to parse manifest {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl SpecError {
    /// Creates a new InvalidSpec error
    pub fn invalid(spec: impl Into<String>, message: impl Into<String>) -> Self {
        SpecError::InvalidSpec {
            spec: spec.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new Lookup error
    pub fn lookup(
        repo: impl Into<String>,
        provider: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::Lookup {
            repo: repo.into(),
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        repo: impl Into<String>,
        provider: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            repo: repo.into(),
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Creates a new NoMatch error
    pub fn no_match(repo: impl Into<String>, constraint: impl Into<String>) -> Self {
        RegistryError::NoMatch {
            repo: repo.into(),
            constraint: constraint.into(),
        }
    }
}

impl ArchiveError {
    /// Creates a new Download error
    pub fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        ArchiveError::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new Format error
    pub fn format(url: impl Into<String>, message: impl Into<String>) -> Self {
        ArchiveError::Format {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new Filesystem error
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ArchiveError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new Parse error
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
