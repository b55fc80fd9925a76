//! Manifest file persistence
//!
//! Every save rewrites the whole file; there is no locking and the last
//! writer wins.

use super::Manifest;
use crate::error::ManifestError;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Manifest file name in the project root
pub const DEFAULT_MANIFEST_FILE: &str = "pkgit.req";

/// Loads and saves the manifest file
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if a manifest file is present
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Directory dependencies are extracted into
    ///
    /// A relative `targetDir` is taken relative to the directory holding the
    /// manifest file. Absolute paths are used as is.
    pub fn target_path(&self, manifest: &Manifest) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(&manifest.target_dir),
            _ => PathBuf::from(&manifest.target_dir),
        }
    }

    /// Load the manifest
    pub fn load(&self) -> Result<Manifest, ManifestError> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ManifestError::not_found(&self.path),
            _ => ManifestError::Read {
                path: self.path.clone(),
                source: e,
            },
        })?;

        let manifest: Manifest = serde_json::from_str(&content)
            .map_err(|e| ManifestError::parse(&self.path, e.to_string()))?;

        debug!(
            "loaded {} with {} dependencies",
            self.path.display(),
            manifest.len()
        );
        Ok(manifest)
    }

    /// Rewrite the manifest file
    pub fn save(&self, manifest: &Manifest) -> Result<(), ManifestError> {
        let write_error = |source| ManifestError::Write {
            path: self.path.clone(),
            source,
        };

        let mut content = serde_json::to_string_pretty(manifest)
            .map_err(|e| write_error(io::Error::other(e)))?;
        content.push('\n');

        fs::write(&self.path, content).map_err(write_error)?;
        debug!(
            "wrote {} with {} dependencies",
            self.path.display(),
            manifest.len()
        );
        Ok(())
    }

    /// Create and persist an empty manifest
    pub fn init(&self, target_dir: &str) -> Result<Manifest, ManifestError> {
        if self.exists() {
            return Err(ManifestError::AlreadyExists {
                path: self.path.clone(),
            });
        }

        let manifest = Manifest::new(target_dir);
        self.save(&manifest)?;
        Ok(manifest)
    }
}
