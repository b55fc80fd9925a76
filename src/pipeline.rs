//! Resolution and materialization pipeline
//!
//! This module provides the three entry points behind the CLI commands:
//! - `init`: create an empty manifest
//! - `get_one`: parse → resolve → fetch → extract → record one spec
//! - `install_all`: replay every recorded dependency in manifest order
//!
//! The manifest is passed in and handed back explicitly; it is rewritten
//! after every successful dependency. Any failure stops the run.

use crate::archive::{ArchiveDownloader, ArchiveFetcher};
use crate::config::Settings;
use crate::domain::{DependencySpec, Tag};
use crate::error::AppError;
use crate::manifest::{Manifest, ManifestStore, ResolvedDependency, DEFAULT_TARGET_DIR};
use crate::progress::Progress;
use crate::registry::{create_source, HttpClient, TagSource};
use crate::resolver;
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;

/// Result of fetching one dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchOutcome {
    /// Tag name that was selected
    pub tag: String,
    /// Record written to the manifest
    pub dependency: ResolvedDependency,
    /// Record this one replaced, if the spec was already present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<ResolvedDependency>,
    /// Number of files extracted
    pub files: usize,
}

impl FetchOutcome {
    /// Returns true if the resolved version differs from the replaced record
    pub fn changed_version(&self) -> bool {
        self.previous
            .as_ref()
            .map(|p| p.semver != self.dependency.semver)
            .unwrap_or(false)
    }
}

/// The pkgit pipeline
pub struct Pkgit {
    store: ManifestStore,
    source: Box<dyn TagSource>,
    fetcher: ArchiveFetcher,
    progress: Progress,
}

impl Pkgit {
    /// Create a pipeline from its collaborators
    pub fn new(
        store: ManifestStore,
        source: Box<dyn TagSource>,
        downloader: Box<dyn ArchiveDownloader>,
    ) -> Self {
        Self {
            store,
            source,
            fetcher: ArchiveFetcher::new(downloader),
            progress: Progress::disabled(),
        }
    }

    /// Create a pipeline talking to the configured provider over HTTP
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let client = HttpClient::with_config(settings.timeout, &settings.user_agent)?;
        let source = create_source(settings.provider, client.clone(), settings.api_url.as_deref());
        let pipeline = Self::new(
            ManifestStore::new(&settings.manifest_path),
            source,
            Box::new(client),
        );
        Ok(pipeline.with_progress(Progress::new(settings.show_progress)))
    }

    /// Attach a progress reporter (builder pattern)
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// The manifest store in use
    pub fn store(&self) -> &ManifestStore {
        &self.store
    }

    /// Load the manifest from the store
    pub fn load(&self) -> Result<Manifest, AppError> {
        Ok(self.store.load()?)
    }

    /// Create and persist an empty manifest
    pub fn init(&self, target_dir: Option<&str>) -> Result<Manifest, AppError> {
        let target_dir = target_dir.unwrap_or(DEFAULT_TARGET_DIR);
        let manifest = self.store.init(target_dir)?;
        info!(
            "created {} targeting {}",
            self.store.path().display(),
            target_dir
        );
        Ok(manifest)
    }

    /// Resolve, fetch and record a single dependency spec
    pub async fn get_one(
        &self,
        mut manifest: Manifest,
        raw: &str,
    ) -> Result<(Manifest, FetchOutcome), AppError> {
        let spec = DependencySpec::parse(raw)?;
        let outcome = self.fetch(&mut manifest, &spec, raw.trim(), None).await?;
        self.progress.clear();
        Ok((manifest, outcome))
    }

    /// Replay every recorded dependency in manifest order
    ///
    /// Unconstrained records are pinned to the version recorded for them,
    /// matched on the parsed tag version. Each spec is fetched once even if
    /// the manifest lists it twice.
    pub async fn install_all(
        &self,
        mut manifest: Manifest,
    ) -> Result<(Manifest, Vec<FetchOutcome>), AppError> {
        let recorded = manifest.dependencies.clone();
        let mut seen = HashSet::new();
        let mut outcomes = Vec::with_capacity(recorded.len());

        for record in recorded {
            if !seen.insert(record.original_spec.clone()) {
                debug!("skipping duplicate record {}", record.original_spec);
                continue;
            }

            let spec = DependencySpec::parse(&record.original_spec)?;
            let pinned = (!spec.is_constrained()).then_some(&record);

            let outcome = self
                .fetch(&mut manifest, &spec, &record.original_spec, pinned)
                .await?;
            outcomes.push(outcome);
        }

        self.progress.clear();
        Ok((manifest, outcomes))
    }

    /// Resolve and extract one spec, then upsert and persist its record
    async fn fetch(
        &self,
        manifest: &mut Manifest,
        spec: &DependencySpec,
        original_spec: &str,
        pinned: Option<&ResolvedDependency>,
    ) -> Result<FetchOutcome, AppError> {
        self.progress.step(format!("Resolving {}", spec));
        let tag: Tag = match pinned {
            Some(record) => resolver::resolve_recorded(self.source.as_ref(), spec, record).await?,
            None => resolver::resolve(self.source.as_ref(), spec).await?,
        };
        let version = tag.semver()?;

        self.progress
            .step(format!("Downloading {} {}", spec.slug(), tag.name));
        let summary = self
            .fetcher
            .fetch_and_extract(&tag.archive_url, &self.store.target_path(manifest))
            .await?;

        let dependency =
            ResolvedDependency::new(version.to_string(), tag.commit_hash.clone(), original_spec);
        let previous = manifest.upsert(dependency.clone());
        self.store.save(manifest)?;

        self.progress
            .done(&format!("{} {}", spec.slug(), dependency.semver));

        Ok(FetchOutcome {
            tag: tag.name,
            dependency,
            previous,
            files: summary.files,
        })
    }
}
