//! Release archive retrieval and extraction
//!
//! This module provides:
//! - The ArchiveDownloader seam (HTTP in production, in-memory in tests)
//! - ArchiveFetcher, which downloads a whole archive into memory and then
//!   extracts it with Zip Slip protection

mod extract;

pub use extract::{extract_archive, safe_join, ExtractSummary};

use crate::error::ArchiveError;
use crate::registry::HttpClient;
use async_trait::async_trait;
use log::info;
use std::path::Path;

/// Trait for fetching archive payloads
#[async_trait]
pub trait ArchiveDownloader: Send + Sync {
    /// Download the full payload behind `url`
    async fn download(&self, url: &str) -> Result<Vec<u8>, ArchiveError>;
}

#[async_trait]
impl ArchiveDownloader for HttpClient {
    async fn download(&self, url: &str) -> Result<Vec<u8>, ArchiveError> {
        self.get_bytes(url).await
    }
}

/// Downloads release archives and unpacks them into a directory
pub struct ArchiveFetcher {
    downloader: Box<dyn ArchiveDownloader>,
}

impl ArchiveFetcher {
    /// Create a new fetcher
    pub fn new(downloader: Box<dyn ArchiveDownloader>) -> Self {
        Self { downloader }
    }

    /// Download the archive at `url` and extract it beneath `target_dir`
    pub async fn fetch_and_extract(
        &self,
        url: &str,
        target_dir: &Path,
    ) -> Result<ExtractSummary, ArchiveError> {
        let bytes = self.downloader.download(url).await?;
        let summary = extract_archive(&bytes, url, target_dir)?;
        info!(
            "unpacked {} files from {} into {}",
            summary.files,
            url,
            target_dir.display()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;

    struct FixedDownloader(Vec<u8>);

    #[async_trait]
    impl ArchiveDownloader for FixedDownloader {
        async fn download(&self, _url: &str) -> Result<Vec<u8>, ArchiveError> {
            Ok(self.0.clone())
        }
    }

    struct FailingDownloader;

    #[async_trait]
    impl ArchiveDownloader for FailingDownloader {
        async fn download(&self, url: &str) -> Result<Vec<u8>, ArchiveError> {
            Err(ArchiveError::download(url, "connection reset"))
        }
    }

    fn single_file_zip() -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("repo-abc123/hello.txt", FileOptions::<()>::default())
            .unwrap();
        writer.write_all(b"hi").unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[tokio::test]
    async fn test_fetch_and_extract() {
        let temp = tempfile::tempdir().unwrap();
        let fetcher = ArchiveFetcher::new(Box::new(FixedDownloader(single_file_zip())));

        let summary = fetcher
            .fetch_and_extract("https://example.com/a.zip", temp.path())
            .await
            .unwrap();

        assert_eq!(summary.files, 1);
        assert!(temp.path().join("repo-abc123/hello.txt").is_file());
    }

    #[tokio::test]
    async fn test_download_failure_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("out");
        let fetcher = ArchiveFetcher::new(Box::new(FailingDownloader));

        let err = fetcher
            .fetch_and_extract("https://example.com/a.zip", &target)
            .await
            .unwrap_err();

        assert!(matches!(err, ArchiveError::Download { .. }));
        assert!(!target.exists());
    }
}
