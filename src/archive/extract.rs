//! Safe zip extraction
//!
//! Every entry path is joined onto the target directory and lexically
//! normalised; entries that do not land strictly beneath the target are
//! rejected before anything is written for them.

use crate::error::ArchiveError;
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Cursor};
use std::path::{Component, Path, PathBuf};
use zip::ZipArchive;

/// Permission bits used when an archive entry stores none
const DEFAULT_FILE_MODE: u32 = 0o644;

/// Counts of what an extraction wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Regular files written
    pub files: usize,
    /// Directory entries created
    pub directories: usize,
}

/// Extract a zip payload into `target_dir`
///
/// `source` names where the bytes came from and is only used for error
/// context. Extraction is not transactional: on failure, entries written
/// before the failing one stay on disk.
pub fn extract_archive(
    bytes: &[u8],
    source: &str,
    target_dir: &Path,
) -> Result<ExtractSummary, ArchiveError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ArchiveError::format(source, e.to_string()))?;

    fs::create_dir_all(target_dir).map_err(|e| ArchiveError::filesystem(target_dir, e))?;

    let mut summary = ExtractSummary::default();

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| ArchiveError::format(source, e.to_string()))?;
        let name = entry.name().to_string();
        let out_path = safe_join(target_dir, &name)?;

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| ArchiveError::filesystem(&out_path, e))?;
            summary.directories += 1;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ArchiveError::filesystem(parent, e))?;
        }

        let mode = entry
            .unix_mode()
            .map(|m| m & 0o777)
            .filter(|m| *m != 0)
            .unwrap_or(DEFAULT_FILE_MODE);

        let mut file =
            create_with_mode(&out_path, mode).map_err(|e| ArchiveError::filesystem(&out_path, e))?;
        io::copy(&mut entry, &mut file).map_err(|e| ArchiveError::filesystem(&out_path, e))?;
        summary.files += 1;
    }

    debug!(
        "extracted {} files and {} directories into {}",
        summary.files,
        summary.directories,
        target_dir.display()
    );
    Ok(summary)
}

/// Join an archive entry name onto `target_dir`, rejecting escapes
pub fn safe_join(target_dir: &Path, entry_name: &str) -> Result<PathBuf, ArchiveError> {
    let escape = || ArchiveError::PathTraversal {
        entry: entry_name.to_string(),
        target: target_dir.to_path_buf(),
    };

    let base = normalize(target_dir);
    let candidate = normalize(&target_dir.join(entry_name));

    let rest = candidate.strip_prefix(&base).map_err(|_| escape())?;
    let contained = rest.components().next().is_some()
        && rest.components().all(|c| matches!(c, Component::Normal(_)));
    if !contained {
        return Err(escape());
    }

    Ok(candidate)
}

/// Lexically normalise a path, resolving `.` and `..` without touching disk
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(unix)]
fn create_with_mode(path: &Path, mode: u32) -> io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)?;
    // umask applies on create and existing files keep their old bits
    file.set_permissions(fs::Permissions::from_mode(mode))?;
    Ok(file)
}

#[cfg(not(unix))]
fn create_with_mode(path: &Path, _mode: u32) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
