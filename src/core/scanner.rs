//! Directory scanner module.
//!
//! Recursively collects the files a container claims, in an order that
//! keeps every directory's files next to each other.

use crate::services::Container;
use crate::utils::fs;
use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of scanning a directory.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Absolute, normalized scan root.
    pub root: PathBuf,
    /// Absolute paths of matching files, grouped by directory.
    pub videos: Vec<PathBuf>,
    /// Total files scanned.
    pub total_files_scanned: usize,
    /// Total directories scanned.
    pub total_dirs_scanned: usize,
}

/// Scan a directory for files handled by `container`.
///
/// Hidden files and directories are skipped. Results are sorted by parent
/// directory, then by file name.
pub fn scan_directory<C: Container + ?Sized>(path: &Path, container: &C) -> Result<ScanResult> {
    fs::ensure_directory(path)?;
    let root = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let root = fs::lexical_normalize(&root);

    let mut result = ScanResult {
        root: root.clone(),
        ..Default::default()
    };

    for entry in WalkDir::new(&root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !fs::is_hidden_below(&root, e.path()))
        .filter_map(|e| e.ok())
    {
        let entry_path = entry.path();

        if entry.file_type().is_dir() {
            result.total_dirs_scanned += 1;
        } else if entry.file_type().is_file() {
            result.total_files_scanned += 1;

            if container.supports(entry_path) {
                result.videos.push(entry_path.to_path_buf());
            }
        }
    }

    result
        .videos
        .sort_by(|a, b| (a.parent(), a.file_name()).cmp(&(b.parent(), b.file_name())));

    tracing::info!(
        "Scanned {} files in {} directories: {} videos",
        result.total_files_scanned,
        result.total_dirs_scanned,
        result.videos.len()
    );

    Ok(result)
}
