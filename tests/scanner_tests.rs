//! Integration tests for the directory scanner.
//!
//! Tests cover:
//! - Empty directories
//! - Extension filtering
//! - Nested and hidden directories
//! - Error handling

mod common;

use common::{touch_all, FakeContainer};
use mkvedit::core::scanner::scan_directory;
use mkvedit::Error;
use std::path::PathBuf;
use tempfile::TempDir;

fn relative(root: &std::path::Path, videos: &[PathBuf]) -> Vec<PathBuf> {
    videos
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

#[test]
fn test_scan_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let result = scan_directory(temp_dir.path(), &FakeContainer::default()).unwrap();

    assert!(result.videos.is_empty());
    assert_eq!(result.total_files_scanned, 0);
    assert_eq!(result.total_dirs_scanned, 1);
}

#[test]
fn test_scan_only_matroska_files() {
    let temp_dir = TempDir::new().unwrap();
    touch_all(
        temp_dir.path(),
        &["movie.mkv", "movie.mp4", "notes.txt", "UPPER.MKV"],
    );

    let result = scan_directory(temp_dir.path(), &FakeContainer::default()).unwrap();

    assert_eq!(result.total_files_scanned, 4);
    assert_eq!(
        relative(temp_dir.path(), &result.videos),
        vec![PathBuf::from("UPPER.MKV"), PathBuf::from("movie.mkv")]
    );
}

#[test]
fn test_scan_nested_directories_grouped() {
    let temp_dir = TempDir::new().unwrap();
    touch_all(
        temp_dir.path(),
        &[
            "Season 2/02.mkv",
            "Season 1/02.mkv",
            "Season 1/01.mkv",
            "Season 2/01.mkv",
        ],
    );

    let result = scan_directory(temp_dir.path(), &FakeContainer::default()).unwrap();

    assert_eq!(
        relative(temp_dir.path(), &result.videos),
        vec![
            PathBuf::from("Season 1/01.mkv"),
            PathBuf::from("Season 1/02.mkv"),
            PathBuf::from("Season 2/01.mkv"),
            PathBuf::from("Season 2/02.mkv"),
        ]
    );
    assert!(result.videos.iter().all(|p| p.is_absolute()));
}

#[test]
fn test_scan_skips_hidden_entries() {
    let temp_dir = TempDir::new().unwrap();
    touch_all(
        temp_dir.path(),
        &["visible.mkv", ".hidden.mkv", ".trash/deleted.mkv"],
    );

    let result = scan_directory(temp_dir.path(), &FakeContainer::default()).unwrap();

    assert_eq!(
        relative(temp_dir.path(), &result.videos),
        vec![PathBuf::from("visible.mkv")]
    );
}

#[test]
fn test_scan_nonexistent_path() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");

    let result = scan_directory(&missing, &FakeContainer::default());
    assert!(matches!(result, Err(Error::PathNotFound(_))));
}

#[test]
fn test_scan_file_instead_of_directory() {
    let temp_dir = TempDir::new().unwrap();
    touch_all(temp_dir.path(), &["movie.mkv"]);

    let result = scan_directory(&temp_dir.path().join("movie.mkv"), &FakeContainer::default());
    assert!(matches!(result, Err(Error::NotADirectory(_))));
}
