//! End-to-end tests for a full run over a real directory tree.
//!
//! Titles go through an in-memory container; renames hit the disk.

mod common;

use common::{touch_all, FakeContainer};
use mkvedit::cli::commands::run::{run_loop, run_once};
use mkvedit::models::config::{Mode, RunConfig};
use mkvedit::services::terminal::ScriptedPrompter;
use mkvedit::services::WriteStatus;
use tempfile::TempDir;

fn config_for(root: &std::path::Path, mode: Mode) -> RunConfig {
    RunConfig {
        root: Some(root.to_path_buf()),
        mode: Some(mode.to_string()),
        offsets: "False".to_string(),
        no_restart: true,
        ..Default::default()
    }
}

#[test]
fn test_single_mode_renames_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch_all(root, &["a.mkv"]);

    let container = FakeContainer::default().with_title(root.join("a.mkv"), "old");
    let mut prompter = ScriptedPrompter::new(["Show/E01.mkv", "\\", "", "y"]);

    run_once(&config_for(root, Mode::Single), &container, &mut prompter).unwrap();

    assert!(!root.join("a.mkv").exists());
    assert!(root.join("Show/E01.mkv").exists());
    assert_eq!(
        container.writes.borrow().as_slice(),
        &[(root.join("a.mkv"), "E01".to_string())]
    );
    assert_eq!(prompter.remaining(), 0);
}

#[test]
fn test_single_mode_exit_changes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch_all(root, &["a.mkv", "b.mkv"]);

    let container = FakeContainer::default();
    let mut prompter = ScriptedPrompter::new(["new.mkv", "New", "e"]);

    run_once(&config_for(root, Mode::Single), &container, &mut prompter).unwrap();

    assert!(root.join("a.mkv").exists());
    assert!(!root.join("new.mkv").exists());
    assert!(container.writes.borrow().is_empty());
}

#[test]
fn test_batch_mode_reorganizes_tree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch_all(root, &["s1/1.mkv", "s1/2.mkv", "s2/1.mkv"]);

    let mut config = config_for(root, Mode::Batch);
    config.title_pattern = Some("S{dir:02d}E{file:02d}".to_string());
    config.path_pattern = Some("Show/S{dir:02d}E{file:02d}.mkv".to_string());

    let container = FakeContainer::default();
    let mut prompter = ScriptedPrompter::new(["y"]);

    run_once(&config, &container, &mut prompter).unwrap();

    for name in ["S01E01.mkv", "S01E02.mkv", "S02E01.mkv"] {
        assert!(root.join("Show").join(name).exists(), "missing {}", name);
    }
    assert!(!root.join("s1").exists());
    assert!(!root.join("s2").exists());

    let titles: Vec<_> = container.writes.borrow().iter().map(|(_, t)| t.clone()).collect();
    assert_eq!(titles, vec!["S01E01", "S01E02", "S02E01"]);
}

#[test]
fn test_batch_mode_prompts_for_offsets() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch_all(root, &["d/1.mkv", "d/2.mkv"]);

    let mut config = config_for(root, Mode::Batch);
    config.offsets = "True".to_string();

    let container = FakeContainer::default();
    let mut prompter = ScriptedPrompter::new(["E{file}", "\\", "", "5", "y"]);

    run_once(&config, &container, &mut prompter).unwrap();

    let titles: Vec<_> = container.writes.borrow().iter().map(|(_, t)| t.clone()).collect();
    assert_eq!(titles, vec!["E5", "E6"]);
    assert!(root.join("d/1.mkv").exists());
}

#[test]
fn test_metadata_failure_leaves_files_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch_all(root, &["1.mkv", "2.mkv"]);

    let mut config = config_for(root, Mode::Batch);
    config.title_pattern = Some("E{file}".to_string());
    config.path_pattern = Some("E{file}.mkv".to_string());

    let container = FakeContainer::default()
        .with_outcome(root.join("1.mkv"), WriteStatus::Failure("locked".into()));
    let mut prompter = ScriptedPrompter::new(["y"]);

    let succeeded = run_loop(config, &container, &mut prompter).unwrap();

    assert!(!succeeded);
    assert!(root.join("1.mkv").exists());
    assert!(root.join("2.mkv").exists());
    assert_eq!(container.writes.borrow().len(), 1);
}

#[test]
fn test_invalid_mode_fails_the_run() {
    let temp_dir = TempDir::new().unwrap();
    touch_all(temp_dir.path(), &["a.mkv"]);

    let config = RunConfig {
        root: Some(temp_dir.path().to_path_buf()),
        no_restart: true,
        ..Default::default()
    };
    let mut prompter = ScriptedPrompter::new(["x"]);

    let succeeded = run_loop(config, &FakeContainer::default(), &mut prompter).unwrap();
    assert!(!succeeded);
}

#[test]
fn test_malformed_offset_fails_only_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch_all(root, &["1.mkv"]);

    let mut config = config_for(root, Mode::Batch);
    config.offsets = "(1,".to_string();
    config.title_pattern = Some("E{file}".to_string());
    config.path_pattern = Some("\\".to_string());

    let container = FakeContainer::default();
    let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

    let succeeded = run_loop(config, &container, &mut prompter).unwrap();

    assert!(!succeeded);
    assert!(container.writes.borrow().is_empty());
    assert!(root.join("1.mkv").exists());
}

#[test]
fn test_malformed_offset_then_restart() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch_all(root, &["1.mkv"]);

    let mut config = config_for(root, Mode::Batch);
    config.no_restart = false;
    config.offsets = "(1,".to_string();
    config.title_pattern = Some("E{file}".to_string());
    config.path_pattern = Some("\\".to_string());

    let mut prompter = ScriptedPrompter::new(["n"]);
    let succeeded = run_loop(config, &FakeContainer::default(), &mut prompter).unwrap();

    assert!(!succeeded);
    assert_eq!(prompter.prompts(), &["Restart? (y/n)".to_string()]);
}

#[test]
fn test_malformed_offset_ignored_in_single_mode() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch_all(root, &["a.mkv"]);

    let mut config = config_for(root, Mode::Single);
    config.offsets = "(1,".to_string();

    let container = FakeContainer::default();
    let mut prompter = ScriptedPrompter::new(["", "New", "", "y"]);

    let succeeded = run_loop(config, &container, &mut prompter).unwrap();

    assert!(succeeded);
    assert_eq!(container.writes.borrow().len(), 1);
}

#[test]
fn test_invalid_configured_mode_fails_the_run() {
    let temp_dir = TempDir::new().unwrap();
    touch_all(temp_dir.path(), &["a.mkv"]);

    let config = RunConfig {
        root: Some(temp_dir.path().to_path_buf()),
        mode: Some("x".to_string()),
        no_restart: true,
        ..Default::default()
    };
    let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

    let succeeded = run_loop(config, &FakeContainer::default(), &mut prompter).unwrap();
    assert!(!succeeded);
}

#[test]
fn test_restart_asks_for_directory_again() {
    let temp_dir = TempDir::new().unwrap();
    let config = RunConfig {
        root: Some(temp_dir.path().to_path_buf()),
        ..Default::default()
    };
    let path = temp_dir.path().to_string_lossy().to_string();
    let mut prompter = ScriptedPrompter::new(["y".to_string(), path, "n".to_string()]);

    let succeeded = run_loop(config, &FakeContainer::default(), &mut prompter).unwrap();

    assert!(succeeded);
    assert_eq!(
        prompter.prompts(),
        &[
            "Restart? (y/n)".to_string(),
            "Enter the directory path to the file(s)".to_string(),
            "Restart? (y/n)".to_string(),
        ]
    );
}

#[test]
fn test_missing_directory_fails_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let config = RunConfig {
        root: Some(temp_dir.path().join("missing")),
        no_restart: true,
        ..Default::default()
    };
    let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

    let succeeded = run_loop(config, &FakeContainer::default(), &mut prompter).unwrap();
    assert!(!succeeded);
}
