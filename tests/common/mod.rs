//! Shared fakes for integration tests.

#![allow(dead_code)]

use mkvedit::services::{Container, MetadataProbe, MetadataWriter, PathCommitter, ToolOutput, WriteStatus};
use mkvedit::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory Matroska stand-in.
///
/// Titles live in a map keyed by path; write outcomes can be scripted per
/// path.
#[derive(Default)]
pub struct FakeContainer {
    pub titles: RefCell<HashMap<PathBuf, String>>,
    pub outcomes: HashMap<PathBuf, WriteStatus>,
    pub probes: RefCell<Vec<PathBuf>>,
    pub writes: RefCell<Vec<(PathBuf, String)>>,
}

impl FakeContainer {
    pub fn with_title(self, path: impl Into<PathBuf>, title: &str) -> Self {
        self.titles.borrow_mut().insert(path.into(), title.to_string());
        self
    }

    pub fn with_outcome(mut self, path: impl Into<PathBuf>, status: WriteStatus) -> Self {
        self.outcomes.insert(path.into(), status);
        self
    }
}

impl MetadataProbe for FakeContainer {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn probe_title(&self, path: &Path) -> std::io::Result<ToolOutput> {
        self.probes.borrow_mut().push(path.to_path_buf());
        Ok(ToolOutput {
            status: Some(0),
            stdout: self
                .titles
                .borrow()
                .get(path)
                .map(|t| format!("{}\n", t))
                .unwrap_or_default(),
            stderr: String::new(),
        })
    }
}

impl MetadataWriter for FakeContainer {
    fn write_title(&self, path: &Path, title: &str) -> WriteStatus {
        self.writes
            .borrow_mut()
            .push((path.to_path_buf(), title.to_string()));

        let status = self
            .outcomes
            .get(path)
            .cloned()
            .unwrap_or(WriteStatus::Success);
        if !matches!(status, WriteStatus::Failure(_)) {
            self.titles
                .borrow_mut()
                .insert(path.to_path_buf(), title.to_string());
        }
        status
    }
}

impl Container for FakeContainer {
    fn extensions(&self) -> Vec<String> {
        vec!["mkv".to_string()]
    }
}

/// Committer that only records what it was asked to do.
#[derive(Default)]
pub struct RecordingCommitter {
    pub calls: RefCell<Vec<(PathBuf, PathBuf)>>,
    pub fail_on: Option<PathBuf>,
}

impl PathCommitter for RecordingCommitter {
    fn commit(&self, from: &Path, to: &Path) -> Result<()> {
        if self.fail_on.as_deref() == Some(from) {
            return Err(mkvedit::Error::RenameFailed {
                path: from.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        self.calls
            .borrow_mut()
            .push((from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }
}

/// Create empty files below `root`.
pub fn touch_all(root: &Path, rel_paths: &[&str]) {
    for rel in rel_paths {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "fake video").unwrap();
    }
}
