//! File system path committer.

use super::PathCommitter;
use crate::utils::fs;
use crate::Result;
use std::path::{Path, PathBuf};

/// Renames files on disk, tidying up directories the move leaves empty.
#[derive(Debug, Clone)]
pub struct FsCommitter {
    root: PathBuf,
}

impl FsCommitter {
    /// Directories are never pruned at or above `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PathCommitter for FsCommitter {
    fn commit(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename_file(from, to)?;
        tracing::debug!("Moved (rename): {:?} -> {:?}", from, to);

        if let Some(old_dir) = from.parent() {
            fs::prune_empty_dirs(old_dir, &self.root);
        }
        Ok(())
    }
}
