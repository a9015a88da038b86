//! Media-related data models.

use crate::services::MetadataProbe;
use std::path::{Path, PathBuf};

/// Title used when a file's embedded title cannot be read.
pub const UNKNOWN_TITLE: &str = "N/A";

/// One discovered video file.
///
/// `current_*` fields mirror what is on disk. `pending_*` fields hold the
/// values the user (or the pattern planner) wants; they are committed by
/// [`crate::core::executor::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    current_path: PathBuf,
    current_filename: String,
    current_title: String,
    pending_path: PathBuf,
    pending_filename: String,
    pending_title: String,
}

impl MediaRecord {
    /// Create a record with a known title.
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        let path = path.into();
        let filename = file_name_of(&path);
        let title = title.into();

        Self {
            current_path: path.clone(),
            current_filename: filename.clone(),
            current_title: title.clone(),
            pending_path: path,
            pending_filename: filename,
            pending_title: title,
        }
    }

    /// Create a record, reading its current title through `probe`.
    ///
    /// A failed or empty probe is not an error: the title falls back to
    /// [`UNKNOWN_TITLE`].
    pub fn probe<P: MetadataProbe + ?Sized>(path: impl Into<PathBuf>, probe: &P) -> Self {
        let path = path.into();

        let title = match probe.probe_title(&path) {
            Ok(output) if output.success() => {
                tracing::debug!("{} probe for {:?}: {:?}", probe.name(), path, output.stdout);
                output
                    .first_line()
                    .map(str::to_string)
                    .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
            }
            Ok(output) => {
                tracing::warn!(
                    "{} failed to run correctly for {:?} (status {:?})",
                    probe.name(),
                    path,
                    output.status
                );
                UNKNOWN_TITLE.to_string()
            }
            Err(e) => {
                tracing::warn!("{} could not be run for {:?}: {}", probe.name(), path, e);
                UNKNOWN_TITLE.to_string()
            }
        };

        Self::new(path, title)
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn current_filename(&self) -> &str {
        &self.current_filename
    }

    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    pub fn pending_path(&self) -> &Path {
        &self.pending_path
    }

    pub fn pending_filename(&self) -> &str {
        &self.pending_filename
    }

    pub fn pending_title(&self) -> &str {
        &self.pending_title
    }

    /// Directory containing the file on disk.
    pub fn current_dir(&self) -> &Path {
        self.current_path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Pending filename without its extension.
    pub fn pending_stem(&self) -> String {
        Path::new(&self.pending_filename)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Set the pending path; the pending filename follows it.
    pub fn set_pending_path(&mut self, path: impl Into<PathBuf>) {
        self.pending_path = path.into();
        self.pending_filename = file_name_of(&self.pending_path);
    }

    pub fn set_pending_title(&mut self, title: impl Into<String>) {
        self.pending_title = title.into();
    }

    /// Drop any pending edit.
    pub fn revert(&mut self) {
        self.pending_path = self.current_path.clone();
        self.pending_filename = self.current_filename.clone();
        self.pending_title = self.current_title.clone();
    }

    pub fn title_changed(&self) -> bool {
        self.pending_title != self.current_title
    }

    pub fn path_changed(&self) -> bool {
        self.pending_path != self.current_path
    }

    /// Whether the record has anything to commit.
    pub fn is_dirty(&self) -> bool {
        self.title_changed() || self.path_changed()
    }

    /// Mark the pending title as written to the file.
    pub fn commit_title(&mut self) {
        self.current_title = self.pending_title.clone();
    }

    /// Mark the pending path as the file's location on disk.
    pub fn commit_path(&mut self) {
        self.current_path = self.pending_path.clone();
        self.current_filename = self.pending_filename.clone();
    }
}

/// Ordered set of dirty records for one confirm/apply cycle.
#[derive(Debug, Default)]
pub struct EditBatch {
    records: Vec<MediaRecord>,
}

impl EditBatch {
    pub fn new(records: Vec<MediaRecord>) -> Self {
        Self { records }
    }

    /// Keep only the dirty records, preserving order.
    pub fn from_dirty(records: impl IntoIterator<Item = MediaRecord>) -> Self {
        Self {
            records: records.into_iter().filter(MediaRecord::is_dirty).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MediaRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [MediaRecord] {
        &mut self.records
    }

    pub fn into_records(self) -> Vec<MediaRecord> {
        self.records
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
