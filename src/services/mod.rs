//! External collaborators: metadata tools, the filesystem, the terminal.

pub mod matroska;
pub mod process;
pub mod rename;
pub mod terminal;

pub use process::ToolOutput;

use std::path::Path;

/// Reads the embedded title of a file.
pub trait MetadataProbe {
    /// Human-readable name of the underlying tool.
    fn name(&self) -> &'static str;

    /// Run the probe. `Err` means the tool could not be started at all.
    fn probe_title(&self, path: &Path) -> std::io::Result<ToolOutput>;
}

/// Outcome of a metadata write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStatus {
    /// Title written.
    Success,
    /// Title written, but the tool reported a warning.
    Warning(String),
    /// Title not written.
    Failure(String),
}

/// Writes the embedded title of a file.
pub trait MetadataWriter {
    fn write_title(&self, path: &Path, title: &str) -> WriteStatus;
}

/// A container format the editor can handle.
///
/// Implementations pair a probe and a writer with the extensions they
/// claim during discovery.
pub trait Container: MetadataProbe + MetadataWriter {
    /// Extensions (lowercase, without the dot) handled by this container.
    fn extensions(&self) -> Vec<String>;

    /// Check whether this container claims the given path.
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions().iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }
}

/// Moves a file to its new path.
pub trait PathCommitter {
    fn commit(&self, from: &Path, to: &Path) -> crate::Result<()>;
}
