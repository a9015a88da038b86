//! File system utilities.

use crate::{Error, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Replace a leading `~` with the home directory.
pub fn expand_tilde(input: &str) -> PathBuf {
    if input == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(input));
    }
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(input)
}

/// Resolve `.` and `..` components without touching the file system.
///
/// `..` never climbs above the root of an absolute path.
pub fn lexical_normalize(path: &Path) -> PathBuf {
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

/// Turn a user- or pattern-supplied target into an absolute file path.
///
/// Relative targets are resolved against `root`. The result must name a
/// file (it cannot end at a root or a `..`).
pub fn normalize_path(root: &Path, input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidPath("empty path".to_string()));
    }
    if trimmed.contains('\0') {
        return Err(Error::InvalidPath(format!("{:?} contains a NUL byte", trimmed)));
    }
    if trimmed.ends_with('/') || trimmed.ends_with(std::path::MAIN_SEPARATOR) {
        return Err(Error::InvalidPath(format!("{} names a directory", trimmed)));
    }

    let expanded = expand_tilde(trimmed);
    if !matches!(expanded.components().next_back(), Some(Component::Normal(_))) {
        return Err(Error::InvalidPath(format!("{} does not name a file", trimmed)));
    }

    let joined = if expanded.is_absolute() {
        expanded
    } else {
        root.join(expanded)
    };
    let normalized = lexical_normalize(&joined);

    let has_name = matches!(normalized.components().next_back(), Some(Component::Normal(_)));
    if !normalized.is_absolute() || !has_name {
        return Err(Error::InvalidPath(trimmed.to_string()));
    }

    Ok(normalized)
}

/// Rename a file, creating missing parent directories of the target.
///
/// An existing file at `to` is never overwritten.
pub fn rename_file(from: &Path, to: &Path) -> Result<()> {
    if from == to {
        return Ok(());
    }
    if to.exists() {
        return Err(Error::FileAlreadyExists(to.display().to_string()));
    }

    if let Some(parent) = to.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| Error::RenameFailed {
                path: from.to_path_buf(),
                source,
            })?;
        }
    }

    fs::rename(from, to).map_err(|source| Error::RenameFailed {
        path: from.to_path_buf(),
        source,
    })
}

/// Remove `dir` and its ancestors while they are empty, stopping at `stop_at`.
///
/// Returns the number of directories removed.
pub fn prune_empty_dirs(dir: &Path, stop_at: &Path) -> usize {
    let mut removed = 0;
    let mut current = Some(dir);

    while let Some(path) = current {
        if path == stop_at || !path.starts_with(stop_at) {
            break;
        }

        let is_empty = fs::read_dir(path)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);
        if !is_empty || fs::remove_dir(path).is_err() {
            break;
        }

        tracing::debug!("Removed empty directory: {:?}", path);
        removed += 1;
        current = path.parent();
    }

    removed
}

/// Check if any component of a path below `root` is hidden.
pub fn is_hidden_below(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .any(|c| matches!(c, Component::Normal(name) if name.to_string_lossy().starts_with('.')))
}
