//! Batch pattern planner.
//!
//! Derives pending titles and paths for every record from numbering
//! templates. Records are walked directory by directory: the file counter
//! restarts and the directory counter advances each time the directory
//! changes.

use crate::core::pattern::{self, Template};
use crate::models::config::OffsetMode;
use crate::models::media::MediaRecord;
use crate::services::terminal::Prompter;
use crate::utils::fs;
use crate::{Error, Result};
use std::path::Path;

/// Running counters for one planning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternContext {
    pub directory_offset: i64,
    pub file_offset: i64,
    initial_file_offset: i64,
}

impl PatternContext {
    pub fn new(directory_offset: i64, file_offset: i64) -> Self {
        Self {
            directory_offset,
            file_offset,
            initial_file_offset: file_offset,
        }
    }

    /// Move on to the next directory.
    pub fn next_directory(&mut self) -> Result<()> {
        self.directory_offset = step(self.directory_offset, "directory")?;
        self.file_offset = self.initial_file_offset;
        Ok(())
    }

    /// Move on to the next file in the same directory.
    pub fn next_file(&mut self) -> Result<()> {
        self.file_offset = step(self.file_offset, "file")?;
        Ok(())
    }
}

fn step(counter: i64, name: &str) -> Result<i64> {
    counter
        .checked_add(1)
        .ok_or_else(|| Error::InvalidOffset(format!("{} counter overflows after {}", name, counter)))
}

impl Default for PatternContext {
    fn default() -> Self {
        Self::new(OffsetMode::DEFAULT_OFFSET, OffsetMode::DEFAULT_OFFSET)
    }
}

/// Title and path templates for a batch run. `None` leaves the field as is.
#[derive(Debug, Clone, Default)]
pub struct BatchPlan {
    pub title: Option<Template>,
    pub path: Option<Template>,
}

impl BatchPlan {
    /// Parse both templates; `\` skips a field.
    pub fn parse(title_pattern: &str, path_pattern: &str) -> Result<Self> {
        Ok(Self {
            title: pattern::parse_optional(title_pattern)?,
            path: pattern::parse_optional(path_pattern)?,
        })
    }

    /// Fill in pending values for `records`, in place.
    ///
    /// Rendered paths are resolved against `root`; an invalid one aborts
    /// the plan.
    pub fn apply(&self, records: &mut [MediaRecord], root: &Path, mut ctx: PatternContext) -> Result<()> {
        let mut previous_dir = None;

        for index in directory_order(records) {
            let record = &mut records[index];

            let dir = record.current_dir().to_path_buf();
            // Counters only advance when another record needs them
            match &previous_dir {
                Some(prev) if *prev != dir => {
                    ctx.next_directory()?;
                    tracing::debug!("Entering {:?} as directory {}", dir, ctx.directory_offset);
                }
                Some(_) => ctx.next_file()?,
                None => {}
            }
            previous_dir = Some(dir);

            if let Some(title) = &self.title {
                record.set_pending_title(title.render(ctx.directory_offset, ctx.file_offset));
            }
            if let Some(path) = &self.path {
                let rendered = path.render(ctx.directory_offset, ctx.file_offset);
                let target = fs::normalize_path(root, &rendered)?;
                record.set_pending_path(target);
            }
        }

        Ok(())
    }
}

/// Record indices with each directory's records contiguous.
///
/// Directories appear in the order they are first seen; records keep their
/// relative order within a directory.
pub fn directory_order(records: &[MediaRecord]) -> Vec<usize> {
    let mut groups: Vec<(&Path, Vec<usize>)> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let dir = record.current_dir();
        match groups.iter_mut().find(|(d, _)| *d == dir) {
            Some((_, members)) => members.push(index),
            None => groups.push((dir, vec![index])),
        }
    }

    groups.into_iter().flat_map(|(_, members)| members).collect()
}

/// Work out the starting offsets for a planning pass.
///
/// `literal` is the offset setting as given on the command line; a
/// malformed one is an `InvalidOffset` error.
pub fn resolve_offsets(literal: &str, prompter: &mut dyn Prompter) -> Result<PatternContext> {
    match literal.parse::<OffsetMode>()? {
        OffsetMode::Default => Ok(PatternContext::default()),
        OffsetMode::Fixed(dir, file) => Ok(PatternContext::new(dir, file)),
        OffsetMode::Prompt => {
            let dir = prompter.input("Enter directory offset (optional)")?;
            let file = prompter.input("Enter file offset (optional)")?;
            Ok(PatternContext::new(parse_offset(&dir)?, parse_offset(&file)?))
        }
    }
}

/// Parse one typed offset; blank means the default.
fn parse_offset(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(OffsetMode::DEFAULT_OFFSET);
    }
    trimmed
        .parse()
        .map_err(|_| Error::InvalidOffset(trimmed.to_string()))
}
