//! Batch mode: derive titles and paths from numbering patterns.

use crate::core::executor::{self, ApplyOutcome};
use crate::core::planner::{self, BatchPlan};
use crate::models::config::RunConfig;
use crate::models::media::EditBatch;
use crate::services::terminal::Prompter;
use crate::services::{Container, PathCommitter};
use crate::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Plan every file from the patterns, then confirm and apply.
pub fn process_batch<C, P>(
    config: &RunConfig,
    root: &Path,
    videos: &[PathBuf],
    prompter: &mut dyn Prompter,
    container: &C,
    committer: &P,
) -> Result<ApplyOutcome>
where
    C: Container + ?Sized,
    P: PathCommitter + ?Sized,
{
    let title_pattern = match &config.title_pattern {
        Some(pattern) => pattern.clone(),
        None => {
            print_pattern_help("METADATA PATTERN", "Person of Interest S{dir:02d}E{file:02d}", "");
            prompter.input("Enter the metadata pattern (\\ to skip)")?
        }
    };
    tracing::debug!("Metadata pattern: {}", title_pattern);

    let path_pattern = match &config.path_pattern {
        Some(pattern) => pattern.clone(),
        None => {
            print_pattern_help(
                "FILE PATTERN",
                "Person of Interest S{dir:02d}E{file:02d}.mkv",
                "Pattern must translate to a valid path",
            );
            prompter.input("Enter the file pattern (\\ to skip)")?
        }
    };
    tracing::debug!("File pattern: {}", path_pattern);

    let plan = BatchPlan::parse(&title_pattern, &path_pattern)?;
    let mut records = super::run::load_records(videos, container);
    let ctx = planner::resolve_offsets(&config.offsets, prompter)?;

    plan.apply(&mut records, root, ctx)?;

    let batch = EditBatch::from_dirty(records);
    executor::confirm_and_apply(batch, prompter, container, committer)
}

fn print_pattern_help(heading: &str, example: &str, note: &str) {
    println!("{}", heading.cyan());
    println!("{{dir:d}} - directory based numbering, {{file:d}} - file based numbering");
    println!(
        "Example - {} -> {}",
        example,
        example.replace("{dir:02d}", "01").replace("{file:02d}", "01")
    );
    if !note.is_empty() {
        println!("{}", note);
    }
}
