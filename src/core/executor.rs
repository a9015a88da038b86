//! Edit executor module.
//!
//! Commits a confirmed [`EditBatch`] in two ordered passes:
//! - metadata: write every changed title while files are still at their
//!   original paths
//! - rename: move every file whose path changed
//!
//! A metadata failure stops everything; a rename failure stops the
//! remaining renames. Warnings are logged and the edit still counts.

use crate::models::media::EditBatch;
use crate::services::terminal::Prompter;
use crate::services::{MetadataWriter, PathCommitter, WriteStatus};
use crate::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Counts from one apply run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    /// Titles written (including those written with warnings).
    pub titles_written: usize,
    /// Titles written with a warning.
    pub warnings: usize,
    /// Files renamed or moved.
    pub renamed: usize,
}

impl ApplyReport {
    /// Print summary.
    pub fn print_summary(&self) {
        println!("{}", "[Apply Summary]".bold().green());
        println!("  {} {}", "Titles written:".bold(), self.titles_written);
        println!("  {} {}", "Warnings:".bold(), self.warnings);
        println!("  {} {}", "Files renamed:".bold(), self.renamed);
    }
}

/// Result of the confirmation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The batch was empty; nothing was asked or run.
    NothingToApply,
    /// The user declined.
    Discarded,
    /// Edits were committed.
    Applied(ApplyReport),
}

/// Print what a batch is about to change.
pub fn print_preview(batch: &EditBatch) {
    println!(
        "{}",
        format!("About to apply changes to {} videos.", batch.len()).bold()
    );
    for record in batch.records() {
        println!("{}:", record.current_filename().bold());
        if record.title_changed() {
            println!(
                "  {} {} -> {}",
                "Title:".bold(),
                record.current_title().red(),
                record.pending_title().green()
            );
        }
        if record.path_changed() {
            println!("  {} {}", "Old path:".bold(), record.current_path().display());
            println!(
                "  {} {}",
                "New path:".bold(),
                record.pending_path().display().to_string().green()
            );
        }
    }
}

/// Commit every edit in `batch`.
///
/// Current fields of each record are updated as its edits land, so after
/// an error the batch shows exactly what was committed.
pub fn apply<W, C>(batch: &mut EditBatch, writer: &W, committer: &C) -> Result<ApplyReport>
where
    W: MetadataWriter + ?Sized,
    C: PathCommitter + ?Sized,
{
    let mut report = ApplyReport::default();
    if batch.is_empty() {
        return Ok(report);
    }

    let titles = batch.records().iter().filter(|r| r.title_changed()).count();
    let renames = batch.records().iter().filter(|r| r.path_changed()).count();
    tracing::info!(
        "Applying {} edits ({} titles, {} renames)",
        batch.len(),
        titles,
        renames
    );

    let pb = progress_bar((titles + renames) as u64);

    // Pass 1: metadata, at the pre-rename paths
    for record in batch.records_mut().iter_mut().filter(|r| r.title_changed()) {
        pb.set_message(record.current_filename().to_string());

        match writer.write_title(record.current_path(), record.pending_title()) {
            WriteStatus::Success => {
                record.commit_title();
                report.titles_written += 1;
            }
            WriteStatus::Warning(message) => {
                tracing::warn!("Metadata write warning: {}", message);
                tracing::warn!("{}", record.current_path().display());
                record.commit_title();
                report.titles_written += 1;
                report.warnings += 1;
            }
            WriteStatus::Failure(message) => {
                pb.abandon();
                tracing::error!("Metadata write failed: {}", message);
                tracing::error!("{}", record.current_path().display());
                return Err(Error::MetadataWriteFailed {
                    path: record.current_path().to_path_buf(),
                    message,
                });
            }
        }

        tracing::debug!("Applied change for video - {}", record.current_path().display());
        pb.inc(1);
    }

    // Pass 2: renames
    for record in batch.records_mut().iter_mut().filter(|r| r.path_changed()) {
        pb.set_message(record.current_filename().to_string());

        if let Err(e) = committer.commit(record.current_path(), record.pending_path()) {
            pb.abandon();
            tracing::error!("Failed to rename the file: {}", e);
            tracing::error!("{}", record.current_path().display());
            return Err(e);
        }

        record.commit_path();
        report.renamed += 1;
        tracing::debug!("Renamed video - {}", record.current_path().display());
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(report)
}

/// Preview `batch`, ask for confirmation, and apply it.
pub fn confirm_and_apply<W, C>(
    mut batch: EditBatch,
    prompter: &mut dyn Prompter,
    writer: &W,
    committer: &C,
) -> Result<ApplyOutcome>
where
    W: MetadataWriter + ?Sized,
    C: PathCommitter + ?Sized,
{
    if batch.is_empty() {
        println!("No changes to apply.");
        return Ok(ApplyOutcome::NothingToApply);
    }

    print_preview(&batch);
    let proceed = prompter.confirm("Continue? (y/n)")?;
    prompter.clear_screen();

    if !proceed {
        tracing::debug!("Changes discarded.");
        println!("Changes discarded.");
        return Ok(ApplyOutcome::Discarded);
    }

    let report = apply(&mut batch, writer, committer)?;
    println!(
        "{}",
        format!("[OK] Applied changes to {} videos.", batch.len()).green()
    );
    report.print_summary();

    Ok(ApplyOutcome::Applied(report))
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}
