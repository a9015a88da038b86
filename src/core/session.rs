//! Interactive review session.
//!
//! [`ReviewSession`] holds the pure state of the one-by-one review: which
//! record is under review, which records are queued for commit, and how
//! control actions move between records. [`run_review`] drives it from a
//! [`Prompter`].

use crate::models::media::{EditBatch, MediaRecord};
use crate::services::terminal::Prompter;
use crate::utils::fs;
use crate::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Title answer meaning "copy the filename".
pub const COPY_FILENAME_TOKEN: &str = "\\";

/// What to do with a record's title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleEdit {
    Keep,
    /// Use the pending filename without its extension.
    CopyFilename,
    Set(String),
}

impl TitleEdit {
    pub fn parse(input: &str) -> Self {
        if input == COPY_FILENAME_TOKEN {
            TitleEdit::CopyFilename
        } else if input.trim().is_empty() {
            TitleEdit::Keep
        } else {
            TitleEdit::Set(input.to_string())
        }
    }
}

/// One review step's worth of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEdit {
    /// New target path, `None` to keep the pending one.
    pub path: Option<String>,
    pub title: TitleEdit,
}

impl RecordEdit {
    pub fn keep() -> Self {
        Self {
            path: None,
            title: TitleEdit::Keep,
        }
    }
}

/// Control action entered after editing a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Continue,
    Redo,
    Stop,
    Exit,
}

impl ControlAction {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "r" => ControlAction::Redo,
            "s" => ControlAction::Stop,
            "e" => ControlAction::Exit,
            _ => ControlAction::Continue,
        }
    }
}

/// Where the review goes after a control action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Review the same record again.
    Repeat,
    /// Move on to the next record.
    Next,
    /// Stop reviewing and confirm the queued edits.
    Confirm,
    /// Abandon the session without applying anything.
    Exit,
}

/// How a review session ended.
#[derive(Debug)]
pub enum ReviewOutcome {
    /// Review finished; the batch awaits confirmation.
    Proceed(EditBatch),
    /// The user exited; nothing is applied.
    Exited,
}

/// State of a one-by-one review.
#[derive(Debug)]
pub struct ReviewSession {
    root: PathBuf,
    records: Vec<MediaRecord>,
    position: usize,
    queued: Vec<usize>,
    update_count: usize,
    queued_this_pass: bool,
    finished: bool,
}

impl ReviewSession {
    /// Paths typed by the user are resolved against `root`.
    pub fn new(root: impl Into<PathBuf>, records: Vec<MediaRecord>) -> Self {
        Self {
            root: root.into(),
            records,
            position: 0,
            queued: Vec::new(),
            update_count: 0,
            queued_this_pass: false,
            finished: false,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Record under review, `None` once the review is over.
    pub fn current(&self) -> Option<&MediaRecord> {
        if self.finished {
            return None;
        }
        self.records.get(self.position)
    }

    /// 1-based index of the record under review.
    pub fn index(&self) -> usize {
        self.position + 1
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Number of records queued for commit.
    pub fn update_count(&self) -> usize {
        self.update_count
    }

    pub fn records(&self) -> &[MediaRecord] {
        &self.records
    }

    /// Apply the user's input to the record under review.
    ///
    /// Returns whether the record was queued. An invalid path aborts the
    /// session.
    pub fn edit_current(&mut self, edit: RecordEdit) -> Result<bool> {
        let root = self.root.clone();
        let Some(record) = self.current_mut() else {
            return Ok(false);
        };

        if let Some(input) = edit.path.as_deref().filter(|p| !p.trim().is_empty()) {
            let path = fs::normalize_path(&root, input)?;
            record.set_pending_path(path);
        }

        match edit.title {
            TitleEdit::Keep => {}
            TitleEdit::CopyFilename => {
                let stem = record.pending_stem();
                record.set_pending_title(stem);
            }
            TitleEdit::Set(title) => record.set_pending_title(title),
        }

        let dirty = record.is_dirty();
        if dirty && !self.queued_this_pass {
            self.queued.push(self.position);
            self.update_count += 1;
            self.queued_this_pass = true;
        }
        Ok(dirty)
    }

    /// Resolve the control action entered for the record under review.
    pub fn resolve(&mut self, action: ControlAction) -> Step {
        match action {
            ControlAction::Redo => {
                if self.queued_this_pass {
                    self.queued.pop();
                    self.update_count -= 1;
                    self.queued_this_pass = false;
                }
                if let Some(record) = self.current_mut() {
                    record.revert();
                }
                Step::Repeat
            }
            ControlAction::Exit => {
                tracing::debug!("Forced exit by user.");
                self.finished = true;
                Step::Exit
            }
            ControlAction::Stop => {
                self.finished = true;
                Step::Confirm
            }
            ControlAction::Continue => {
                self.position += 1;
                self.queued_this_pass = false;
                if self.position >= self.records.len() {
                    self.finished = true;
                    Step::Confirm
                } else {
                    Step::Next
                }
            }
        }
    }

    /// Hand over the queued records, in review order.
    pub fn into_batch(self) -> EditBatch {
        let mut records: Vec<Option<MediaRecord>> = self.records.into_iter().map(Some).collect();
        EditBatch::new(
            self.queued
                .into_iter()
                .filter_map(|i| records.get_mut(i).and_then(Option::take))
                .filter(MediaRecord::is_dirty)
                .collect(),
        )
    }

    fn current_mut(&mut self) -> Option<&mut MediaRecord> {
        if self.finished {
            return None;
        }
        self.records.get_mut(self.position)
    }
}

/// Drive a review session from user input.
pub fn run_review(session: &mut ReviewSession, prompter: &mut dyn Prompter) -> Result<Step> {
    while let Some(record) = session.current() {
        tracing::debug!("Processing file no. {}", session.index());

        println!(
            "{}",
            format!("File {} of {}", session.index(), session.total()).bold().cyan()
        );
        println!("  {} {}", "Path:".bold(), record.current_path().display());
        println!("  {} {}", "Filename:".bold(), record.current_filename());
        println!("  {} {}", "Video title:".bold(), record.current_title());

        let path = prompter.input("Enter the new video path (press ENTER to skip)")?;
        let title = prompter.input("Enter the new video title (press ENTER to skip, \\ to copy filename)")?;

        session.edit_current(RecordEdit {
            path: Some(path),
            title: TitleEdit::parse(&title),
        })?;

        let action = prompter.input("Press r to redo, s to stop processing, e to exit, ENTER to continue")?;

        match session.resolve(ControlAction::parse(&action)) {
            Step::Repeat => continue,
            Step::Next => prompter.clear_screen(),
            step @ (Step::Confirm | Step::Exit) => {
                prompter.clear_screen();
                return Ok(step);
            }
        }
    }

    Ok(Step::Confirm)
}

/// Review `records` one by one and return the edits to confirm.
pub fn review(
    root: &Path,
    records: Vec<MediaRecord>,
    prompter: &mut dyn Prompter,
) -> Result<ReviewOutcome> {
    let mut session = ReviewSession::new(root, records);
    match run_review(&mut session, prompter)? {
        Step::Exit => Ok(ReviewOutcome::Exited),
        _ => Ok(ReviewOutcome::Proceed(session.into_batch())),
    }
}
