//! Single mode: review and edit files one by one.

use crate::core::executor::{self, ApplyOutcome};
use crate::core::session::{self, ReviewOutcome};
use crate::services::terminal::Prompter;
use crate::services::{Container, PathCommitter};
use crate::Result;
use std::path::{Path, PathBuf};

/// Review every file, then confirm and apply the queued edits.
///
/// Returns `None` when the user exits the review.
pub fn process_individual<C, P>(
    root: &Path,
    videos: &[PathBuf],
    prompter: &mut dyn Prompter,
    container: &C,
    committer: &P,
) -> Result<Option<ApplyOutcome>>
where
    C: Container + ?Sized,
    P: PathCommitter + ?Sized,
{
    let records = super::run::load_records(videos, container);

    match session::review(root, records, prompter)? {
        ReviewOutcome::Exited => Ok(None),
        ReviewOutcome::Proceed(batch) => {
            executor::confirm_and_apply(batch, prompter, container, committer).map(Some)
        }
    }
}
