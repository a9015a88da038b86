//! Run loop.
//!
//! One run asks for a directory, scans it, and hands the files to the
//! chosen mode. The loop offers to restart after every run, successful or
//! not; errors end the run, never the process.

use super::{batch, single};
use crate::core::executor::ApplyOutcome;
use crate::core::scanner;
use crate::models::config::{Mode, RunConfig};
use crate::models::media::MediaRecord;
use crate::services::rename::FsCommitter;
use crate::services::terminal::Prompter;
use crate::services::Container;
use crate::utils::fs;
use crate::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Run until the user stops restarting.
///
/// Returns whether the last run succeeded.
pub fn run_loop<C: Container + ?Sized>(
    mut config: RunConfig,
    container: &C,
    prompter: &mut dyn Prompter,
) -> Result<bool> {
    loop {
        let succeeded = match run_once(&config, container, prompter) {
            Ok(()) => true,
            Err(e) => {
                report_error(&e);
                false
            }
        };

        // Ask for the directory again on the next run
        config.root = None;

        if config.no_restart {
            return Ok(succeeded);
        }

        if prompter.confirm("Restart? (y/n)")? {
            tracing::debug!("Restarting...");
            prompter.clear_screen();
        } else {
            tracing::debug!("Exiting...");
            return Ok(succeeded);
        }
    }
}

/// Perform one run: pick a directory and mode, review, and apply.
pub fn run_once<C: Container + ?Sized>(
    config: &RunConfig,
    container: &C,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let input = match &config.root {
        Some(path) => path.to_string_lossy().to_string(),
        None => prompter.input("Enter the directory path to the file(s)")?,
    };
    let path = fs::expand_tilde(input.trim());

    let scan = scanner::scan_directory(&path, container)?;
    if scan.videos.is_empty() {
        println!(
            "{} {}",
            "[INFO] No video files found in".yellow(),
            scan.root.display()
        );
        return Ok(());
    }

    let mode: Mode = match &config.mode {
        Some(mode) => mode.parse()?,
        None => prompter.input("Single mode or batch mode? (s/b)")?.parse()?,
    };
    tracing::debug!("Running in {} mode on {:?}", mode, scan.root);
    prompter.clear_screen();

    let committer = FsCommitter::new(&scan.root);
    let outcome = match mode {
        Mode::Single => single::process_individual(
            &scan.root,
            &scan.videos,
            prompter,
            container,
            &committer,
        )?,
        Mode::Batch => Some(batch::process_batch(
            config,
            &scan.root,
            &scan.videos,
            prompter,
            container,
            &committer,
        )?),
    };

    let confirmed = matches!(
        outcome,
        Some(ApplyOutcome::Applied(_)) | Some(ApplyOutcome::Discarded)
    );
    if confirmed && !config.no_restart {
        prompter.pause("Press ENTER to continue")?;
    }

    Ok(())
}

/// Build a record for every file, reading current titles.
pub fn load_records<C: Container + ?Sized>(videos: &[PathBuf], container: &C) -> Vec<MediaRecord> {
    let pb = ProgressBar::new(videos.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} Reading titles [{bar:40.cyan/blue}] {pos}/{len}") {
        pb.set_style(style.progress_chars("=>-"));
    }

    let records = videos
        .iter()
        .map(|path| {
            let record = MediaRecord::probe(path.clone(), container);
            pb.inc(1);
            record
        })
        .collect();

    pb.finish_and_clear();
    records
}

fn report_error(error: &Error) {
    tracing::error!("{}", error);
    let banner = if error.is_fatal_to_run() {
        "[ERROR] Run aborted:"
    } else {
        "[ERROR] Operation aborted, no further changes were made:"
    };
    println!("{} {}", banner.bold().red(), error);
}
