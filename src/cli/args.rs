//! Command line argument definitions.

use crate::models::config::{OffsetMode, RunConfig};
use clap::Parser;
use std::path::PathBuf;

/// mkvedit - Batch edit Matroska titles and filenames
#[derive(Parser, Debug)]
#[command(name = "mkvedit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long)]
    pub skip_preflight: bool,

    /// Directory containing the file(s) to edit
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Processing mode: single (s) or batch (b)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Title pattern for batch edits, e.g. "Show S{dir:02d}E{file:02d}" (\ to skip)
    #[arg(short = 'x', long = "m-pattern", alias = "m_pattern", value_name = "PATTERN")]
    pub m_pattern: Option<String>,

    /// Path pattern for batch edits, e.g. "Show S{dir:02d}E{file:02d}.mkv" (\ to skip)
    #[arg(short = 'y', long = "f-pattern", alias = "f_pattern", value_name = "PATTERN")]
    pub f_pattern: Option<String>,

    /// Offsets: True (ask), False (start at 1), or "(dir, file)"
    #[arg(short, long, default_value = OffsetMode::PROMPT_LITERAL)]
    pub offset: String,

    /// Don't restart after a run is complete
    #[arg(short, long, alias = "no_restart")]
    pub no_restart: bool,
}

impl Cli {
    /// Settings for the first run.
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            root: self.path.clone(),
            mode: self.mode.clone(),
            title_pattern: self.m_pattern.clone(),
            path_pattern: self.f_pattern.clone(),
            offsets: self.offset.clone(),
            no_restart: self.no_restart,
        }
    }
}
