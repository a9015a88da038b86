//! mkvedit CLI
//!
//! An interactive command-line tool for batch editing Matroska titles and filenames.

use clap::Parser;
use mkvedit::cli::{args::Cli, commands::run};
use mkvedit::models::config;
use mkvedit::preflight;
use mkvedit::services::matroska::Matroska;
use mkvedit::services::terminal::{Prompter, ScriptedPrompter, TerminalPrompter};
use std::io::IsTerminal;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let app_config = config::load_config();

    // Run preflight checks unless skipped
    if !cli.skip_preflight {
        run_preflight_checks(&app_config)?;
    }

    let container = Matroska::new(&app_config);
    let mut prompter = open_prompter()?;

    let succeeded = run::run_loop(cli.run_config(), &container, prompter.as_mut())?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Prompt on the terminal, or replay piped answers when stdin is not one.
fn open_prompter() -> anyhow::Result<Box<dyn Prompter>> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(Box::new(TerminalPrompter::new()));
    }

    tracing::info!("stdin is not a terminal, reading answers from it");
    Ok(Box::new(ScriptedPrompter::from_reader(stdin.lock())?))
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("mkvedit=debug")
    } else {
        EnvFilter::new("mkvedit=info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .without_time(),
        )
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
fn run_preflight_checks(app_config: &config::AppConfig) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(app_config);
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
