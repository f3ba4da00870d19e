//! doclint CLI
//!
//! Linter for Markdown and MDX documentation.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{LintStatus, run_init, run_lint, run_rules};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(LintStatus::Clean) => ExitCode::SUCCESS,
        Ok(LintStatus::Violations) => ExitCode::from(1),
        Ok(LintStatus::AllFailed) => ExitCode::from(2),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<LintStatus> {
    match &cli.command {
        Commands::Lint {
            target,
            format,
            fix,
            dry_run,
        } => run_lint(&cli, target.as_deref(), *format, *fix, *dry_run),
        Commands::Init { force } => run_init(*force).map(|_| LintStatus::Clean),
        Commands::Rules => run_rules(&cli).map(|_| LintStatus::Clean),
    }
}
