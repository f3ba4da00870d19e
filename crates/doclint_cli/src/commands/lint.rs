//! Lint command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::info;

use doclint_core::{FixMode, LintReport, Linter, LinterConfig};

use super::LintStatus;
use crate::cli::{Cli, OutputFormat};
use crate::output::output_report;

pub fn run_lint(
    cli: &Cli,
    target: Option<&Path>,
    format: OutputFormat,
    fix: bool,
    dry_run: bool,
) -> Result<LintStatus> {
    let config = load_config(cli.config.as_deref())?;

    let fix_mode = match (fix, dry_run) {
        (false, _) => FixMode::Off,
        (true, false) => FixMode::Apply,
        (true, true) => FixMode::DryRun,
    };

    let linter = Linter::new(config).into_diagnostic()?.with_fix_mode(fix_mode);
    let report = linter.lint(target).into_diagnostic()?;

    output_report(&report, format, fix_mode)?;

    Ok(status(&report))
}

fn status(report: &LintReport) -> LintStatus {
    if report.all_failed() {
        LintStatus::AllFailed
    } else if report.remaining_violations() > 0 {
        LintStatus::Violations
    } else {
        LintStatus::Clean
    }
}

/// Loads the config given with `--config`, or the nearest one found from
/// the working directory, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<LinterConfig> {
    if let Some(path) = path {
        return LinterConfig::from_file(path).into_diagnostic();
    }

    let cwd = std::env::current_dir().into_diagnostic()?;
    if let Some(path) = LinterConfig::discover(&cwd) {
        info!("Using config: {}", path.display());
        return LinterConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(LinterConfig::new())
}
