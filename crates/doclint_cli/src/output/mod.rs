//! Output formatting module

mod json;
mod text;

use miette::Result;

use doclint_core::{FixMode, LintReport};

use crate::cli::OutputFormat;

pub fn output_report(report: &LintReport, format: OutputFormat, fix_mode: FixMode) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_json(report)?,
        OutputFormat::Text => text::output_text(report, fix_mode),
    }

    // Failures go to stderr in both formats so JSON on stdout stays clean
    if !report.failures.is_empty() {
        eprintln!("\n{} file(s) failed to lint:", report.failures.len());
        for failure in &report.failures {
            eprintln!("  {}: {}", failure.path.display(), failure.error);
        }
    }

    if !report.rule_faults.is_empty() {
        eprintln!("\n{} rule fault(s):", report.rule_faults.len());
        for fault in &report.rule_faults {
            eprintln!(
                "  {}: [{}] {}",
                fault.path.display(),
                fault.rule_id,
                fault.message
            );
        }
    }

    Ok(())
}
