//! Text output formatter

use doclint_core::{FixMode, LintReport, Severity};

pub fn output_text(report: &LintReport, fix_mode: FixMode) {
    for result in &report.results {
        println!("\n{}:", result.path.display());
        for violation in &result.errors {
            println!(
                "  {} {} [{}]: {}",
                violation.location,
                violation.severity.as_str(),
                violation.rule_id,
                violation.message
            );
        }
    }

    println!();
    println!(
        "Checked {} files, found {} issues ({} errors, {} warnings)",
        report.files_checked,
        report.violation_count(),
        report.count_severity(Severity::Error),
        report.count_severity(Severity::Warning),
    );

    if fix_mode != FixMode::Off {
        output_fix_summary(report, fix_mode == FixMode::DryRun);
    }
}

fn output_fix_summary(report: &LintReport, dry_run: bool) {
    let fixed: Vec<_> = report
        .results
        .iter()
        .filter_map(|r| r.fix.filter(|f| f.applied > 0).map(|f| (&r.path, f)))
        .collect();

    if fixed.is_empty() {
        println!("No fixable issues found.");
        return;
    }

    let total: usize = fixed.iter().map(|(_, f)| f.applied).sum();
    let action = if dry_run { "Would fix" } else { "Fixed" };
    println!("\n{} {} issues in {} files:", action, total, fixed.len());
    for (path, summary) in &fixed {
        if summary.skipped > 0 {
            println!(
                "  {}: {} fixes ({} overlapping skipped)",
                path.display(),
                summary.applied,
                summary.skipped
            );
        } else {
            println!("  {}: {} fixes", path.display(), summary.applied);
        }
    }

    if dry_run {
        println!("\nRun without --dry-run to apply fixes.");
    }
}
