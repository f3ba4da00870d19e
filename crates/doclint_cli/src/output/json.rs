//! JSON output formatter

use miette::{IntoDiagnostic, Result};

use doclint_core::LintReport;

pub fn output_json(report: &LintReport) -> Result<()> {
    let failures: Vec<_> = report
        .failures
        .iter()
        .map(|f| {
            serde_json::json!({
                "path": f.path.display().to_string(),
                "error": f.error.to_string(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "filesChecked": report.files_checked,
        "results": report.results,
        "failures": failures,
        "ruleFaults": report.rule_faults,
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
