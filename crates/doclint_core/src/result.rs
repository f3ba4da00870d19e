//! Outcome types of a lint run.

use std::path::PathBuf;

use serde::Serialize;

use crate::{LinterError, Severity, Violation};

/// Violations found in one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    /// Path to the file.
    pub path: PathBuf,

    /// Violations, in rule invocation order.
    pub errors: Vec<Violation>,

    /// What happened to the fixes, when fixing was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<FixSummary>,
}

impl FileResult {
    pub fn new(path: impl Into<PathBuf>, errors: Vec<Violation>) -> Self {
        Self {
            path: path.into(),
            errors,
            fix: None,
        }
    }

    /// Returns true if any violations were found.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of violations carrying a fix.
    pub fn fixable_count(&self) -> usize {
        self.errors.iter().filter(|v| v.is_fixable()).count()
    }

    /// Number of violations with the given severity.
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.errors.iter().filter(|v| v.severity == severity).count()
    }

    /// Violations still present in the file on disk.
    pub fn remaining(&self) -> usize {
        match &self.fix {
            Some(summary) if summary.written => self.errors.len().saturating_sub(summary.applied),
            _ => self.errors.len(),
        }
    }
}

/// What the fixer did with one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FixSummary {
    /// Fixes applied to the content.
    pub applied: usize,
    /// Fixes dropped because they overlapped another fix.
    pub skipped: usize,
    /// Whether the fixed content was written back.
    pub written: bool,
}

/// A file that could not be linted.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: LinterError,
}

/// A rule that errored or panicked on a node; other rules still ran.
#[derive(Debug, Clone, Serialize)]
pub struct RuleFault {
    pub path: PathBuf,
    pub rule_id: String,
    pub message: String,
}

/// Aggregated outcome of linting a set of files.
#[derive(Debug, Default)]
pub struct LintReport {
    /// Number of candidate files the run attempted.
    pub files_checked: usize,
    /// Files with at least one violation, sorted by path.
    pub results: Vec<FileResult>,
    /// Files that failed to read, parse or fix, sorted by path.
    pub failures: Vec<FileFailure>,
    /// Rule errors and panics, sorted by path.
    pub rule_faults: Vec<RuleFault>,
}

impl LintReport {
    /// Total number of violations.
    pub fn violation_count(&self) -> usize {
        self.results.iter().map(|r| r.errors.len()).sum()
    }

    /// Total number of violations with the given severity.
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.results.iter().map(|r| r.count_severity(severity)).sum()
    }

    /// Violations left after fixes were written.
    pub fn remaining_violations(&self) -> usize {
        self.results.iter().map(FileResult::remaining).sum()
    }

    /// Returns true if every candidate file failed.
    pub fn all_failed(&self) -> bool {
        self.files_checked > 0 && self.failures.len() >= self.files_checked
    }
}
