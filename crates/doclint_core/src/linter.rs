//! The lint engine: discovery, per-file linting in parallel, and fixing.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::fixer::{apply_fixes_to_content, write_fixed};
use crate::walker::{FileWalker, WalkConfig};
use crate::{
    FileFailure, FileResult, FixSummary, LintReport, LinterConfig, LinterError, RuleFault,
    RuleRegistry, SourceLint, Violation, file_linter,
};

/// What the engine does with fixes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FixMode {
    /// Report violations only; files are never written.
    #[default]
    Off,
    /// Apply fixes and write changed files.
    Apply,
    /// Compute fixes without writing them.
    DryRun,
}

/// Runs the registered rules over a set of files.
#[derive(Debug)]
pub struct Linter {
    config: LinterConfig,
    registry: RuleRegistry,
    walker: FileWalker,
    fix_mode: FixMode,
}

/// Everything learned about one file, merged into the report after the
/// parallel section.
struct FileOutcome {
    path: PathBuf,
    result: Option<FileResult>,
    failure: Option<LinterError>,
    faults: Vec<RuleFault>,
}

impl FileOutcome {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            result: None,
            failure: None,
            faults: Vec::new(),
        }
    }
}

impl Linter {
    /// Creates a linter with the built-in rules configured by `config`.
    pub fn new(config: LinterConfig) -> Result<Self, LinterError> {
        let registry = RuleRegistry::from_config(&config)?;
        Self::with_registry(config, registry)
    }

    /// Creates a linter with a caller-supplied registry.
    pub fn with_registry(config: LinterConfig, registry: RuleRegistry) -> Result<Self, LinterError> {
        let walker = FileWalker::new(WalkConfig::from_linter_config(&config))?;
        debug!("Linter created with {:?}", registry);
        Ok(Self {
            config,
            registry,
            walker,
            fix_mode: FixMode::Off,
        })
    }

    /// Sets the fix mode.
    pub fn with_fix_mode(mut self, fix_mode: FixMode) -> Self {
        self.fix_mode = fix_mode;
        self
    }

    pub fn config(&self) -> &LinterConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn fix_mode(&self) -> FixMode {
        self.fix_mode
    }

    /// Lints `target`, or the configured root when `None`.
    ///
    /// A missing target is an error; an existing target with no lintable
    /// files yields an empty report.
    pub fn lint(&self, target: Option<&Path>) -> Result<LintReport, LinterError> {
        let target = target
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.resolved_root());

        if !target.exists() {
            return Err(LinterError::file(format!(
                "Target not found: {}",
                target.display()
            )));
        }

        let files = self.walker.walk(&target);
        self.lint_files(&files)
    }

    /// Lints the given files in parallel.
    ///
    /// Paths without a configured extension are ignored. Each file is read,
    /// parsed and checked on its own; a failing file is recorded in the
    /// report and never affects the others.
    pub fn lint_files(&self, paths: &[PathBuf]) -> Result<LintReport, LinterError> {
        let candidates: Vec<&PathBuf> = paths
            .iter()
            .filter(|p| self.walker.has_supported_extension(p))
            .collect();

        let mut outcomes = self.in_pool(|| {
            candidates
                .par_iter()
                .map(|path| self.process_file(path))
                .collect::<Vec<_>>()
        })?;
        outcomes.sort_by(|a, b| a.path.cmp(&b.path));

        let mut report = LintReport {
            files_checked: candidates.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            if let Some(error) = outcome.failure {
                warn!("Failed to lint {}: {}", outcome.path.display(), error);
                report.failures.push(FileFailure {
                    path: outcome.path,
                    error,
                });
            }
            report.results.extend(outcome.result);
            report.rule_faults.extend(outcome.faults);
        }

        info!(
            "Linted {} files: {} violations, {} failures",
            report.files_checked,
            report.violation_count(),
            report.failures.len()
        );

        Ok(report)
    }

    /// Lints in-memory text as if it were the file at `path`.
    pub fn lint_source(&self, path: &Path, source: &str) -> Result<SourceLint, LinterError> {
        file_linter::lint_source(path, source, &self.registry)
    }

    /// Runs `op` on a dedicated pool when a thread count is configured.
    fn in_pool<T, F>(&self, op: F) -> Result<T, LinterError>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        if self.config.threads == 0 {
            return Ok(op());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
            .map_err(|e| LinterError::Internal(format!("Failed to build thread pool: {}", e)))?;
        Ok(pool.install(op))
    }

    fn process_file(&self, path: &Path) -> FileOutcome {
        debug!("Linting {}", path.display());
        let mut outcome = FileOutcome::new(path);

        let source = match file_linter::read_source(path) {
            Ok(source) => source,
            Err(e) => {
                outcome.failure = Some(e);
                return outcome;
            }
        };

        let lint = match self.lint_source(path, &source) {
            Ok(lint) => lint,
            Err(e) => {
                outcome.failure = Some(e);
                return outcome;
            }
        };

        outcome.faults = lint
            .faults
            .into_iter()
            .map(|(rule_id, message)| RuleFault {
                path: path.to_path_buf(),
                rule_id,
                message,
            })
            .collect();

        if lint.violations.is_empty() {
            return outcome;
        }

        let mut result = FileResult::new(path, lint.violations);
        if self.fix_mode != FixMode::Off {
            match self.fix_file(path, &source, &result.errors) {
                Ok(summary) => result.fix = Some(summary),
                Err(e) => outcome.failure = Some(e),
            }
        }
        outcome.result = Some(result);
        outcome
    }

    fn fix_file(
        &self,
        path: &Path,
        source: &str,
        violations: &[Violation],
    ) -> Result<FixSummary, LinterError> {
        let fixed = apply_fixes_to_content(source, violations)?;
        let written = match self.fix_mode {
            FixMode::Apply => write_fixed(path, &fixed)?,
            FixMode::Off | FixMode::DryRun => false,
        };

        Ok(FixSummary {
            applied: fixed.fixes_applied,
            skipped: fixed.fixes_skipped,
            written,
        })
    }
}
