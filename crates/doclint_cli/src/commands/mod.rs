//! Subcommand implementations

mod init;
mod lint;
mod rules;

pub use init::run_init;
pub use lint::run_lint;
pub use rules::run_rules;

/// How a command finished, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintStatus {
    /// Nothing left to fix; individual files may still have failed.
    Clean,
    /// Violations remain.
    Violations,
    /// Every candidate file failed.
    AllFailed,
}
