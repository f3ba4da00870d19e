//! # doclint_core
//!
//! Rule engine for doclint.
//!
//! This crate provides:
//! - The [`Rule`] contract and the [`RuleRegistry`] mapping node types to rules
//! - The built-in rules
//! - The [`Linter`] that discovers files and lints them in parallel
//! - The fixer that applies rule-provided fixes
//! - Configuration loading
//!
//! ## Example
//!
//! ```rust,ignore
//! use doclint_core::{FixMode, Linter, LinterConfig};
//!
//! let config = LinterConfig::from_file(".doclint.jsonc")?;
//! let linter = Linter::new(config)?.with_fix_mode(FixMode::Apply);
//!
//! let report = linter.lint(None)?;
//! for result in &report.results {
//!     println!("{}: {} issues", result.path.display(), result.errors.len());
//! }
//! ```

mod config;
mod error;
mod file_linter;
pub mod fixer;
mod linter;
mod registry;
mod result;
mod rule;
pub mod rules;
mod violation;
pub mod walker;

pub use config::{CONFIG_FILE_NAMES, DEFAULT_CONFIG_TEMPLATE, LinterConfig, RuleOption};
pub use error::LinterError;
pub use file_linter::{MAX_FILE_SIZE, SourceLint, lint_source, read_source};
pub use fixer::{FixerResult, apply_fixes_to_content, apply_fixes_to_file};
pub use linter::{FixMode, Linter};
pub use registry::RuleRegistry;
pub use result::{FileFailure, FileResult, FixSummary, LintReport, RuleFault};
pub use rule::{Rule, RuleContext, RuleError};
pub use rules::{BUILTIN_RULES, HeadingsSentenceCase, builtin_rules};
pub use violation::{Fix, Severity, Violation};

#[cfg(test)]
mod test_utils;
