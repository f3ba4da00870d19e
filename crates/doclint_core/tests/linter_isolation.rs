//! Integration tests for per-file isolation and fix modes.
//!
//! A broken file or a broken rule must only affect its own entry in the
//! report; every other file is linted as usual.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use doclint_ast::{NodeType, SyntaxNode};
use doclint_core::{
    FixMode, Linter, LinterConfig, LinterError, Rule, RuleContext, RuleError, RuleRegistry,
    Violation,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const TITLE_CASE: &str = "# Getting Started\n\nSome text.\n\n## Next Steps\n";

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn create_linter(mode: FixMode) -> Linter {
    Linter::new(LinterConfig::new())
        .expect("Failed to create linter")
        .with_fix_mode(mode)
}

struct CountingRule {
    calls: AtomicUsize,
}

impl Rule for CountingRule {
    fn id(&self) -> &str {
        "counting"
    }

    fn description(&self) -> &str {
        "counts calls"
    }

    fn node_types(&self) -> &[NodeType] {
        &[NodeType::Table]
    }

    fn run(&self, _: &SyntaxNode<'_>, _: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

struct PanicOnPath {
    needle: &'static str,
}

impl Rule for PanicOnPath {
    fn id(&self) -> &str {
        "panic-on-path"
    }

    fn description(&self) -> &str {
        "panics for one file"
    }

    fn node_types(&self) -> &[NodeType] {
        &[NodeType::Heading]
    }

    fn run(&self, node: &SyntaxNode<'_>, ctx: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        if ctx.path.to_string_lossy().contains(self.needle) {
            panic!("cannot handle {}", ctx.path.display());
        }
        Ok(vec![Violation::new(self.id(), "heading", node.loc.start)])
    }
}

#[test]
fn test_invalid_utf8_file_is_isolated() {
    let temp = TempDir::new().unwrap();
    let bad = write(temp.path(), "bad.mdx", &[b'#', b' ', 0xff, 0xfe, b'\n']);
    let good = write(temp.path(), "good.mdx", TITLE_CASE.as_bytes());

    let report = create_linter(FixMode::Off).lint(Some(temp.path())).unwrap();

    assert_eq!(report.files_checked, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, bad);
    assert!(matches!(report.failures[0].error, LinterError::File(_)));

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].path, good);
    assert_eq!(report.results[0].errors.len(), 2);
    assert!(!report.all_failed());
}

#[test]
fn test_mdx_parse_error_is_isolated() {
    let temp = TempDir::new().unwrap();
    let broken = write(temp.path(), "broken.mdx", b"# Title\n\n{unclosed\n");
    write(temp.path(), "good.mdx", TITLE_CASE.as_bytes());

    let report = create_linter(FixMode::Off).lint(Some(temp.path())).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, broken);
    assert!(matches!(report.failures[0].error, LinterError::Parse(_)));
    assert_eq!(report.violation_count(), 2);
}

#[test]
fn test_all_files_failing() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a.mdx", b"{oops\n");
    write(temp.path(), "b.mdx", &[0xc3, 0x28]);

    let report = create_linter(FixMode::Off).lint(Some(temp.path())).unwrap();

    assert_eq!(report.failures.len(), 2);
    assert!(report.all_failed());
}

#[test]
fn test_report_mode_never_writes() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "page.mdx", TITLE_CASE.as_bytes());

    let report = create_linter(FixMode::Off).lint(Some(temp.path())).unwrap();

    assert_eq!(report.violation_count(), 2);
    assert!(report.results[0].fix.is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), TITLE_CASE);
}

#[test]
fn test_fix_mode_rewrites_and_relint_is_clean() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "page.mdx", TITLE_CASE.as_bytes());

    let report = create_linter(FixMode::Apply).lint(Some(temp.path())).unwrap();
    assert_eq!(report.remaining_violations(), 0);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# Getting started\n\nSome text.\n\n## Next steps\n"
    );

    let again = create_linter(FixMode::Off).lint(Some(temp.path())).unwrap();
    assert_eq!(again.violation_count(), 0);
}

#[test]
fn test_unregistered_type_invokes_no_rule() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "page.mdx", TITLE_CASE.as_bytes());

    let rule = Arc::new(CountingRule {
        calls: AtomicUsize::new(0),
    });
    let mut registry = RuleRegistry::new();
    registry.register(rule.clone());

    let linter = Linter::with_registry(LinterConfig::new(), registry).unwrap();
    let report = linter.lint_files(&[path]).unwrap();

    assert_eq!(rule.calls.load(Ordering::SeqCst), 0);
    assert!(report.results.is_empty());
    assert!(report.failures.is_empty());
}

#[test]
fn test_panicking_rule_only_affects_its_file() {
    let temp = TempDir::new().unwrap();
    let cursed = write(temp.path(), "cursed.mdx", b"# One\n");
    let fine = write(temp.path(), "fine.mdx", b"# One\n\n# Two\n");

    let mut registry = RuleRegistry::new();
    registry.register(Arc::new(PanicOnPath { needle: "cursed" }));
    let linter = Linter::with_registry(LinterConfig::new(), registry).unwrap();

    let report = linter.lint_files(&[cursed.clone(), fine.clone()]).unwrap();

    assert_eq!(report.rule_faults.len(), 1);
    assert_eq!(report.rule_faults[0].path, cursed);
    assert_eq!(report.rule_faults[0].rule_id, "panic-on-path");
    assert!(report.failures.is_empty());

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].path, fine);
    assert_eq!(report.results[0].errors.len(), 2);
}

#[test]
fn test_config_file_drives_linter() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    fs::create_dir(&docs).unwrap();
    write(&docs, "page.md", b"# Deploy With Supabase\n");
    write(&docs, "skip.mdx", b"# Deploy With Supabase\n");
    write(
        temp.path(),
        ".doclint.jsonc",
        br#"{
            "root": "docs",
            "extensions": ["md"],
            "rules": {
                "headings-sentence-case": { "allowList": ["Supabase"], "severity": "warning" }
            }
        }"#,
    );

    let config_path = LinterConfig::discover(&docs).unwrap();
    let config = LinterConfig::from_file(config_path).unwrap();
    let report = Linter::new(config).unwrap().lint(None).unwrap();

    assert_eq!(report.files_checked, 1);
    assert_eq!(report.violation_count(), 1);
    let violation = &report.results[0].errors[0];
    assert!(violation.message.contains("\"With\""));
    assert_eq!(violation.severity, doclint_core::Severity::Warning);
}
