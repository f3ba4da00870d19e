//! Linting a single file.

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{debug, warn};

use doclint_ast::{AstArena, LineIndex, SyntaxNode};
use doclint_parser::parser_for_extension;

use crate::{LinterError, Rule, RuleContext, RuleError, RuleRegistry, Violation};

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Violations and rule faults from one source text.
#[derive(Debug, Default)]
pub struct SourceLint {
    /// Violations in rule invocation order.
    pub violations: Vec<Violation>,
    /// `(rule id, message)` for every rule that errored or panicked.
    pub faults: Vec<(String, String)>,
}

/// Reads a file as UTF-8, rejecting non-files and oversized files.
pub fn read_source(path: &Path) -> Result<String, LinterError> {
    let metadata = fs::metadata(path).map_err(|e| {
        LinterError::file(format!(
            "Failed to read metadata for {}: {}",
            path.display(),
            e
        ))
    })?;

    if !metadata.is_file() {
        return Err(LinterError::file(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(LinterError::file(format!(
            "File size exceeds limit of {} bytes: {}",
            MAX_FILE_SIZE,
            path.display()
        )));
    }

    fs::read_to_string(path)
        .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))
}

/// Parses `source` and runs the registered rules on each top-level node.
///
/// The parser is chosen from the extension of `path`. Only direct children
/// of the root are dispatched; rules descend into a node themselves. A rule
/// that errors or panics is recorded as a fault and the remaining rules
/// still run.
pub fn lint_source(
    path: &Path,
    source: &str,
    registry: &RuleRegistry,
) -> Result<SourceLint, LinterError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parser = parser_for_extension(extension);

    let arena = AstArena::with_capacity(source.len());
    let root = parser.parse(&arena, source)?;
    debug!(
        "Parsed {} with {} parser: {} top-level nodes",
        path.display(),
        parser.name(),
        root.children.len()
    );

    let lines = LineIndex::new(source);
    let ctx = RuleContext::new(path, source, &lines);
    let mut lint = SourceLint::default();

    for node in root.children {
        for rule in registry.lookup(node.node_type) {
            match run_rule(rule.as_ref(), node, &ctx) {
                Ok(found) => {
                    let severity = registry.severity(rule.id());
                    lint.violations.extend(found.into_iter().map(|v| match severity {
                        Some(severity) => v.with_severity(severity),
                        None => v,
                    }));
                }
                Err(e) => {
                    warn!(
                        "Rule '{}' failed on {} at {}: {}",
                        rule.id(),
                        path.display(),
                        node.loc.start,
                        e
                    );
                    lint.faults.push((rule.id().to_string(), e.to_string()));
                }
            }
        }
    }

    Ok(lint)
}

fn run_rule(
    rule: &dyn Rule,
    node: &SyntaxNode<'_>,
    ctx: &RuleContext<'_>,
) -> Result<Vec<Violation>, RuleError> {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.run(node, ctx))) {
        Ok(result) => result,
        Err(payload) => Err(RuleError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
