//! Applying violation fixes to source text.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use doclint_ast::LineIndex;

use crate::{Fix, LinterError, Violation};

/// Result of applying fixes to a file.
#[derive(Debug)]
pub struct FixerResult {
    /// Number of fixes applied.
    pub fixes_applied: usize,
    /// Number of fixes dropped because they overlapped an earlier one.
    pub fixes_skipped: usize,
    /// The fixed content.
    pub fixed_content: String,
    /// Whether the content differs from the input.
    pub modified: bool,
}

impl FixerResult {
    /// Creates a result indicating no changes were made.
    pub fn unchanged(content: String) -> Self {
        Self {
            fixes_applied: 0,
            fixes_skipped: 0,
            fixed_content: content,
            modified: false,
        }
    }
}

/// A fix with its positions turned into byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResolvedFix<'f> {
    start: usize,
    end: usize,
    text: &'f str,
}

impl ResolvedFix<'_> {
    fn overlaps(&self, other: &ResolvedFix<'_>) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }
}

/// Applies the fixes carried by `violations` to `content`.
///
/// Every fix is validated against `content` first; one fix pointing outside
/// the text fails the whole call and nothing is applied. Fixes are ordered
/// by start position (ties keep their reported order). A fix overlapping an
/// already accepted one is skipped. The survivors are applied from the end
/// of the text backwards so earlier offsets stay valid.
pub fn apply_fixes_to_content(
    content: &str,
    violations: &[Violation],
) -> Result<FixerResult, LinterError> {
    let fixes: Vec<&Fix> = violations.iter().filter_map(|v| v.fix.as_ref()).collect();

    if fixes.is_empty() {
        return Ok(FixerResult::unchanged(content.to_string()));
    }

    let lines = LineIndex::new(content);
    let mut resolved = fixes
        .iter()
        .map(|fix| resolve(&lines, fix))
        .collect::<Result<Vec<_>, _>>()?;

    // Stable: fixes at the same offset keep their reported order
    resolved.sort_by_key(|fix| (fix.start, fix.end));

    let total = resolved.len();
    let accepted = filter_overlapping_fixes(resolved);
    let skipped = total - accepted.len();

    let mut result = content.to_string();
    for fix in accepted.iter().rev() {
        debug!(
            "Applying fix: replace [{}..{}] with '{}'",
            fix.start, fix.end, fix.text
        );
        result.replace_range(fix.start..fix.end, fix.text);
    }

    let modified = result != content;
    Ok(FixerResult {
        fixes_applied: accepted.len(),
        fixes_skipped: skipped,
        fixed_content: result,
        modified,
    })
}

fn resolve<'f>(lines: &LineIndex<'_>, fix: &'f Fix) -> Result<ResolvedFix<'f>, LinterError> {
    let start = lines
        .offset(fix.start)
        .ok_or_else(|| LinterError::fix(format!("Fix start {} is outside the file", fix.start)))?;
    let end = lines
        .offset(fix.end)
        .ok_or_else(|| LinterError::fix(format!("Fix end {} is outside the file", fix.end)))?;

    if end < start {
        return Err(LinterError::fix(format!(
            "Fix end {} is before its start {}",
            fix.end, fix.start
        )));
    }

    Ok(ResolvedFix {
        start,
        end,
        text: &fix.text,
    })
}

/// Drops fixes overlapping an earlier accepted one.
///
/// `fixes` must be sorted by start ascending. Accepted fixes never overlap
/// each other, so the last accepted one has the largest end and is the only
/// one a candidate needs to be compared with.
fn filter_overlapping_fixes(fixes: Vec<ResolvedFix<'_>>) -> Vec<ResolvedFix<'_>> {
    let mut accepted: Vec<ResolvedFix<'_>> = Vec::with_capacity(fixes.len());

    for fix in fixes {
        match accepted.last() {
            Some(last) if fix.overlaps(last) => {
                warn!(
                    "Skipping overlapping fix at [{}, {}]; it conflicts with [{}, {}]",
                    fix.start, fix.end, last.start, last.end
                );
            }
            _ => accepted.push(fix),
        }
    }

    accepted
}

/// Applies fixes to a file on disk, writing it only if the content changed.
pub fn apply_fixes_to_file(
    path: &Path,
    violations: &[Violation],
) -> Result<FixerResult, LinterError> {
    let content = fs::read_to_string(path).map_err(|e| {
        LinterError::file(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let result = apply_fixes_to_content(&content, violations)?;
    write_fixed(path, &result)?;
    Ok(result)
}

/// Writes `result` back to `path` when it changed the content.
///
/// Returns whether the file was written.
pub(crate) fn write_fixed(path: &Path, result: &FixerResult) -> Result<bool, LinterError> {
    if !result.modified {
        return Ok(false);
    }

    fs::write(path, &result.fixed_content).map_err(|e| {
        LinterError::file(format!("Failed to write {}: {}", path.display(), e))
    })?;
    debug!(
        "Wrote {} fixes to {}",
        result.fixes_applied,
        path.display()
    );
    Ok(true)
}
