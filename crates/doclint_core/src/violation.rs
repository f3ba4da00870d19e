//! Violation types produced by rules.

use serde::{Deserialize, Serialize};

use doclint_ast::Position;

/// Severity level for violations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    #[default]
    Error,
    /// Warning - should be reviewed.
    Warning,
}

impl Severity {
    /// Returns the lowercase name used in configuration and output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A rule failure at a specific location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The rule that reported this violation.
    pub rule_id: String,

    /// Human-readable message.
    pub message: String,

    /// Where the problem starts.
    pub location: Position,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// Replacement that corrects the problem, if the rule could compute one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl Violation {
    /// Creates a new violation without a fix.
    pub fn new(rule_id: impl Into<String>, message: impl Into<String>, location: Position) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
            location,
            severity: Severity::Error,
            fix: None,
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets an auto-fix.
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Returns true if this violation carries a fix.
    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }
}

/// Replace the text in `[start, end)` with `text`.
///
/// Positions use the same 1-indexed line/column space as
/// [`Violation::location`]; `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    /// First replaced character.
    pub start: Position,
    /// Position just past the last replaced character.
    pub end: Position,
    /// The replacement text.
    pub text: String,
}

impl Fix {
    /// Creates a fix replacing `[start, end)`.
    pub fn new(start: Position, end: Position, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Creates a fix replacing the single character at `start`.
    pub fn replace_char(start: Position, text: impl Into<String>) -> Self {
        Self::new(start, start.advance(1), text)
    }

    /// Creates a fix that inserts text at a position.
    pub fn insert(at: Position, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }
}
