//! The rule contract.

use std::path::Path;

use thiserror::Error;

use doclint_ast::{LineIndex, NodeType, SyntaxNode};

use crate::Violation;

/// Errors a rule can return instead of violations.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule was handed a node it cannot inspect.
    #[error("unexpected node type '{0}'")]
    UnexpectedNode(NodeType),

    /// The rule failed for another reason.
    #[error("{0}")]
    Failed(String),

    /// The rule panicked; the payload message is kept.
    #[error("panicked: {0}")]
    Panicked(String),
}

/// Everything a rule may look at besides the node itself.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Path of the file being linted.
    pub path: &'a Path,
    /// Full source text of the file.
    pub source: &'a str,
    /// Line table of `source`.
    pub lines: &'a LineIndex<'a>,
}

impl<'a> RuleContext<'a> {
    pub fn new(path: &'a Path, source: &'a str, lines: &'a LineIndex<'a>) -> Self {
        Self {
            path,
            source,
            lines,
        }
    }

    /// Returns the raw source text covered by a node.
    pub fn node_source(&self, node: &SyntaxNode<'_>) -> Option<&'a str> {
        self.source
            .get(node.span.start as usize..node.span.end as usize)
    }
}

/// A content rule run against top-level syntax nodes.
///
/// Rules must be pure: the same node and context always produce the same
/// violations, and nothing is shared between invocations. This lets the
/// engine run them for many files at once.
pub trait Rule: Send + Sync {
    /// Stable identifier used in configuration and reports.
    fn id(&self) -> &str;

    /// One-line description for `doclint rules`.
    fn description(&self) -> &str;

    /// Node types this rule is registered for by default.
    fn node_types(&self) -> &[NodeType];

    /// Inspects `node` and returns every violation found in it.
    fn run(
        &self,
        node: &SyntaxNode<'_>,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Violation>, RuleError>;
}
