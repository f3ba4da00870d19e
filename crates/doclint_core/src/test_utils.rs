//! Rules used by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use doclint_ast::{NodeType, SyntaxNode};

use crate::{Rule, RuleContext, RuleError, Violation};

/// Reports one violation at the start of every node it sees.
pub struct FlagRule {
    id: String,
    types: [NodeType; 1],
}

impl FlagRule {
    pub fn new(id: &str, node_type: NodeType) -> Self {
        Self {
            id: id.to_string(),
            types: [node_type],
        }
    }
}

impl Rule for FlagRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "flags every node"
    }

    fn node_types(&self) -> &[NodeType] {
        &self.types
    }

    fn run(&self, node: &SyntaxNode<'_>, _: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        Ok(vec![Violation::new(&self.id, "flagged", node.loc.start)])
    }
}

/// Counts invocations and reports nothing.
pub struct CountingRule {
    id: String,
    types: [NodeType; 1],
    calls: AtomicUsize,
}

impl CountingRule {
    pub fn new(id: &str, node_type: NodeType) -> Self {
        Self {
            id: id.to_string(),
            types: [node_type],
            calls: AtomicUsize::new(0),
        }
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Rule for CountingRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "counts invocations"
    }

    fn node_types(&self) -> &[NodeType] {
        &self.types
    }

    fn run(&self, _: &SyntaxNode<'_>, _: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

/// Always returns an error.
pub struct FailingRule {
    id: String,
    types: [NodeType; 1],
}

impl FailingRule {
    pub fn new(id: &str, node_type: NodeType) -> Self {
        Self {
            id: id.to_string(),
            types: [node_type],
        }
    }
}

impl Rule for FailingRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "always fails"
    }

    fn node_types(&self) -> &[NodeType] {
        &self.types
    }

    fn run(&self, _: &SyntaxNode<'_>, _: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        Err(RuleError::Failed("broken rule".to_string()))
    }
}

/// Always panics.
pub struct PanickingRule {
    id: String,
    types: [NodeType; 1],
}

impl PanickingRule {
    pub fn new(id: &str, node_type: NodeType) -> Self {
        Self {
            id: id.to_string(),
            types: [node_type],
        }
    }
}

impl Rule for PanickingRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "always panics"
    }

    fn node_types(&self) -> &[NodeType] {
        &self.types
    }

    fn run(&self, _: &SyntaxNode<'_>, _: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        panic!("rule exploded")
    }
}
