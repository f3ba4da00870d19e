//! Mapping from node types to the rules that inspect them.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use doclint_ast::NodeType;

use crate::rules::{BUILTIN_RULES, create_builtin};
use crate::{LinterConfig, LinterError, Rule, Severity};

/// Rules keyed by the node types they are registered for.
///
/// Registration order is kept: `lookup` returns rules in the order they were
/// added for that type, and the engine invokes them in that order.
#[derive(Default, Clone)]
pub struct RuleRegistry {
    by_type: HashMap<NodeType, Vec<Arc<dyn Rule>>>,
    rules: Vec<Arc<dyn Rule>>,
    severities: HashMap<String, Severity>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry of the built-in rules as configured.
    ///
    /// Unlisted rules are enabled with default options. Naming a rule that
    /// does not exist is a configuration error.
    pub fn from_config(config: &LinterConfig) -> Result<Self, LinterError> {
        if let Some(unknown) = config
            .rules
            .keys()
            .find(|id| !BUILTIN_RULES.contains(&id.as_str()))
        {
            return Err(LinterError::config(format!("Unknown rule '{}'", unknown)));
        }

        let mut registry = Self::new();
        for id in BUILTIN_RULES {
            let option = config.rule(id);
            if option.is_some_and(|o| !o.is_enabled()) {
                debug!("Rule '{}' is disabled", id);
                continue;
            }

            let options = option
                .map(|o| o.options())
                .unwrap_or(serde_json::Value::Null);
            let rule = create_builtin(id, &options)?;
            registry.register(rule);

            if let Some(severity) = option.and_then(|o| o.severity()) {
                registry.set_severity(id, severity);
            }
        }

        Ok(registry)
    }

    /// Registers a rule for every type in its [`Rule::node_types`].
    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        for node_type in rule.node_types() {
            self.by_type
                .entry(*node_type)
                .or_default()
                .push(Arc::clone(&rule));
        }
        self.remember(rule);
    }

    /// Registers a rule for one node type, regardless of its defaults.
    pub fn register_for(&mut self, node_type: NodeType, rule: Arc<dyn Rule>) {
        self.by_type
            .entry(node_type)
            .or_default()
            .push(Arc::clone(&rule));
        self.remember(rule);
    }

    fn remember(&mut self, rule: Arc<dyn Rule>) {
        if !self.rules.iter().any(|r| Arc::ptr_eq(r, &rule)) {
            self.rules.push(rule);
        }
    }

    /// Returns the rules registered for `node_type`, possibly none.
    pub fn lookup(&self, node_type: NodeType) -> &[Arc<dyn Rule>] {
        self.by_type
            .get(&node_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every registered rule, in registration order.
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// Overrides the severity of every violation a rule reports.
    pub fn set_severity(&mut self, rule_id: &str, severity: Severity) {
        self.severities.insert(rule_id.to_string(), severity);
    }

    /// Returns the configured severity override for a rule.
    pub fn severity(&self, rule_id: &str) -> Option<Severity> {
        self.severities.get(rule_id).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.id()).collect::<Vec<_>>(),
            )
            .field("severities", &self.severities)
            .finish()
    }
}
