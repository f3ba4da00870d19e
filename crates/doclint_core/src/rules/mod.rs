//! Built-in rules.

pub mod sentence_case;

use std::sync::Arc;

use crate::{LinterError, Rule};

pub use sentence_case::{HeadingsSentenceCase, SentenceCaseOptions};

/// Identifiers of every built-in rule, in registration order.
pub const BUILTIN_RULES: &[&str] = &[sentence_case::RULE_ID];

/// Creates a built-in rule from its JSON options (`null` for defaults).
pub fn create_builtin(id: &str, options: &serde_json::Value) -> Result<Arc<dyn Rule>, LinterError> {
    match id {
        sentence_case::RULE_ID => Ok(Arc::new(HeadingsSentenceCase::from_value(options)?)),
        _ => Err(LinterError::config(format!("Unknown rule '{}'", id))),
    }
}

/// Every built-in rule with default options.
pub fn builtin_rules() -> Vec<Arc<dyn Rule>> {
    BUILTIN_RULES
        .iter()
        .filter_map(|id| create_builtin(id, &serde_json::Value::Null).ok())
        .collect()
}
