//! Rules command implementation

use miette::{IntoDiagnostic, Result};

use doclint_core::{RuleRegistry, builtin_rules};

use super::lint::load_config;
use crate::cli::Cli;

/// Lists every built-in rule with the node types it inspects and whether
/// the current configuration enables it.
pub fn run_rules(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let registry = RuleRegistry::from_config(&config).into_diagnostic()?;

    for rule in builtin_rules() {
        let enabled = registry.rules().iter().any(|r| r.id() == rule.id());
        let node_types: Vec<&str> = rule.node_types().iter().map(|t| t.as_str()).collect();
        let severity = registry
            .severity(rule.id())
            .map(|s| s.as_str())
            .unwrap_or("error");

        println!(
            "{:<28} {:<10} {:<8} {}",
            rule.id(),
            node_types.join(","),
            if enabled { severity } else { "off" },
            rule.description()
        );
    }

    Ok(())
}
