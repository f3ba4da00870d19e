//! Linter configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::{LinterError, Severity};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// File names searched by [`LinterConfig::discover`], in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &[".doclint.jsonc", ".doclint.json"];

/// Contents written by `doclint init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"{
  // Directory linted when `doclint lint` is run without a target.
  "root": "pages",
  // Only files with these extensions are linted.
  "extensions": ["mdx"],
  "exclude": [],
  "rules": {
    "headings-sentence-case": {
      // Proper nouns and acronyms that keep their capitalization.
      "allowList": []
    }
  }
}
"#;

/// Configuration for the linter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinterConfig {
    /// Directory linted when no explicit target is given.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Extensions (without the dot) of files that are linted.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns a file must match to be linted.
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns that exclude a file.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether `.gitignore` files are honoured during discovery.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Whether hidden files and directories are linted.
    #[serde(default)]
    pub include_hidden: bool,

    /// Number of worker threads (0 = all CPUs, 1 = sequential).
    #[serde(default)]
    pub threads: usize,

    /// Per-rule configuration. Rules not listed run with their defaults.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleOption>,

    /// Directory containing the configuration file; relative paths resolve
    /// against it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_root() -> PathBuf {
    PathBuf::from("pages")
}

fn default_extensions() -> Vec<String> {
    vec!["mdx".to_string()]
}

fn default_true() -> bool {
    true
}

/// Configuration for a single rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RuleOption {
    /// Rule is enabled/disabled.
    Enabled(bool),
    /// Rule severity ("error", "warning", "off").
    Severity(String),
    /// Rule options object, optionally with a `severity` key.
    Options(serde_json::Value),
}

impl RuleOption {
    /// Returns whether the rule is enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            RuleOption::Enabled(enabled) => *enabled,
            RuleOption::Severity(s) => s != "off",
            RuleOption::Options(v) => v.get("severity").and_then(|s| s.as_str()) != Some("off"),
        }
    }

    /// Returns the configured severity, if any.
    pub fn severity(&self) -> Option<Severity> {
        let name = match self {
            RuleOption::Enabled(_) => None,
            RuleOption::Severity(s) => Some(s.as_str()),
            RuleOption::Options(v) => v.get("severity").and_then(|s| s.as_str()),
        };
        match name {
            Some("error") => Some(Severity::Error),
            Some("warning") => Some(Severity::Warning),
            _ => None,
        }
    }

    /// Returns the rule-specific options, without the `severity` key.
    pub fn options(&self) -> serde_json::Value {
        match self {
            RuleOption::Options(serde_json::Value::Object(map)) => {
                let mut map = map.clone();
                map.remove("severity");
                serde_json::Value::Object(map)
            }
            _ => serde_json::Value::Null,
        }
    }
}

impl LinterConfig {
    /// Creates a configuration with every default.
    pub fn new() -> Self {
        Self {
            root: default_root(),
            extensions: default_extensions(),
            include: Vec::new(),
            exclude: Vec::new(),
            respect_gitignore: true,
            include_hidden: false,
            threads: 0,
            rules: BTreeMap::new(),
            base_dir: None,
        }
    }

    /// Loads configuration from a `.jsonc` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LinterError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_json(&content)?;
        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from a JSON (comments allowed) string with
    /// schema validation.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        let value = jsonc_parser::parse_to_serde_value(json, &Default::default())
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(LinterError::config(format!(
                "Config validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Finds the nearest configuration file in `start` or its ancestors.
    pub fn discover(start: impl AsRef<Path>) -> Option<PathBuf> {
        start.as_ref().ancestors().find_map(|dir| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Returns the default lint target, resolved against `base_dir`.
    pub fn resolved_root(&self) -> PathBuf {
        match &self.base_dir {
            Some(base) if self.root.is_relative() => base.join(&self.root),
            _ => self.root.clone(),
        }
    }

    /// Returns the option entry for a rule, if configured.
    pub fn rule(&self, id: &str) -> Option<&RuleOption> {
        self.rules.get(id)
    }
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self::new()
    }
}
