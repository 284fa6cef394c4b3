use crate::config::Config;
use crate::fix::Edit;
use crate::syntax::Block;
use crate::utils::LineIndex;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
/// Context passed to rules during analysis.
pub struct Context {
    /// Path to the file being analyzed.
    pub filename: PathBuf,
    /// Line index for accurate line/column mapping.
    pub line_index: LineIndex,
    /// Source text of the file.
    pub source: String,
}

#[derive(Debug, Clone, Serialize)]
/// A single issue found by a rule.
pub struct Finding {
    /// ID of the rule that triggered the finding.
    pub rule_id: String,
    /// Category of the rule.
    pub category: String,
    /// Severity level (e.g., "LOW", "MEDIUM").
    pub severity: String,
    /// Description of the issue.
    pub message: String,
    /// File where the issue was found.
    pub file: PathBuf,
    /// Line number.
    pub line: usize,
    /// Column number.
    pub col: usize,
    /// Last line covered by the finding.
    pub end_line: usize,
    /// Proposed replacement, if the rule can fix the issue.
    pub fix: Option<Edit>,
}

#[derive(Debug, Clone, Copy, Serialize)]
/// Metadata associated with a rule.
pub struct RuleMetadata {
    /// Unique code/ID of the rule.
    pub id: &'static str,
    /// Category of the rule.
    pub category: &'static str,
}

/// Trait defining a linting rule.
pub trait Rule: Send + Sync {
    /// Returns the descriptive name of the rule.
    fn name(&self) -> &'static str;
    /// Returns the unique code/ID of the rule.
    fn code(&self) -> &'static str {
        self.metadata().id
    }
    /// Returns the category/functional group of the rule.
    fn category(&self) -> &'static str {
        self.metadata().category
    }
    /// Returns the full metadata for the rule.
    fn metadata(&self) -> RuleMetadata;
    /// Called once for every statement list in the file.
    fn check_block(&mut self, _block: &Block, _context: &Context) -> Option<Vec<Finding>> {
        None
    }
}

/// Returns the rules enabled by the configuration.
#[must_use]
pub fn get_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = Vec::new();
    if !config.is_rule_ignored(ids::RULE_ID_DESTRUCTURING_MERGE, destructuring::RULE_NAME) {
        rules.push(Box::new(destructuring::DestructuringMergeRule::new(
            config.enabled_kinds(),
        )));
    }
    rules
}

/// Module containing the destructuring-merge rule.
pub mod destructuring;
/// Module containing rule ID constants.
pub mod ids;
