use crate::config::Config;
use crate::cst::{parse_source, CstError, Dialect};
use crate::rules::{get_rules, Context, Finding, Rule};
use crate::syntax::{Block, SourceFile};
use crate::utils::LineIndex;
use std::path::{Path, PathBuf};

/// Visitor that runs linter rules over every statement list of a file.
pub struct LinterVisitor {
    rules: Vec<Box<dyn Rule>>,
    context: Context,
    /// List of findings collected during the traversal.
    pub findings: Vec<Finding>,
}

impl LinterVisitor {
    /// Creates a new `LinterVisitor` with the given rules and context.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule>>, filename: PathBuf, source: &str) -> Self {
        Self {
            rules,
            context: Context {
                filename,
                line_index: LineIndex::new(source),
                source: source.to_owned(),
            },
            findings: Vec::new(),
        }
    }

    /// Visits a single statement list and applies rules.
    pub fn visit_block(&mut self, block: &Block) {
        for rule in &mut self.rules {
            if let Some(mut findings) = rule.check_block(block, &self.context) {
                self.findings.append(&mut findings);
            }
        }
    }

    /// Visits every statement list in the file.
    pub fn visit_file(&mut self, file: &SourceFile) {
        for block in &file.blocks {
            self.visit_block(block);
        }
    }

    /// Consumes the visitor, returning its findings in source order.
    #[must_use]
    pub fn into_findings(mut self) -> Vec<Finding> {
        self.findings
            .sort_by(|a, b| a.line.cmp(&b.line).then(a.col.cmp(&b.col)));
        self.findings
    }
}

/// Result of linting one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// File that was linted.
    pub path: PathBuf,
    /// Dialect the file was parsed as.
    pub dialect: Dialect,
    /// Findings in source order.
    pub findings: Vec<Finding>,
}

/// Parses, lowers and lints one file.
///
/// The dialect is chosen from the extension of `path`, defaulting to
/// JavaScript for unknown extensions.
///
/// # Errors
/// Returns error if the source cannot be parsed.
pub fn lint_source(source: &str, path: &Path, config: &Config) -> Result<FileReport, CstError> {
    let dialect = Dialect::from_path(path).unwrap_or(Dialect::JavaScript);
    let file = parse_source(source, dialect)?;
    let mut visitor = LinterVisitor::new(get_rules(config), path.to_path_buf(), source);
    visitor.visit_file(&file);
    Ok(FileReport {
        path: path.to_path_buf(),
        dialect,
        findings: visitor.into_findings(),
    })
}
