//! Merging consecutive object-destructuring declarations.
//!
//! ```text
//! const { a } = req;            const { a, cookies: { b, c } } = req;
//! const { b } = req.cookies; ->
//! const { c } = req.cookies;
//! ```
//!
//! A run is a maximal sequence of adjacent declarations in one statement
//! list that share a declaration kind and a reference. Each run of two or
//! more members produces one finding whose fix replaces the whole run.

pub mod planner;
pub mod source;
pub mod synthesize;

pub use planner::{plan_merge, MergePlan};
pub use source::{classify, Accessor, SourceExpr};
pub use synthesize::MergeShape;

use crate::fix::Edit;
use crate::rules::ids;
use crate::rules::{Context, Finding, Rule, RuleMetadata};
use crate::syntax::{Block, DeclarationKind};

/// Human-readable rule name, also accepted in the `ignore` list.
pub const RULE_NAME: &str = "destructuring-merge";
/// Message attached to every finding.
pub const MESSAGE: &str = "Merge destructuring declarations from the same object";
/// Category shared by style rules.
pub const CAT_STYLISTIC: &str = "Stylistic Issues";

const META_DESTRUCTURING_MERGE: RuleMetadata = RuleMetadata {
    id: ids::RULE_ID_DESTRUCTURING_MERGE,
    category: CAT_STYLISTIC,
};

/// Reports runs of destructuring declarations that can be merged into one.
#[derive(Debug, Clone)]
pub struct DestructuringMergeRule {
    kinds: Vec<DeclarationKind>,
}

impl DestructuringMergeRule {
    /// Creates the rule for the given declaration kinds.
    #[must_use]
    pub fn new(kinds: Vec<DeclarationKind>) -> Self {
        Self { kinds }
    }

    /// Declaration kinds that can start a run.
    #[must_use]
    pub fn kinds(&self) -> &[DeclarationKind] {
        &self.kinds
    }

    fn finding(plan: &MergePlan<'_>, context: &Context) -> Finding {
        let start = plan.range.start;
        let terminated = plan.last().is_some_and(|decl| decl.terminated);
        let replacement = if terminated {
            format!("{};", plan.replacement)
        } else {
            plan.replacement.clone()
        };
        Finding {
            rule_id: META_DESTRUCTURING_MERGE.id.to_owned(),
            category: META_DESTRUCTURING_MERGE.category.to_owned(),
            severity: "LOW".to_owned(),
            message: MESSAGE.to_owned(),
            file: context.filename.clone(),
            line: context.line_index.line_index(start),
            col: context.line_index.column_index(start),
            end_line: context.line_index.line_index(plan.range.end),
            fix: Some(Edit::with_description(
                plan.range.start,
                plan.range.end,
                replacement,
                format!("merge {} {} declarations", plan.len(), plan.kind),
            )),
        }
    }
}

impl Rule for DestructuringMergeRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn metadata(&self) -> RuleMetadata {
        META_DESTRUCTURING_MERGE
    }

    fn check_block(&mut self, block: &Block, context: &Context) -> Option<Vec<Finding>> {
        let mut findings = Vec::new();
        let mut index = 0;
        while index < block.statements.len() {
            // Members of a reported run are never reconsidered as starts.
            match plan_merge(&block.statements, index, &context.source, &self.kinds) {
                Some(plan) => {
                    tracing::debug!(
                        file = %context.filename.display(),
                        members = plan.len(),
                        shape = ?plan.shape,
                        "found mergeable destructuring run"
                    );
                    findings.push(Self::finding(&plan, context));
                    index += plan.len();
                }
                None => index += 1,
            }
        }
        if findings.is_empty() {
            None
        } else {
            Some(findings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::{parse_source, Dialect};
    use crate::utils::LineIndex;
    use std::path::PathBuf;

    fn check(source: &str, kinds: &[DeclarationKind]) -> Vec<Finding> {
        let file = parse_source(source, Dialect::JavaScript).unwrap();
        let context = Context {
            filename: PathBuf::from("test.js"),
            line_index: LineIndex::new(source),
            source: source.to_owned(),
        };
        let mut rule = DestructuringMergeRule::new(kinds.to_vec());
        file.blocks
            .iter()
            .filter_map(|block| rule.check_block(block, &context))
            .flatten()
            .collect()
    }

    #[test]
    fn test_reports_one_finding_per_run() {
        let source = "const { a } = req;\nconst { b } = req;\nconst { c } = req;\n";
        let findings = check(source, &DeclarationKind::ALL);
        assert_eq!(findings.len(), 1);
        let finding = &findings[0];
        assert_eq!(finding.rule_id, "DSM-001");
        assert_eq!(finding.message, MESSAGE);
        assert_eq!(finding.line, 1);
        assert_eq!(finding.col, 0);
        assert_eq!(finding.end_line, 3);
        let fix = finding.fix.as_ref().unwrap();
        assert_eq!(fix.replacement, "const { a, b, c } = req;");
        assert_eq!(fix.start_byte, 0);
        assert_eq!(fix.end_byte, source.trim_end().len());
    }

    #[test]
    fn test_no_terminator_without_semicolon() {
        let findings = check("let { a } = o.p\nlet { b } = o.p\n", &DeclarationKind::ALL);
        assert_eq!(
            findings[0].fix.as_ref().unwrap().replacement,
            "let { a, b } = o.p"
        );
    }

    #[test]
    fn test_separate_runs_in_one_block() {
        let source = "const { a } = req;\nconst { b } = req;\nfoo();\nlet { c } = res;\nlet { d } = res;\n";
        let findings = check(source, &DeclarationKind::ALL);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[1].line, 4);
    }

    #[test]
    fn test_runs_in_nested_blocks() {
        let source = "function f(req) {\n  const { a } = req;\n  const { b } = req;\n  if (a) {\n    const { c } = b;\n    const { d } = b;\n  }\n}\n";
        let findings = check(source, &DeclarationKind::ALL);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].col, 2);
        assert_eq!(findings[1].col, 4);
    }

    #[test]
    fn test_disabled_kinds_are_ignored() {
        let source = "var { a } = req;\nvar { b } = req;\n";
        assert!(check(source, &[DeclarationKind::Const]).is_empty());
        assert_eq!(check(source, &[DeclarationKind::Var]).len(), 1);
    }

    #[test]
    fn test_metadata() {
        let rule = DestructuringMergeRule::new(DeclarationKind::ALL.to_vec());
        assert_eq!(rule.name(), "destructuring-merge");
        assert_eq!(rule.code(), "DSM-001");
        assert_eq!(rule.category(), "Stylistic Issues");
    }
}
