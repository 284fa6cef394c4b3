//! Finding runs of mergeable destructuring declarations.

use super::source::{classify, SourceExpr};
use super::synthesize::{synthesize, MergeShape, PropertyBuckets};
use crate::syntax::{Declaration, DeclarationKind, ObjectPattern, Pattern, Statement, TextRange};

/// A declaration that has the shape required for merging.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a, 's> {
    /// The declaration statement
    pub declaration: &'a Declaration,
    /// Its object pattern
    pub pattern: &'a ObjectPattern,
    /// Its classified initializer, never `Unsupported`
    pub source: SourceExpr<'s>,
    /// Text shared by every member of a run
    pub reference: &'s str,
}

/// Check the shape of a statement: a single declarator binding an object
/// pattern, without a type annotation or comments, initialized from a
/// reference or a property access.
#[must_use]
pub fn candidate<'a, 's>(statement: &'a Statement, source: &'s str) -> Option<Candidate<'a, 's>> {
    let declaration = statement.as_declaration()?;
    // The whole statement is replaced, so any comment in it would be lost.
    if declaration.contains_comment {
        return None;
    }
    let declarator = declaration.single_declarator()?;
    let Pattern::Object(pattern) = &declarator.pattern else {
        return None;
    };
    if declarator.type_annotation.is_some() {
        return None;
    }
    let init = declarator.init.as_ref()?;
    let classified = classify(init, source);
    let reference = classified.reference_text()?;
    Some(Candidate {
        declaration,
        pattern,
        source: classified,
        reference,
    })
}

/// Scan forward from `first` over `rest`, collecting the maximal run of
/// compatible declarations. Stops at the first statement that does not fit.
#[must_use]
pub fn extend_run<'a, 's>(
    first: Candidate<'a, 's>,
    rest: &'a [Statement],
    source: &'s str,
) -> Vec<Candidate<'a, 's>> {
    let kind = first.declaration.kind;
    let reference = first.reference;
    let mut group = vec![first];
    for statement in rest {
        let Some(next) = candidate(statement, source) else {
            break;
        };
        if next.declaration.kind != kind || next.reference != reference {
            break;
        }
        group.push(next);
    }
    group
}

/// A merge of two or more adjacent declarations into one.
#[derive(Debug, Clone)]
pub struct MergePlan<'a> {
    /// Shared declaration kind
    pub kind: DeclarationKind,
    /// Merged declarations in source order
    pub members: Vec<&'a Declaration>,
    /// From the start of the first member to the end of the last
    pub range: TextRange,
    /// Which output form was synthesized
    pub shape: MergeShape,
    /// Replacement declaration, without a terminator
    pub replacement: String,
}

impl MergePlan<'_> {
    /// Number of merged declarations
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: a plan has at least two members
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The last merged declaration
    #[must_use]
    pub fn last(&self) -> Option<&Declaration> {
        self.members.last().copied()
    }
}

/// Plan a merge for the run starting at `statements[start]`.
///
/// Returns `None` when the statement cannot start a run, when the run has a
/// single member, or when the merged pattern would not be valid.
#[must_use]
pub fn plan_merge<'a>(
    statements: &'a [Statement],
    start: usize,
    source: &str,
    kinds: &[DeclarationKind],
) -> Option<MergePlan<'a>> {
    let first = candidate(statements.get(start)?, source)?;
    let kind = first.declaration.kind;
    if !kinds.contains(&kind) {
        return None;
    }

    let group = extend_run(first, statements.get(start + 1..)?, source);
    if group.len() < 2 {
        return None;
    }

    let buckets = PropertyBuckets::partition(&group, source);
    if !buckets.rest_elements_last() {
        tracing::debug!(
            start = first.declaration.range.start,
            "skipping merge that would place a rest element before other properties"
        );
        return None;
    }
    let (shape, replacement) = synthesize(kind, first.reference, &buckets);

    let members: Vec<&Declaration> = group.iter().map(|c| c.declaration).collect();
    let range = members
        .iter()
        .fold(first.declaration.range, |acc, decl| acc.cover(decl.range));

    Some(MergePlan {
        kind,
        members,
        range,
        shape,
        replacement,
    })
}
