//! Lowering from the tree-sitter CST to the statement-list model.
//!
//! Every `program` and `statement_block` node becomes one `Block`. Statements
//! that are not variable declarations keep only their range. Declarations
//! wrapped by other statements (`export const ...`, `for (const ...)`) are
//! not members of a statement list and are not lowered as declarations.

use super::parser::{CstNode, CstTree};
use crate::syntax::{
    Block, Declaration, DeclarationKind, Declarator, Expression, MemberExpression,
    MemberProperty, ObjectPattern, Pattern, SourceFile, Statement, TextRange,
};

/// Lower a parsed tree into its statement lists.
#[must_use]
pub fn lower(tree: &CstTree) -> SourceFile {
    let mut blocks = Vec::new();
    collect_blocks(&tree.root, &mut blocks);
    SourceFile {
        source: tree.source.clone(),
        blocks,
    }
}

fn range_of(node: &CstNode) -> TextRange {
    TextRange::new(node.start_byte, node.end_byte)
}

fn is_comment(node: &CstNode) -> bool {
    matches!(node.kind.as_str(), "comment" | "html_comment")
}

/// Comments are extras, so they can sit under any node, including trailing
/// an unterminated declaration.
fn has_comment(node: &CstNode) -> bool {
    let mut pending = vec![node];
    while let Some(current) = pending.pop() {
        if is_comment(current) {
            return true;
        }
        pending.extend(&current.children);
    }
    false
}

fn collect_blocks(node: &CstNode, blocks: &mut Vec<Block>) {
    if matches!(node.kind.as_str(), "program" | "statement_block") {
        blocks.push(lower_block(node));
    }
    for child in &node.children {
        collect_blocks(child, blocks);
    }
}

fn lower_block(node: &CstNode) -> Block {
    Block {
        range: range_of(node),
        statements: node.named_children().map(lower_statement).collect(),
    }
}

fn lower_statement(node: &CstNode) -> Statement {
    if is_comment(node) {
        return Statement::Comment(range_of(node));
    }
    match node.kind.as_str() {
        "lexical_declaration" | "variable_declaration" => lower_declaration(node)
            .map_or_else(|| Statement::Other(range_of(node)), Statement::Declaration),
        _ => Statement::Other(range_of(node)),
    }
}

fn declaration_kind(node: &CstNode) -> Option<DeclarationKind> {
    if node.kind == "variable_declaration" {
        return Some(DeclarationKind::Var);
    }
    let keyword = node
        .child_by_field("kind")
        .or_else(|| node.children.first())?;
    DeclarationKind::from_keyword(&keyword.kind)
}

fn lower_declaration(node: &CstNode) -> Option<Declaration> {
    let kind = declaration_kind(node)?;
    let declarators = node
        .named_children()
        .filter(|c| c.kind == "variable_declarator")
        .map(lower_declarator)
        .collect();
    // An automatic semicolon shows up as a zero-width `;` token.
    let terminated = node
        .children
        .last()
        .is_some_and(|c| c.kind == ";" && c.end_byte > c.start_byte);

    Some(Declaration {
        kind,
        declarators,
        range: range_of(node),
        terminated,
        contains_comment: has_comment(node),
    })
}

fn lower_declarator(node: &CstNode) -> Declarator {
    let pattern = match node.child_by_field("name") {
        Some(name) if name.kind == "object_pattern" => {
            Pattern::Object(ObjectPattern {
                range: range_of(name),
                properties: name
                    .named_children()
                    .filter(|c| !is_comment(c))
                    .map(range_of)
                    .collect(),
            })
        }
        Some(name) => Pattern::Other(range_of(name)),
        None => Pattern::Other(range_of(node)),
    };

    Declarator {
        pattern,
        type_annotation: node.child_by_field("type").map(range_of),
        init: node.child_by_field("value").map(lower_expression),
        range: range_of(node),
    }
}

fn is_optional_chain(node: &CstNode) -> bool {
    node.children.iter().any(|c| c.kind == "optional_chain")
}

fn lower_expression(node: &CstNode) -> Expression {
    let range = range_of(node);
    match node.kind.as_str() {
        "identifier" => Expression::Identifier(range),
        "super" => Expression::Super(range),
        "member_expression" => {
            let (Some(object), Some(property)) =
                (node.child_by_field("object"), node.child_by_field("property"))
            else {
                return Expression::Other(range);
            };
            let property = if property.kind == "private_property_identifier" {
                MemberProperty::Private(range_of(property))
            } else {
                MemberProperty::Named(range_of(property))
            };
            Expression::Member(MemberExpression {
                range,
                object: Box::new(lower_expression(object)),
                property,
                optional: is_optional_chain(node),
            })
        }
        "subscript_expression" => {
            let (Some(object), Some(index)) =
                (node.child_by_field("object"), node.child_by_field("index"))
            else {
                return Expression::Other(range);
            };
            Expression::Member(MemberExpression {
                range,
                object: Box::new(lower_expression(object)),
                property: MemberProperty::Computed(range_of(index)),
                optional: is_optional_chain(node),
            })
        }
        "parenthesized_expression" => {
            let mut inner = node.named_children().filter(|c| !is_comment(c));
            match (inner.next(), inner.next()) {
                (Some(only), None) => Expression::Parenthesized {
                    range,
                    inner: Box::new(lower_expression(only)),
                },
                _ => Expression::Other(range),
            }
        }
        _ => Expression::Other(range),
    }
}
