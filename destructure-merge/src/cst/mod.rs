//! CST (Concrete Syntax Tree) module for precise source mapping.
//!
//! This module provides Tree-sitter based CST parsing for:
//! - Precise byte-range extraction of declarations, patterns and initializers
//! - Lowering into the statement lists that rules inspect
//! - Re-parsing fixed output to verify it is still valid
//!
//! # Design Principles
//!
//! - **Byte-range anchored**: every lowered node keeps its exact source span
//! - **Broken input is not fixed**: trees with `ERROR`/`MISSING` nodes are rejected

mod lower;
mod parser;

pub use lower::lower;
pub use parser::{CstError, CstNode, CstParser, CstTree, Dialect, Point};

/// Parse `source` as `dialect` and lower it into statement lists.
///
/// # Errors
/// Returns error if the parser cannot be created or the source has syntax errors.
pub fn parse_source(
    source: &str,
    dialect: Dialect,
) -> Result<crate::syntax::SourceFile, CstError> {
    let mut parser = CstParser::new(dialect)?;
    let tree = parser.parse(source)?;
    Ok(lower(&tree))
}
