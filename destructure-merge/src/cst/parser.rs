//! Tree-sitter based CST parser for JavaScript and TypeScript source code.
//!
//! Provides precise byte-range information for safe code rewriting.

use std::path::Path;
use tree_sitter::{Parser, TreeCursor};

/// Deepest CST accepted from the parser.
pub const MAX_NESTING_DEPTH: usize = 1024;

/// A point in source code (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Zero-indexed row number
    pub row: usize,
    /// Zero-indexed column (byte offset within line)
    pub column: usize,
}

impl From<tree_sitter::Point> for Point {
    fn from(p: tree_sitter::Point) -> Self {
        Self {
            row: p.row,
            column: p.column,
        }
    }
}

/// Source dialect, which selects the tree-sitter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `.js`, `.mjs`, `.cjs`, `.jsx`
    JavaScript,
    /// `.ts`, `.mts`, `.cts`
    TypeScript,
    /// `.tsx`
    Tsx,
}

impl Dialect {
    /// Pick the dialect from a file extension.
    ///
    /// Returns `None` for files this tool does not handle.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "js" | "mjs" | "cjs" | "jsx" => Some(Self::JavaScript),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Whether this is one of the TypeScript dialects
    #[must_use]
    pub const fn is_typescript(self) -> bool {
        matches!(self, Self::TypeScript | Self::Tsx)
    }

    fn language(self) -> tree_sitter::Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// A CST node with exact source location
#[derive(Debug, Clone)]
pub struct CstNode {
    /// Node kind (e.g., "lexical_declaration", "identifier")
    pub kind: String,
    /// Field name under which the parent holds this node (e.g., "value")
    pub field: Option<&'static str>,
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Start point (row, column)
    pub start_point: Point,
    /// End point (row, column)
    pub end_point: Point,
    /// Whether this is a named node (vs anonymous like punctuation)
    pub is_named: bool,
    /// Whether this node is an `ERROR` node or was inserted by error recovery
    pub is_error: bool,
    /// Child nodes
    pub children: Vec<CstNode>,
}

impl CstNode {
    /// The node under the cursor, without children.
    fn shallow(cursor: &TreeCursor<'_>) -> Self {
        let node = cursor.node();
        Self {
            kind: node.kind().to_owned(),
            field: cursor.field_name(),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_point: node.start_position().into(),
            end_point: node.end_position().into(),
            is_named: node.is_named(),
            is_error: node.is_error() || node.is_missing(),
            children: Vec::new(),
        }
    }

    /// Copy the subtree under the cursor.
    ///
    /// Walks with an explicit stack of unfinished ancestors, so deep input
    /// cannot exhaust the thread stack here. Trees nested deeper than
    /// [`MAX_NESTING_DEPTH`] are rejected, which also bounds the recursive
    /// passes that run over the copy later.
    fn from_cursor(cursor: &mut TreeCursor<'_>) -> Result<Self, CstError> {
        let mut open = vec![Self::shallow(cursor)];
        loop {
            if cursor.goto_first_child() {
                if open.len() >= MAX_NESTING_DEPTH {
                    return Err(CstError::TooDeep {
                        line: cursor.node().start_position().row + 1,
                        limit: MAX_NESTING_DEPTH,
                    });
                }
                open.push(Self::shallow(cursor));
                continue;
            }
            // The node under the cursor is complete; close it and every
            // ancestor that has no further children.
            while let Some(done) = open.pop() {
                let Some(parent) = open.last_mut() else {
                    return Ok(done);
                };
                parent.children.push(done);
                if cursor.goto_next_sibling() {
                    open.push(Self::shallow(cursor));
                    break;
                }
                cursor.goto_parent();
            }
        }
    }

    /// Check if this node's range contains the given byte offset
    #[must_use]
    pub fn contains_byte(&self, byte: usize) -> bool {
        byte >= self.start_byte && byte < self.end_byte
    }

    /// First child held under the given field name
    #[must_use]
    pub fn child_by_field(&self, field: &str) -> Option<&CstNode> {
        self.children.iter().find(|c| c.field == Some(field))
    }

    /// Named children (skipping punctuation and keywords)
    pub fn named_children(&self) -> impl Iterator<Item = &CstNode> {
        self.children.iter().filter(|c| c.is_named)
    }

    /// Find all nodes of a specific kind
    #[must_use]
    pub fn find_by_kind(&self, kind: &str) -> Vec<&CstNode> {
        let mut result = Vec::new();
        self.find_by_kind_recursive(kind, &mut result);
        result
    }

    fn find_by_kind_recursive<'a>(&'a self, kind: &str, result: &mut Vec<&'a CstNode>) {
        if self.kind == kind {
            result.push(self);
        }
        for child in &self.children {
            child.find_by_kind_recursive(kind, result);
        }
    }

    /// First error or missing node in pre-order
    #[must_use]
    pub fn first_error(&self) -> Option<&CstNode> {
        if self.is_error {
            return Some(self);
        }
        self.children.iter().find_map(CstNode::first_error)
    }
}

/// A parsed CST tree
#[derive(Debug)]
pub struct CstTree {
    /// Root node of the CST
    pub root: CstNode,
    /// Original source code
    pub source: String,
    /// Dialect the source was parsed as
    pub dialect: Dialect,
}

impl CstTree {
    /// Extract a slice of source code by byte range
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        self.source.get(start..end).unwrap_or_default()
    }

    /// Find all statement blocks (function bodies, `{ ... }` blocks)
    #[must_use]
    pub fn find_statement_blocks(&self) -> Vec<&CstNode> {
        self.root.find_by_kind("statement_block")
    }
}

/// Error during CST parsing
#[derive(Debug, thiserror::Error)]
pub enum CstError {
    /// Failed to create parser
    #[error("Failed to create CST parser: {0}")]
    ParserCreation(String),
    /// Failed to parse source
    #[error("Failed to parse source as {0:?}")]
    ParseFailed(Dialect),
    /// Source parsed with error recovery
    #[error("Syntax error at line {line}, column {column}")]
    Syntax {
        /// One-indexed line of the first error
        line: usize,
        /// One-indexed column of the first error
        column: usize,
    },
    /// Source nested deeper than the parser accepts
    #[error("Nesting deeper than {limit} levels at line {line}")]
    TooDeep {
        /// One-indexed line where the limit was reached
        line: usize,
        /// The depth limit
        limit: usize,
    },
}

/// Tree-sitter based CST parser
pub struct CstParser {
    parser: Parser,
    dialect: Dialect,
}

impl CstParser {
    /// Create a new CST parser for the given dialect
    ///
    /// # Errors
    /// Returns error if parser creation fails
    pub fn new(dialect: Dialect) -> Result<Self, CstError> {
        let mut parser = Parser::new();

        parser
            .set_language(&dialect.language())
            .map_err(|e| CstError::ParserCreation(e.to_string()))?;

        Ok(Self { parser, dialect })
    }

    /// Parse source code into a CST
    ///
    /// # Errors
    /// Returns error if parsing fails or the source contains syntax errors
    pub fn parse(&mut self, source: &str) -> Result<CstTree, CstError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(CstError::ParseFailed(self.dialect))?;

        let mut cursor = tree.walk();
        let root = CstNode::from_cursor(&mut cursor)?;

        if let Some(error) = root.first_error() {
            return Err(CstError::Syntax {
                line: error.start_point.row + 1,
                column: error.start_point.column + 1,
            });
        }

        Ok(CstTree {
            root,
            source: source.to_owned(),
            dialect: self.dialect,
        })
    }
}
