//! Statement-list model of a JavaScript or TypeScript source file.
//!
//! The CST is lowered into flat statement lists (`Block`s), one per program
//! body or `{ ... }` statement block. Only the shapes the rules inspect are
//! modelled in detail; everything else keeps just its byte range so its
//! source text can still be sliced out.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TextRange {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl TextRange {
    /// Create a new range
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the range in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the range covers no bytes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slice the text of this range out of `source`.
    ///
    /// Returns an empty string if the range does not fall on valid
    /// boundaries of `source`.
    #[must_use]
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start..self.end).unwrap_or_default()
    }

    /// Smallest range covering both `self` and `other`
    #[must_use]
    pub fn cover(&self, other: Self) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// Binding keyword of a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// `const`
    Const,
    /// `let`
    Let,
    /// `var`
    Var,
}

impl DeclarationKind {
    /// All declaration kinds, in keyword order.
    pub const ALL: [Self; 3] = [Self::Const, Self::Let, Self::Var];

    /// The keyword as written in source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Let => "let",
            Self::Var => "var",
        }
    }

    /// Parse a declaration keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "const" => Some(Self::Const),
            "let" => Some(Self::Let),
            "var" => Some(Self::Var),
            _ => None,
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lowered source file: the original text plus every statement list in it.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Original source code
    pub source: String,
    /// Statement lists in pre-order (the program body first)
    pub blocks: Vec<Block>,
}

/// An ordered list of sibling statements.
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// Range of the enclosing program or statement block
    pub range: TextRange,
    /// Statements in source order
    pub statements: Vec<Statement>,
}

/// A single entry of a statement list.
#[derive(Debug, Clone)]
pub enum Statement {
    /// `const`/`let`/`var` declaration
    Declaration(Declaration),
    /// Line or block comment sitting between statements
    Comment(TextRange),
    /// Any other statement
    Other(TextRange),
}

impl Statement {
    /// Byte range of the whole statement
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            Self::Declaration(decl) => decl.range,
            Self::Comment(range) | Self::Other(range) => *range,
        }
    }

    /// The declaration, if this statement is one
    #[must_use]
    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Self::Declaration(decl) => Some(decl),
            _ => None,
        }
    }
}

/// A variable declaration statement.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Binding keyword
    pub kind: DeclarationKind,
    /// Declarators in source order
    pub declarators: SmallVec<[Declarator; 1]>,
    /// Range of the statement, including its terminator if present
    pub range: TextRange,
    /// Whether the statement ends with an explicit `;`
    pub terminated: bool,
    /// Whether a comment appears anywhere inside the statement's range
    pub contains_comment: bool,
}

impl Declaration {
    /// The only declarator, if the declaration has exactly one
    #[must_use]
    pub fn single_declarator(&self) -> Option<&Declarator> {
        match self.declarators.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// One `pattern = init` binding inside a declaration.
#[derive(Debug, Clone)]
pub struct Declarator {
    /// Binding pattern
    pub pattern: Pattern,
    /// TypeScript type annotation, if any
    pub type_annotation: Option<TextRange>,
    /// Initializer expression, if any
    pub init: Option<Expression>,
    /// Range of the declarator
    pub range: TextRange,
}

/// Binding pattern of a declarator.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// `{ a, b: c, d = 1, ...rest }`
    Object(ObjectPattern),
    /// Identifier, array pattern or anything else
    Other(TextRange),
}

/// An object-destructuring pattern.
#[derive(Debug, Clone)]
pub struct ObjectPattern {
    /// Range including the braces
    pub range: TextRange,
    /// Ranges of each property entry, verbatim (shorthand, renamed, defaulted or rest)
    pub properties: Vec<TextRange>,
}

/// Expression shapes relevant to destructuring sources.
#[derive(Debug, Clone)]
pub enum Expression {
    /// A bare name
    Identifier(TextRange),
    /// The `super` keyword
    Super(TextRange),
    /// `object.property`, `object[index]` and their optional-chain forms
    Member(MemberExpression),
    /// `( inner )`
    Parenthesized {
        /// Range including the parentheses
        range: TextRange,
        /// Wrapped expression
        inner: Box<Expression>,
    },
    /// Anything else
    Other(TextRange),
}

impl Expression {
    /// Byte range of the expression
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            Self::Identifier(range) | Self::Super(range) | Self::Other(range) => *range,
            Self::Member(member) => member.range,
            Self::Parenthesized { range, .. } => *range,
        }
    }

    /// Strip any number of enclosing parentheses.
    #[must_use]
    pub fn unparenthesized(&self) -> &Self {
        let mut expr = self;
        while let Self::Parenthesized { inner, .. } = expr {
            expr = inner;
        }
        expr
    }
}

/// A single member access.
#[derive(Debug, Clone)]
pub struct MemberExpression {
    /// Range of the whole access
    pub range: TextRange,
    /// The accessed object
    pub object: Box<Expression>,
    /// The accessed property
    pub property: MemberProperty,
    /// Whether the access uses `?.`
    pub optional: bool,
}

/// Property part of a member access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberProperty {
    /// `.name`
    Named(TextRange),
    /// `.#name`
    Private(TextRange),
    /// `[index]`, range of the index expression only
    Computed(TextRange),
}
