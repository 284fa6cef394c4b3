//! Classification of destructuring initializers.

use crate::syntax::{Expression, MemberExpression, MemberProperty};

/// How a property access names its property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor<'s> {
    /// `object.name`
    Static(&'s str),
    /// `object[expr]`, holding the source text of `expr`
    Computed(&'s str),
}

impl Accessor<'_> {
    /// The accessor written as a key inside an object pattern.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Static(name) => (*name).to_owned(),
            Self::Computed(expr) => format!("[{expr}]"),
        }
    }

    /// The accessor written as a suffix of its object.
    #[must_use]
    pub fn access(&self) -> String {
        match self {
            Self::Static(name) => format!(".{name}"),
            Self::Computed(expr) => format!("[{expr}]"),
        }
    }
}

/// Classified initializer of a destructuring declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceExpr<'s> {
    /// A bare name: `= req`
    Reference {
        /// The name
        text: &'s str,
    },
    /// One level of member access: `= req.query`
    PropertyAccess {
        /// Source text of the object, compared verbatim
        object_text: &'s str,
        /// The accessed property
        accessor: Accessor<'s>,
    },
    /// Anything that cannot be merged
    Unsupported,
}

impl<'s> SourceExpr<'s> {
    /// Text two sources must share to be merged: the name of a reference
    /// or the object of a property access.
    #[must_use]
    pub fn reference_text(&self) -> Option<&'s str> {
        match self {
            Self::Reference { text } => Some(text),
            Self::PropertyAccess { object_text, .. } => Some(object_text),
            Self::Unsupported => None,
        }
    }
}

/// Classify an initializer expression.
#[must_use]
pub fn classify<'s>(expr: &Expression, source: &'s str) -> SourceExpr<'s> {
    match expr.unparenthesized() {
        Expression::Identifier(range) => SourceExpr::Reference {
            text: range.slice(source),
        },
        Expression::Member(member) => classify_member(member, source),
        _ => SourceExpr::Unsupported,
    }
}

fn classify_member<'s>(member: &MemberExpression, source: &'s str) -> SourceExpr<'s> {
    if has_optional_link(member) {
        return SourceExpr::Unsupported;
    }
    // `{ key: { .. } } = super` is not a valid initializer.
    if matches!(member.object.unparenthesized(), Expression::Super(_)) {
        return SourceExpr::Unsupported;
    }
    let accessor = match member.property {
        MemberProperty::Named(range) => Accessor::Static(range.slice(source)),
        MemberProperty::Computed(range) => Accessor::Computed(range.slice(source)),
        MemberProperty::Private(_) => return SourceExpr::Unsupported,
    };
    SourceExpr::PropertyAccess {
        object_text: member.object.range().slice(source),
        accessor,
    }
}

/// Whether `?.` appears anywhere along the member chain.
fn has_optional_link(member: &MemberExpression) -> bool {
    let mut current = member;
    loop {
        if current.optional {
            return true;
        }
        match current.object.unparenthesized() {
            Expression::Member(object) => current = object,
            _ => return false,
        }
    }
}
