//! Partitioning merged properties and writing the replacement declaration.

use super::planner::Candidate;
use super::source::{Accessor, SourceExpr};
use crate::syntax::DeclarationKind;
use indexmap::IndexMap;

/// Output form of a merged declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeShape {
    /// `kind { a, b } = object.accessor`
    SingleAccessor,
    /// `kind { a, accessor: { b } } = object`
    General,
}

/// Properties sourced through one accessor.
#[derive(Debug, Clone)]
pub struct NestedBucket<'s> {
    /// How the accessor is written
    pub accessor: Accessor<'s>,
    /// Property texts in merge order
    pub properties: Vec<&'s str>,
}

/// Properties of a run, split by where they were destructured from.
#[derive(Debug, Clone, Default)]
pub struct PropertyBuckets<'s> {
    /// Properties destructured straight from the reference
    pub top_level: Vec<&'s str>,
    /// Properties destructured through an accessor, keyed by the accessor's
    /// pattern key, in first-seen order
    pub nested: IndexMap<String, NestedBucket<'s>>,
}

impl<'s> PropertyBuckets<'s> {
    /// Assign every member's properties to a bucket, keeping source order.
    #[must_use]
    pub fn partition(group: &[Candidate<'_, 's>], source: &'s str) -> Self {
        let mut buckets = Self::default();
        for member in group {
            let properties = member.pattern.properties.iter().map(|p| p.slice(source));
            match member.source {
                SourceExpr::PropertyAccess { accessor, .. } => {
                    buckets
                        .nested
                        .entry(accessor.key())
                        .or_insert_with(|| NestedBucket {
                            accessor,
                            properties: Vec::new(),
                        })
                        .properties
                        .extend(properties);
                }
                SourceExpr::Reference { .. } | SourceExpr::Unsupported => {
                    buckets.top_level.extend(properties);
                }
            }
        }
        buckets
    }

    /// Whether every pattern the synthesizer writes keeps `...rest` last.
    #[must_use]
    pub fn rest_elements_last(&self) -> bool {
        let top_level_ok = if self.nested.is_empty() {
            rest_only_last(&self.top_level)
        } else {
            !self.top_level.iter().any(|p| is_rest(p))
        };
        top_level_ok
            && self
                .nested
                .values()
                .all(|bucket| rest_only_last(&bucket.properties))
    }
}

fn is_rest(property: &str) -> bool {
    property.trim_start().starts_with("...")
}

fn rest_only_last(properties: &[&str]) -> bool {
    match properties.split_last() {
        Some((_, init)) => !init.iter().any(|p| is_rest(p)),
        None => true,
    }
}

fn braced<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return "{}".to_owned();
    }
    let joined = items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{ {joined} }}")
}

/// Write the merged declaration, without a terminator.
#[must_use]
pub fn synthesize(
    kind: DeclarationKind,
    reference: &str,
    buckets: &PropertyBuckets<'_>,
) -> (MergeShape, String) {
    if buckets.top_level.is_empty() && buckets.nested.len() == 1 {
        if let Some(bucket) = buckets.nested.values().next() {
            let code = format!(
                "{kind} {} = {reference}{}",
                braced(&bucket.properties),
                bucket.accessor.access()
            );
            return (MergeShape::SingleAccessor, code);
        }
    }

    let mut entries: Vec<String> = buckets
        .top_level
        .iter()
        .map(|p| (*p).to_owned())
        .collect();
    for (key, bucket) in &buckets.nested {
        entries.push(format!("{key}: {}", braced(&bucket.properties)));
    }
    (
        MergeShape::General,
        format!("{kind} {} = {reference}", braced(&entries)),
    )
}
