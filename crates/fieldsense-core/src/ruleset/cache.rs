//! Fact cache - pass-scoped memoization of descendant queries
//!
//! Descendant lookups are the expensive structural queries the feature
//! library leans on; several features ask the same scope the same question.
//! The cache lives for exactly one classification sweep. Reusing one across
//! sweeps over a possibly-mutated tree is a correctness bug, not a cache
//! hit, so [`classify`](crate::ruleset::FieldClassifier::classify) always
//! builds a fresh one.

use rustc_hash::FxHashMap;

use crate::dom::{DescendantQuery, Document, NodeId};

/// Memoized descendant queries, keyed by (scope, query). A `None` scope is
/// the whole document.
#[derive(Default)]
pub struct FactCache {
    map: FxHashMap<(Option<NodeId>, DescendantQuery), Vec<NodeId>>,
}

impl FactCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached descendant lookup
    pub fn descendants(
        &mut self,
        doc: &Document,
        scope: Option<NodeId>,
        query: DescendantQuery,
    ) -> &[NodeId] {
        self.map
            .entry((scope, query))
            .or_insert_with(|| doc.descendants(scope, query))
    }

    /// Drop every memoized result. Called once per sweep when a cache is
    /// reused, never per rule.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
