// src/traversal/visited.rs
use crate::types::NotionId;
use std::collections::HashSet;

/// References already dispatched during one traversal.
///
/// Created per run and passed explicitly through every recursive call; it is
/// never shared between runs.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    references: HashSet<NotionId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `reference`; returns `false` if it was already present.
    pub fn mark(&mut self, reference: &NotionId) -> bool {
        self.references.insert(reference.clone())
    }

    pub fn contains(&self, reference: &NotionId) -> bool {
        self.references.contains(reference)
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}
