use std::collections::BTreeSet;

/// What has to change to turn `existing` into `expected`.
///
/// There is no rename detection: a member that changed identity shows up as
/// one delete plus one create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff<K> {
    pub to_create: BTreeSet<K>,
    pub to_delete: BTreeSet<K>,
}

impl<K: Ord> Diff<K> {
    pub fn has_changes(&self) -> bool {
        !self.to_create.is_empty() || !self.to_delete.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} to create, {} to delete",
            self.to_create.len(),
            self.to_delete.len()
        )
    }
}

/// Set difference in both directions. Both halves iterate in sorted order.
pub fn diff<K: Ord + Clone>(expected: &BTreeSet<K>, existing: &BTreeSet<K>) -> Diff<K> {
    Diff {
        to_create: expected.difference(existing).cloned().collect(),
        to_delete: existing.difference(expected).cloned().collect(),
    }
}
