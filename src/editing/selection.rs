// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Immutable selection set of point indices.
//!
//! `Selection` wraps an `Arc<BTreeSet<usize>>` so it can be cheaply cloned
//! into interaction state. Mutations produce a new set. Because points are
//! addressed by index, inserting or removing a point shifts the indices
//! after it; the `shift_after_*` helpers keep the selection pointing at
//! the same points.

use std::collections::BTreeSet;
use std::sync::Arc;

/// A set of selected point indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    inner: Arc<BTreeSet<usize>>,
}

impl Selection {
    /// Create a new empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection holding exactly one point
    pub fn single(index: usize) -> Self {
        Self::from_indices([index])
    }

    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            inner: Arc::new(indices.into_iter().collect()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.inner.contains(&index)
    }

    /// Iterate in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.inner.iter().copied()
    }

    pub fn insert(&mut self, index: usize) {
        Arc::make_mut(&mut self.inner).insert(index);
    }

    pub fn clear(&mut self) {
        self.inner = Arc::default();
    }

    /// Forget `removed` and move every later index down by one
    pub fn shift_after_removal(&self, removed: usize) -> Self {
        Self::from_indices(self.iter().filter_map(|i| match i.cmp(&removed) {
            std::cmp::Ordering::Less => Some(i),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(i - 1),
        }))
    }

    /// Move every index at or after `inserted` up by one
    pub fn shift_after_insertion(&self, inserted: usize) -> Self {
        Self::from_indices(self.iter().map(|i| if i >= inserted { i + 1 } else { i }))
    }

    /// Drop indices that no longer address a point
    pub fn retain_below(&self, len: usize) -> Self {
        Self::from_indices(self.iter().filter(|&i| i < len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_selection_is_empty() {
        let sel = Selection::new();
        assert!(sel.is_empty());
        assert_eq!(sel.len(), 0);
    }

    #[test]
    fn insert_duplicate_is_noop() {
        let mut sel = Selection::new();
        sel.insert(3);
        sel.insert(3);
        assert_eq!(sel.len(), 1);
        assert!(sel.contains(3));
    }

    #[test]
    fn clear_empties_selection() {
        let mut sel = Selection::from_indices([1, 2]);
        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn iterates_in_order() {
        let sel = Selection::from_indices([4, 0, 2]);
        assert_eq!(sel.iter().collect::<Vec<_>>(), vec![0, 2, 4]);
    }

    #[test]
    fn clone_is_independent() {
        let mut sel = Selection::single(0);
        let mut clone = sel.clone();
        clone.insert(1);
        sel.insert(2);
        assert!(!sel.contains(1));
        assert!(!clone.contains(2));
    }

    #[test]
    fn removal_shifts_later_indices() {
        let sel = Selection::from_indices([0, 2, 3]);
        assert_eq!(sel.shift_after_removal(2), Selection::from_indices([0, 2]));
        assert_eq!(sel.shift_after_removal(1), Selection::from_indices([0, 1, 2]));
    }

    #[test]
    fn insertion_shifts_later_indices() {
        let sel = Selection::from_indices([0, 2]);
        assert_eq!(sel.shift_after_insertion(1), Selection::from_indices([0, 3]));
        assert_eq!(sel.shift_after_insertion(0), Selection::from_indices([1, 3]));
    }

    #[test]
    fn retain_below_drops_stale_indices() {
        let sel = Selection::from_indices([0, 4, 5]);
        assert_eq!(sel.retain_below(5), Selection::from_indices([0, 4]));
    }
}
