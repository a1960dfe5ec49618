//! In-order traversal: slot and element iterators, and the callback-based
//! traversals built on them.
//!
//! All traversals visit positions in ascending index order. Holes are yielded
//! by [`PersistentSequenceSlots`] and skipped by everything else.

use std::iter::{Enumerate, FusedIterator};

use smallvec::SmallVec;

use super::node::{Node, NodeRef};
use super::{PersistentSequence, TransientSequence};

// =============================================================================
// Traversal methods
// =============================================================================

impl<T, const WIDTH: usize> PersistentSequence<T, WIDTH> {
    /// Returns an iterator over every slot, yielding `None` for holes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let sequence: PersistentSequence<i32> = PersistentSequence::from_slots([Some(1), None]);
    /// let slots: Vec<Option<&i32>> = sequence.slots().collect();
    /// assert_eq!(slots, vec![Some(&1), None]);
    /// ```
    #[inline]
    #[must_use]
    pub fn slots(&self) -> PersistentSequenceSlots<'_, T, WIDTH> {
        PersistentSequenceSlots::new(self)
    }

    /// Returns an iterator over the present elements and their indices.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let sequence: PersistentSequence<&str> = PersistentSequence::new()
    ///     .assign(33, "asdf")
    ///     .assign(10001, "qwer");
    /// let visited: Vec<(usize, &&str)> = sequence.iter().collect();
    /// assert_eq!(visited, vec![(33, &"asdf"), (10001, &"qwer")]);
    /// ```
    #[inline]
    #[must_use]
    pub fn iter(&self) -> PersistentSequenceIterator<'_, T, WIDTH> {
        PersistentSequenceIterator {
            slots: self.slots().enumerate(),
        }
    }

    /// Calls `function(value, index, sequence)` for every present element in
    /// index order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let sequence: PersistentSequence<i32> = (1..=4).collect::<PersistentSequence<_>>().remove(1);
    /// let mut total = 0;
    /// sequence.for_each_present(|value, _, _| total += value);
    /// assert_eq!(total, 8);
    /// ```
    pub fn for_each_present<F>(&self, mut function: F)
    where
        F: FnMut(&T, usize, &Self),
    {
        for (index, value) in self {
            function(value, index, self);
        }
    }

    /// Maps every present element into a new sequence of the same length.
    ///
    /// Holes stay holes at the same positions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let sequence: PersistentSequence<i32> = PersistentSequence::from_slots([Some(1), None, Some(3)]);
    /// let doubled = sequence.transform(|value, _, _| value * 2);
    /// assert_eq!(doubled.len(), 3);
    /// assert_eq!(doubled.get(1), None);
    /// assert_eq!(doubled.get(2), Some(&6));
    /// ```
    #[must_use]
    pub fn transform<U, F>(&self, mut function: F) -> PersistentSequence<U, WIDTH>
    where
        F: FnMut(&T, usize, &Self) -> U,
    {
        let mut transient = TransientSequence::new();
        for (index, slot) in self.slots().enumerate() {
            transient.push_slot(slot.map(|value| function(value, index, self)));
        }
        transient.persistent()
    }

    /// Maps every present element into a `Vec`, skipping holes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let sequence: PersistentSequence<i32> = PersistentSequence::from_slots([Some(1), None, Some(3)]);
    /// assert_eq!(sequence.transform_to_vec(|value, index, _| value + index as i32), vec![1, 5]);
    /// ```
    #[must_use]
    pub fn transform_to_vec<U, F>(&self, mut function: F) -> Vec<U>
    where
        F: FnMut(&T, usize, &Self) -> U,
    {
        self.iter()
            .map(|(index, value)| function(value, index, self))
            .collect()
    }
}

impl<T: Clone, const WIDTH: usize> PersistentSequence<T, WIDTH> {
    /// Returns a dense sequence of the present elements that satisfy
    /// `predicate(value, index, sequence)`.
    ///
    /// The kept elements are renumbered from 0 and the result holds no holes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let sequence: PersistentSequence<i32> = (1..=4).collect();
    /// let even = sequence.select(|value, _, _| value % 2 == 0);
    /// assert_eq!(even, (1..=2).map(|value| value * 2).collect());
    /// ```
    #[must_use]
    pub fn select<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T, usize, &Self) -> bool,
    {
        let mut transient = TransientSequence::new();
        for (index, value) in self {
            if predicate(value, index, self) {
                transient.push(value.clone());
            }
        }
        transient.persistent()
    }
}

// =============================================================================
// Slot iterator
// =============================================================================

/// A branch being walked, and the next child to enter.
struct TraversalStackEntry<'a, T, const WIDTH: usize> {
    children: &'a [NodeRef<T, WIDTH>],
    child_index: usize,
}

/// An iterator over every slot of a [`PersistentSequence`].
///
/// Yields `Some(&value)` for present slots and `None` for holes. The tree is
/// walked depth first with an explicit stack, one leaf at a time.
pub struct PersistentSequenceSlots<'a, T, const WIDTH: usize> {
    /// Branches from the root down to the parent of the current leaf
    traversal_stack: SmallVec<[TraversalStackEntry<'a, T, WIDTH>; 8]>,
    /// Slots of the current leaf
    current_leaf: &'a [Option<T>],
    /// Next position within `current_leaf`
    leaf_index: usize,
    /// Slots not yet yielded
    remaining: usize,
}

impl<'a, T, const WIDTH: usize> PersistentSequenceSlots<'a, T, WIDTH> {
    fn new(sequence: &'a PersistentSequence<T, WIDTH>) -> Self {
        let mut iterator = Self {
            traversal_stack: SmallVec::new(),
            current_leaf: &[],
            leaf_index: 0,
            remaining: sequence.len(),
        };
        iterator.enter(sequence.root.as_ref());
        iterator
    }

    /// Makes `node` the current leaf, or pushes it and descends to its first
    /// leaf.
    fn enter(&mut self, node: &'a Node<T, WIDTH>) {
        match node {
            Node::Leaf(slots) => {
                self.current_leaf = slots.as_slice();
                self.leaf_index = 0;
            }
            Node::Branch(branch) => {
                self.traversal_stack.push(TraversalStackEntry {
                    children: branch.children.as_slice(),
                    child_index: 0,
                });
                self.advance_leaf();
            }
        }
    }

    /// Moves to the next leaf in index order. Returns `false` once the tree
    /// is exhausted.
    fn advance_leaf(&mut self) -> bool {
        while let Some(entry) = self.traversal_stack.last_mut() {
            let children = entry.children;
            let Some(child) = children.get(entry.child_index) else {
                self.traversal_stack.pop();
                continue;
            };
            entry.child_index += 1;
            match child.as_ref() {
                Node::Leaf(slots) => {
                    self.current_leaf = slots.as_slice();
                    self.leaf_index = 0;
                    return true;
                }
                Node::Branch(branch) => self.traversal_stack.push(TraversalStackEntry {
                    children: branch.children.as_slice(),
                    child_index: 0,
                }),
            }
        }
        false
    }
}

impl<'a, T, const WIDTH: usize> Iterator for PersistentSequenceSlots<'a, T, WIDTH> {
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(slot) = self.current_leaf.get(self.leaf_index) {
                self.leaf_index += 1;
                self.remaining -= 1;
                return Some(slot.as_ref());
            }
            if !self.advance_leaf() {
                return None;
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const WIDTH: usize> ExactSizeIterator for PersistentSequenceSlots<'_, T, WIDTH> {}

impl<T, const WIDTH: usize> FusedIterator for PersistentSequenceSlots<'_, T, WIDTH> {}

// =============================================================================
// Element iterator
// =============================================================================

/// An iterator over the present elements of a [`PersistentSequence`],
/// yielding `(index, &value)` pairs and skipping holes.
pub struct PersistentSequenceIterator<'a, T, const WIDTH: usize> {
    slots: Enumerate<PersistentSequenceSlots<'a, T, WIDTH>>,
}

impl<'a, T, const WIDTH: usize> Iterator for PersistentSequenceIterator<'a, T, WIDTH> {
    type Item = (usize, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .find_map(|(index, slot)| slot.map(|value| (index, value)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.slots.size_hint().1)
    }
}

impl<T, const WIDTH: usize> FusedIterator for PersistentSequenceIterator<'_, T, WIDTH> {}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_slots_match_lookup() {
        let sequence: PersistentSequence<usize, 4> = (0..200).collect();
        let sequence = sequence.remove(0).remove(99).remove(199);
        let slots: Vec<Option<&usize>> = sequence.slots().collect();
        assert_eq!(slots.len(), 200);
        for (index, slot) in slots.into_iter().enumerate() {
            assert_eq!(slot, sequence.get(index));
        }
    }

    #[rstest]
    fn test_slots_are_exact_size() {
        let sequence: PersistentSequence<i32, 4> = (0..37).collect();
        let mut slots = sequence.slots();
        assert_eq!(slots.len(), 37);
        slots.next();
        assert_eq!(slots.len(), 36);
        assert_eq!(slots.by_ref().count(), 36);
        assert_eq!(slots.next(), None);
    }

    #[rstest]
    fn test_slots_of_empty_sequence() {
        let sequence: PersistentSequence<i32> = PersistentSequence::new();
        assert_eq!(sequence.slots().next(), None);
        assert_eq!(sequence.iter().next(), None);
    }

    #[rstest]
    fn test_slots_walk_concatenated_shapes() {
        let mut sequence: PersistentSequence<usize, 4> = PersistentSequence::new();
        for start in (0..90).step_by(3) {
            sequence = sequence.concat(&(start..start + 3).collect());
        }
        let collected: Vec<usize> = sequence.slots().flatten().copied().collect();
        assert_eq!(collected, (0..90).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_for_each_visits_sparse_assignments() {
        let sequence: PersistentSequence<&str> = PersistentSequence::new()
            .assign(33, "asdf")
            .assign(10001, "qwer");
        let mut visited = Vec::new();
        sequence.for_each_present(|value, index, owner| {
            assert_eq!(owner.len(), 10002);
            visited.push((index, *value));
        });
        assert_eq!(visited, vec![(33, "asdf"), (10001, "qwer")]);
    }

    #[rstest]
    fn test_transform_keeps_holes_and_length() {
        let sequence: PersistentSequence<i32, 4> =
            PersistentSequence::from_slots([Some(1), None, None, None, Some(2), None]);
        let labels = sequence.transform(|value, index, _| format!("{index}:{value}"));
        assert_eq!(labels.len(), 6);
        assert_eq!(labels.get(0).map(String::as_str), Some("0:1"));
        assert_eq!(labels.get(4).map(String::as_str), Some("4:2"));
        assert!(labels.slot(5).is_hole());
        assert_eq!(labels.check_invariants(), Ok(()));
    }

    #[rstest]
    fn test_transform_to_vec_is_dense() {
        let sequence: PersistentSequence<i32> = PersistentSequence::from_slots([None, Some(2), None, Some(4)]);
        assert_eq!(sequence.transform_to_vec(|value, _, _| value * 10), vec![20, 40]);
    }

    #[rstest]
    #[case(PersistentSequence::from_slots([Some(1), Some(2), Some(3), Some(4)]))]
    #[case(PersistentSequence::from_slots([
        Some(1), None, None, None, Some(2), None, None, None,
        Some(3), None, None, None, Some(4),
    ]))]
    fn test_select_even(#[case] sequence: PersistentSequence<i32, 4>) {
        let even = sequence.select(|value, _, _| value % 2 == 0);
        assert_eq!(even.len(), 2);
        assert_eq!(even.get(0), Some(&2));
        assert_eq!(even.get(1), Some(&4));
    }

    #[rstest]
    fn test_select_passes_original_indices() {
        let sequence: PersistentSequence<char> = "abcdef".chars().collect();
        let odd_positions = sequence.select(|_, index, _| index % 2 == 1);
        assert_eq!(odd_positions.iter().map(|(_, c)| *c).collect::<String>(), "bdf");
    }
}
