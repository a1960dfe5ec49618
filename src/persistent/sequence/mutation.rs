//! Path-copying mutation: assign, update, append and remove.
//!
//! Each operation copies only the nodes between the root and the affected
//! leaf. Every other subtree is shared with the input sequence.

use super::node::Node;
use super::{PersistentSequence, SequenceError, Slot};
use crate::persistent::ReferenceCounter;

impl<T: Clone, const WIDTH: usize> PersistentSequence<T, WIDTH> {
    /// Returns a new sequence with the value at `index` replaced.
    ///
    /// Assigning at or past the end extends the sequence to `index + 1`
    /// slots; the slots between the old end and `index` become holes.
    ///
    /// # Panics
    ///
    /// Panics if `index == usize::MAX`, since the length would overflow.
    /// Use [`try_assign`](Self::try_assign) to handle that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let sequence: PersistentSequence<i32> = (1..=5).collect();
    /// let updated = sequence.assign(2, 100);
    /// assert_eq!(updated.get(2), Some(&100));
    /// assert_eq!(sequence.get(2), Some(&3)); // Original unchanged
    ///
    /// let extended = sequence.assign(9, 10);
    /// assert_eq!(extended.len(), 10);
    /// assert_eq!(extended.get(7), None);
    /// ```
    #[must_use]
    pub fn assign(&self, index: usize, value: T) -> Self {
        match self.try_assign(index, value) {
            Ok(sequence) => sequence,
            Err(error) => panic!("{error}"),
        }
    }

    /// Fallible form of [`assign`](Self::assign).
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOverflow`] if `index + 1` does not fit
    /// in `usize`.
    pub fn try_assign(&self, index: usize, value: T) -> Result<Self, SequenceError> {
        if index < self.length {
            return Ok(self.with_slot(index, Some(value)));
        }
        if index.checked_add(1).is_none() {
            return Err(SequenceError::IndexOverflow { index });
        }
        let extended = self.extended_with_holes(index - self.length);
        Ok(extended.push_slot(Some(value)))
    }

    /// Returns a new sequence whose value at `index` is
    /// `function(current, index)`.
    ///
    /// `current` is `None` when the slot is a hole or lies past the end. In
    /// the latter case the sequence grows exactly as with
    /// [`assign`](Self::assign).
    ///
    /// # Panics
    ///
    /// Panics if `index == usize::MAX`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let sequence: PersistentSequence<usize> = (1..=2).collect();
    /// let updated = sequence.update(6, |_, index| index + 10);
    /// assert_eq!(updated.len(), 7);
    /// assert_eq!(updated.get(6), Some(&16));
    ///
    /// let incremented = sequence.update(1, |value, _| value.map_or(0, |v| v + 10));
    /// assert_eq!(incremented.get(1), Some(&12));
    /// ```
    #[must_use]
    pub fn update<F>(&self, index: usize, function: F) -> Self
    where
        F: FnOnce(Option<&T>, usize) -> T,
    {
        match self.try_update(index, function) {
            Ok(sequence) => sequence,
            Err(error) => panic!("{error}"),
        }
    }

    /// Fallible form of [`update`](Self::update).
    ///
    /// `function` is not called when the index is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOverflow`] if `index + 1` does not fit
    /// in `usize`.
    pub fn try_update<F>(&self, index: usize, function: F) -> Result<Self, SequenceError>
    where
        F: FnOnce(Option<&T>, usize) -> T,
    {
        if index.checked_add(1).is_none() {
            return Err(SequenceError::IndexOverflow { index });
        }
        let value = function(self.get(index), index);
        self.try_assign(index, value)
    }

    /// Appends an element to the back of the sequence.
    ///
    /// Equivalent to `assign(len(), element)`. The right spine is copied up
    /// to the first node with room; when the whole spine is full the tree
    /// grows by one level.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let sequence: PersistentSequence<i32> = PersistentSequence::new().push_back(1).push_back(2);
    /// assert_eq!(sequence.len(), 2);
    /// assert_eq!(sequence.get(1), Some(&2));
    /// ```
    #[must_use]
    pub fn push_back(&self, element: T) -> Self {
        self.push_slot(Some(element))
    }

    /// Returns a new sequence where the slot at `index` is a hole.
    ///
    /// The length is unchanged and no rebalancing takes place. Removing a
    /// hole or an index past the end returns the sequence unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let sequence: PersistentSequence<i32> = (0..5).collect();
    /// let removed = sequence.remove(2);
    /// assert_eq!(removed.get(2), None);
    /// assert_eq!(removed.len(), 5);
    /// assert_eq!(sequence.get(2), Some(&2)); // Original unchanged
    /// ```
    #[must_use]
    pub fn remove(&self, index: usize) -> Self {
        match self.slot(index) {
            Slot::Present(_) => self.with_slot(index, None),
            Slot::Hole | Slot::OutOfBounds => self.clone(),
        }
    }

    /// Replaces the slot at an in-bounds `index`.
    fn with_slot(&self, index: usize, slot: Option<T>) -> Self {
        debug_assert!(index < self.length);
        Self {
            length: self.length,
            depth: self.depth,
            root: ReferenceCounter::new(self.root.with_slot(index, slot)),
        }
    }

    /// Appends a slot, wrapping the root in a new level when the right spine
    /// is full.
    pub(super) fn push_slot(&self, slot: Option<T>) -> Self {
        let height = self.depth - 1;
        match self.root.pushed(height, slot) {
            Ok(root) => Self {
                length: self.length + 1,
                depth: self.depth,
                root: ReferenceCounter::new(root),
            },
            Err(slot) => {
                tracing::trace!(
                    length = self.length,
                    depth = self.depth + 1,
                    "right spine full, adding a root level"
                );
                let mut root = Node::single_child(self.root.clone());
                if let Node::Branch(branch) = &mut root {
                    branch
                        .children
                        .push(ReferenceCounter::new(Node::path(height, slot)));
                    branch.sizes.push(self.length + 1);
                }
                Self {
                    length: self.length + 1,
                    depth: self.depth + 1,
                    root: ReferenceCounter::new(root),
                }
            }
        }
    }
}
