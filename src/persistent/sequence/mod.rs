//! Persistent (immutable) sequence based on a Relaxed Radix Balanced Tree.
//!
//! This module provides [`PersistentSequence`], an immutable indexable
//! sequence that uses structural sharing for efficient operations.
//!
//! # Overview
//!
//! `PersistentSequence` is a `WIDTH`-way branching tree whose internal nodes
//! carry size tables. Because lookups follow the size tables instead of fixed
//! radix offsets, nodes may be under-full, and that relaxation is what makes
//! logarithmic concatenation possible. It provides:
//!
//! - O(log N) random access
//! - O(log N) assign, update, remove and `push_back`
//! - O(log N) concatenation of two arbitrary sequences
//! - O(1) len and `is_empty`
//!
//! # Holes
//!
//! [`remove`](PersistentSequence::remove) does not shift elements. It turns
//! the slot into a hole: the length is unchanged, [`get`](PersistentSequence::get)
//! returns `None` for it and the traversals skip it. Assigning past the end
//! fills the gap with holes.
//!
//! # Examples
//!
//! ```rust
//! use rrb_sequence::persistent::PersistentSequence;
//!
//! let sequence: PersistentSequence<i32> = PersistentSequence::new()
//!     .push_back(1)
//!     .push_back(2)
//!     .assign(5, 6);
//!
//! assert_eq!(sequence.len(), 6);
//! assert_eq!(sequence.get(1), Some(&2));
//! assert_eq!(sequence.get(3), None); // hole
//! assert_eq!(sequence.get(5), Some(&6));
//! ```

use std::fmt;

use super::ReferenceCounter;

mod concat;
mod error;
mod growth;
mod invariants;
mod mutation;
mod node;
mod transient;
mod traversal;

pub use error::SequenceError;
pub use transient::TransientSequence;
pub use traversal::{PersistentSequenceIterator, PersistentSequenceSlots};

use node::{Node, NodeRef};

// =============================================================================
// Constants
// =============================================================================

/// Default branching factor: children per branch and slots per leaf.
pub const DEFAULT_WIDTH: usize = 32;

static_assertions::const_assert!(DEFAULT_WIDTH >= 2);

// =============================================================================
// Slot
// =============================================================================

/// The state of a single position in a [`PersistentSequence`].
///
/// # Examples
///
/// ```rust
/// use rrb_sequence::persistent::{PersistentSequence, Slot};
///
/// let sequence: PersistentSequence<i32> = (0..3).collect();
/// let holed = sequence.remove(1);
///
/// assert_eq!(holed.slot(0), Slot::Present(&0));
/// assert_eq!(holed.slot(1), Slot::Hole);
/// assert_eq!(holed.slot(3), Slot::OutOfBounds);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot<T> {
    /// The position holds a value.
    Present(T),
    /// The position lies within the length but its value was removed or never set.
    Hole,
    /// The position is at or past the length.
    OutOfBounds,
}

impl<T> Slot<T> {
    /// Returns the value, collapsing both kinds of absence into `None`.
    #[inline]
    pub fn present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Hole | Self::OutOfBounds => None,
        }
    }

    /// Returns `true` if the slot holds a value.
    #[inline]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns `true` if the slot is a hole.
    #[inline]
    pub const fn is_hole(&self) -> bool {
        matches!(self, Self::Hole)
    }
}

// =============================================================================
// PersistentSequence Definition
// =============================================================================

/// A persistent (immutable) sequence based on a Relaxed Radix Balanced Tree.
///
/// `WIDTH` is the branching factor; it must be at least 2. Sequences built by
/// collecting or appending are packed to the left. Concatenation repacks the
/// nodes along the seam so that every node off the left and right edges of
/// the tree is at least half full, which keeps the depth logarithmic.
///
/// # Time Complexity
///
/// | Operation          | Complexity                      |
/// |--------------------|---------------------------------|
/// | `new`              | O(1)                            |
/// | `get` / `slot`     | O(log N)                        |
/// | `assign`/`update`  | O(log N), plus O(log gap) past the end |
/// | `push_back`        | O(log N)                        |
/// | `remove`           | O(log N)                        |
/// | `concat`           | O(WIDTH² * log N)               |
/// | `len`              | O(1)                            |
/// | traversals         | O(N)                            |
///
/// # Examples
///
/// ```rust
/// use rrb_sequence::persistent::PersistentSequence;
///
/// let sequence: PersistentSequence<i32> = (0..100).collect();
/// assert_eq!(sequence.len(), 100);
/// assert_eq!(sequence.get(50), Some(&50));
/// ```
pub struct PersistentSequence<T, const WIDTH: usize = DEFAULT_WIDTH> {
    /// Number of slots, holes included
    length: usize,
    /// Number of node levels from the root to the leaves, inclusive
    depth: usize,
    /// Root node; a leaf when `depth == 1`
    root: NodeRef<T, WIDTH>,
}

impl<T, const WIDTH: usize> Clone for PersistentSequence<T, WIDTH> {
    fn clone(&self) -> Self {
        Self {
            length: self.length,
            depth: self.depth,
            root: self.root.clone(),
        }
    }
}

impl<T, const WIDTH: usize> PersistentSequence<T, WIDTH> {
    /// Creates a new empty sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let sequence: PersistentSequence<i32> = PersistentSequence::new();
    /// assert!(sequence.is_empty());
    /// assert_eq!(sequence.depth(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        const { assert!(WIDTH >= 2, "PersistentSequence requires WIDTH >= 2") };
        Self {
            length: 0,
            depth: 1,
            root: ReferenceCounter::new(Node::empty_leaf()),
        }
    }

    /// Assembles a sequence from a root whose size is already known.
    #[inline]
    fn from_root(root: NodeRef<T, WIDTH>, depth: usize) -> Self {
        Self {
            length: root.len(),
            depth,
            root,
        }
    }

    /// Returns the number of slots in the sequence, holes included.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let sequence: PersistentSequence<i32> = (1..=5).collect();
    /// assert_eq!(sequence.len(), 5);
    /// assert_eq!(sequence.remove(2).len(), 5);
    /// ```
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the sequence has no slots.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of node levels from the root to the leaves.
    ///
    /// A depth of 1 means the root is itself a leaf.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns a reference to the element at the given index.
    ///
    /// Returns `None` if the index is out of bounds or the slot is a hole.
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
    /// let sequence: PersistentSequence<i32> = (1..=5).collect();
    /// assert_eq!(sequence.get(0), Some(&1));
    /// assert_eq!(sequence.get(4), Some(&5));
    /// assert_eq!(sequence.get(10), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slot(index).present()
    }

    /// Looks up a position and reports whether it is present, a hole or out
    /// of bounds.
    ///
    /// Each branch on the way down is searched by binary search over its size
    /// table.
    #[must_use]
    pub fn slot(&self, index: usize) -> Slot<&T> {
        if index >= self.length {
            return Slot::OutOfBounds;
        }

        let mut node = self.root.as_ref();
        let mut remaining = index;
        loop {
            match node {
                Node::Branch(branch) => match branch.locate(remaining) {
                    Some((position, child_index)) => {
                        node = branch.children[position].as_ref();
                        remaining = child_index;
                    }
                    None => return Slot::OutOfBounds,
                },
                Node::Leaf(slots) => {
                    return match slots.get(remaining) {
                        Some(Some(value)) => Slot::Present(value),
                        Some(None) => Slot::Hole,
                        None => Slot::OutOfBounds,
                    };
                }
            }
        }
    }

    /// Returns a reference to the first slot's element.
    ///
    /// Returns `None` if the sequence is empty or its first slot is a hole.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a reference to the last slot's element.
    ///
    /// Returns `None` if the sequence is empty or its last slot is a hole.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.length.checked_sub(1).and_then(|index| self.get(index))
    }

    /// Builds a sequence from slots, where `None` becomes a hole.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let sequence: PersistentSequence<i32> =
    ///     PersistentSequence::from_slots([Some(1), None, None, Some(2)]);
    /// assert_eq!(sequence.len(), 4);
    /// assert_eq!(sequence.get(1), None);
    /// assert_eq!(sequence.get(3), Some(&2));
    /// ```
    #[must_use]
    pub fn from_slots<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let mut transient = TransientSequence::new();
        for slot in slots {
            transient.push_slot(slot);
        }
        transient.persistent()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, const WIDTH: usize> Default for PersistentSequence<T, WIDTH> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const WIDTH: usize> FromIterator<T> for PersistentSequence<T, WIDTH> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut transient = TransientSequence::new();
        for element in iter {
            transient.push(element);
        }
        transient.persistent()
    }
}

impl<'a, T, const WIDTH: usize> IntoIterator for &'a PersistentSequence<T, WIDTH> {
    type Item = (usize, &'a T);
    type IntoIter = PersistentSequenceIterator<'a, T, WIDTH>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two sequences are equal when they have the same length and the same
/// element or hole at every position, regardless of tree shape.
impl<T: PartialEq, const WIDTH: usize> PartialEq for PersistentSequence<T, WIDTH> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        if ReferenceCounter::ptr_eq(&self.root, &other.root) {
            return true;
        }
        self.slots().eq(other.slots())
    }
}

impl<T: Eq, const WIDTH: usize> Eq for PersistentSequence<T, WIDTH> {}

impl<T: fmt::Debug, const WIDTH: usize> fmt::Debug for PersistentSequence<T, WIDTH> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.slots()).finish()
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

#[cfg(feature = "typeclass")]
impl<T: Clone, const WIDTH: usize> crate::typeclass::Semigroup for PersistentSequence<T, WIDTH> {
    #[inline]
    fn combine(self, other: Self) -> Self {
        self.concat(&other)
    }

    #[inline]
    fn combine_ref(&self, other: &Self) -> Self {
        self.concat(other)
    }
}

#[cfg(feature = "typeclass")]
impl<T: Clone, const WIDTH: usize> crate::typeclass::Monoid for PersistentSequence<T, WIDTH> {
    #[inline]
    fn empty() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_new_creates_empty() {
        let sequence: PersistentSequence<i32> = PersistentSequence::new();
        assert!(sequence.is_empty());
        assert_eq!(sequence.len(), 0);
        assert_eq!(sequence.depth(), 1);
        assert_eq!(sequence.get(0), None);
    }

    #[rstest]
    fn test_collect_and_get() {
        let sequence: PersistentSequence<i32, 4> = (0..100).collect();
        assert_eq!(sequence.len(), 100);
        for index in 0..100_usize {
            let expected = i32::try_from(index).expect("Test index exceeds i32::MAX");
            assert_eq!(sequence.get(index), Some(&expected));
        }
        assert_eq!(sequence.get(100), None);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(4, 1)]
    #[case(5, 2)]
    #[case(16, 2)]
    #[case(17, 3)]
    #[case(64, 3)]
    #[case(65, 4)]
    fn test_collected_depth(#[case] length: usize, #[case] expected_depth: usize) {
        let sequence: PersistentSequence<usize, 4> = (0..length).collect();
        assert_eq!(sequence.depth(), expected_depth);
    }

    #[rstest]
    fn test_slot_states() {
        let sequence: PersistentSequence<i32> = PersistentSequence::from_slots([Some(1), None]);
        assert_eq!(sequence.slot(0), Slot::Present(&1));
        assert_eq!(sequence.slot(1), Slot::Hole);
        assert_eq!(sequence.slot(2), Slot::OutOfBounds);
        assert!(sequence.slot(0).is_present());
        assert!(sequence.slot(1).is_hole());
    }

    #[rstest]
    fn test_first_and_last() {
        let sequence: PersistentSequence<i32> = (1..=5).collect();
        assert_eq!(sequence.first(), Some(&1));
        assert_eq!(sequence.last(), Some(&5));

        let empty: PersistentSequence<i32> = PersistentSequence::new();
        assert_eq!(empty.first(), None);
        assert_eq!(empty.last(), None);
    }

    #[rstest]
    fn test_equality_ignores_shape() {
        let collected: PersistentSequence<i32, 4> = (0..40).collect();
        let concatenated = (0..20)
            .collect::<PersistentSequence<i32, 4>>()
            .concat(&(20..40).collect());
        assert_eq!(collected, concatenated);
        assert_ne!(collected, collected.remove(3));
    }

    #[rstest]
    fn test_debug_shows_holes() {
        let sequence: PersistentSequence<i32> = PersistentSequence::from_slots([Some(1), None, Some(3)]);
        assert_eq!(format!("{sequence:?}"), "[Some(1), None, Some(3)]");
    }

    #[cfg(feature = "typeclass")]
    #[rstest]
    fn test_monoid_combine_all() {
        use crate::typeclass::Monoid;

        let parts: Vec<PersistentSequence<i32>> = vec![
            (0..3).collect(),
            PersistentSequence::new(),
            (3..6).collect(),
        ];
        let combined = PersistentSequence::combine_all(parts);
        assert_eq!(combined, (0..6).collect());
    }
}

// =============================================================================
// Thread Safety Tests (arc feature only)
// =============================================================================
