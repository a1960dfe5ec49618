//! Batch construction of sequences.

use arrayvec::ArrayVec;

use super::node::{Branch, Node, NodeRef};
use super::{DEFAULT_WIDTH, PersistentSequence};
use crate::persistent::ReferenceCounter;

// =============================================================================
// TransientSequence Definition
// =============================================================================

/// A write-only builder that accumulates slots and produces a
/// [`PersistentSequence`] in one pass.
///
/// Slots are buffered into leaves as they arrive. [`persistent`](Self::persistent)
/// then stacks the leaves into branches bottom-up, so building a sequence of
/// N slots costs O(N) instead of the O(N log N) of repeated `push_back`.
/// Every node except the rightmost one of each level is full.
///
/// # Examples
///
/// ```rust
/// use rrb_sequence::persistent::TransientSequence;
///
/// let mut transient: TransientSequence<i32> = TransientSequence::new();
/// transient.push(1);
/// transient.push_hole();
/// transient.push(3);
///
/// let sequence = transient.persistent();
/// assert_eq!(sequence.len(), 3);
/// assert_eq!(sequence.get(1), None);
/// assert_eq!(sequence.get(2), Some(&3));
/// ```
pub struct TransientSequence<T, const WIDTH: usize = DEFAULT_WIDTH> {
    /// Completed leaves, all full
    leaves: Vec<NodeRef<T, WIDTH>>,
    /// Slots of the leaf under construction
    buffer: ArrayVec<Option<T>, WIDTH>,
    /// Number of slots pushed so far
    length: usize,
}

impl<T, const WIDTH: usize> TransientSequence<T, WIDTH> {
    /// Creates an empty builder.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        const { assert!(WIDTH >= 2, "TransientSequence requires WIDTH >= 2") };
        Self {
            leaves: Vec::new(),
            buffer: ArrayVec::new(),
            length: 0,
        }
    }

    /// Appends a present element.
    #[inline]
    pub fn push(&mut self, element: T) {
        self.push_slot(Some(element));
    }

    /// Appends a hole.
    #[inline]
    pub fn push_hole(&mut self) {
        self.push_slot(None);
    }

    /// Appends a slot; `None` becomes a hole.
    pub fn push_slot(&mut self, slot: Option<T>) {
        if self.buffer.is_full() {
            self.flush();
        }
        self.buffer.push(slot);
        self.length += 1;
    }

    /// Returns the number of slots pushed so far.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if nothing has been pushed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Moves the buffered slots into a new leaf.
    fn flush(&mut self) {
        let slots = std::mem::take(&mut self.buffer);
        self.leaves.push(ReferenceCounter::new(Node::Leaf(slots)));
    }

    /// Finishes the builder and returns the sequence.
    ///
    /// # Complexity
    ///
    /// O(N / WIDTH)
    #[must_use]
    pub fn persistent(mut self) -> PersistentSequence<T, WIDTH> {
        if !self.buffer.is_empty() {
            self.flush();
        }

        let mut level = self.leaves;
        let mut depth = 1;
        while level.len() > 1 {
            let mut parents = Vec::with_capacity(level.len().div_ceil(WIDTH));
            let mut children = level.into_iter().peekable();
            while children.peek().is_some() {
                let group: ArrayVec<_, WIDTH> = children.by_ref().take(WIDTH).collect();
                parents.push(ReferenceCounter::new(Node::Branch(Branch::from_children(group))));
            }
            level = parents;
            depth += 1;
        }

        match level.pop() {
            Some(root) => PersistentSequence::from_root(root, depth),
            None => PersistentSequence::new(),
        }
    }
}

impl<T, const WIDTH: usize> Default for TransientSequence<T, WIDTH> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const WIDTH: usize> Extend<T> for TransientSequence<T, WIDTH> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push(element);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
