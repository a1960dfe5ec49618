//! Tree nodes and size tables.
//!
//! Leaves hold up to `WIDTH` slots, where a `None` slot is a hole. Branches
//! hold up to `WIDTH` children together with a cumulative size table, so a
//! lookup never assumes that a subtree is full.

use arrayvec::ArrayVec;

use crate::persistent::ReferenceCounter;

/// Shared reference to a node.
pub(super) type NodeRef<T, const WIDTH: usize> = ReferenceCounter<Node<T, WIDTH>>;

/// A node of the relaxed radix-balanced tree.
pub(super) enum Node<T, const WIDTH: usize> {
    /// Dense slots of a leaf; `None` marks a hole.
    Leaf(ArrayVec<Option<T>, WIDTH>),
    /// Internal node with its size table.
    Branch(Branch<T, WIDTH>),
}

/// Children of an internal node together with their cumulative sizes.
///
/// `sizes[i]` is the number of slots stored in `children[0..=i]`.
pub(super) struct Branch<T, const WIDTH: usize> {
    pub(super) sizes: ArrayVec<usize, WIDTH>,
    pub(super) children: ArrayVec<NodeRef<T, WIDTH>, WIDTH>,
}

impl<T, const WIDTH: usize> Clone for Branch<T, WIDTH> {
    fn clone(&self) -> Self {
        Self {
            sizes: self.sizes.clone(),
            children: self.children.clone(),
        }
    }
}

impl<T, const WIDTH: usize> Branch<T, WIDTH> {
    /// Builds a branch and computes its size table from the children.
    pub(super) fn from_children(children: ArrayVec<NodeRef<T, WIDTH>, WIDTH>) -> Self {
        let mut sizes = ArrayVec::new();
        let mut total = 0;
        for child in &children {
            total += child.len();
            sizes.push(total);
        }
        Self { sizes, children }
    }

    /// Total number of slots below this branch.
    #[inline]
    pub(super) fn len(&self) -> usize {
        self.sizes.last().copied().unwrap_or(0)
    }

    /// Finds the child that holds `index` and the index relative to it.
    ///
    /// Returns `None` when `index` lies beyond the last child.
    #[inline]
    pub(super) fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let position = self.sizes.partition_point(|&size| size <= index);
        if position >= self.children.len() {
            return None;
        }
        let offset = if position == 0 {
            0
        } else {
            self.sizes[position - 1]
        };
        Some((position, index - offset))
    }
}

impl<T, const WIDTH: usize> Node<T, WIDTH> {
    /// Fewest items a node may hold unless it lies on the left or right edge
    /// of its tree.
    pub(super) const MINIMUM_FILL: usize = WIDTH.div_ceil(2);

    /// Creates a leaf without slots.
    #[inline]
    pub(super) const fn empty_leaf() -> Self {
        Self::Leaf(ArrayVec::new_const())
    }

    /// Number of slots in this subtree, holes included.
    #[inline]
    pub(super) fn len(&self) -> usize {
        match self {
            Self::Leaf(slots) => slots.len(),
            Self::Branch(branch) => branch.len(),
        }
    }

    /// Number of direct items: slots for a leaf, children for a branch.
    #[inline]
    pub(super) fn item_count(&self) -> usize {
        match self {
            Self::Leaf(slots) => slots.len(),
            Self::Branch(branch) => branch.children.len(),
        }
    }

    /// Returns `true` when the node holds fewer than `MINIMUM_FILL` items.
    #[inline]
    pub(super) fn is_short(&self) -> bool {
        self.item_count() < Self::MINIMUM_FILL
    }

    /// Builds a chain of single-child branches of the given height ending in
    /// a leaf that holds `slot`.
    pub(super) fn path(height: usize, slot: Option<T>) -> Self {
        let mut leaf = ArrayVec::new();
        leaf.push(slot);
        let mut node = Self::Leaf(leaf);
        for _ in 0..height {
            node = Self::single_child(ReferenceCounter::new(node));
        }
        node
    }

    /// Wraps `child` in a branch with exactly one child.
    pub(super) fn single_child(child: NodeRef<T, WIDTH>) -> Self {
        let mut children = ArrayVec::new();
        children.push(child);
        Self::Branch(Branch::from_children(children))
    }
}

impl<T: Clone, const WIDTH: usize> Node<T, WIDTH> {
    /// Returns a copy of this node with one slot replaced.
    ///
    /// Only the nodes on the path to `index` are copied; every sibling
    /// subtree is shared with `self`.
    pub(super) fn with_slot(&self, index: usize, slot: Option<T>) -> Self {
        match self {
            Self::Leaf(slots) => {
                let mut slots = slots.clone();
                if let Some(target) = slots.get_mut(index) {
                    *target = slot;
                }
                Self::Leaf(slots)
            }
            Self::Branch(branch) => {
                let mut branch = branch.clone();
                if let Some((position, child_index)) = branch.locate(index) {
                    let child = branch.children[position].with_slot(child_index, slot);
                    branch.children[position] = ReferenceCounter::new(child);
                }
                Self::Branch(branch)
            }
        }
    }

    /// Appends a slot at the right edge of this subtree.
    ///
    /// `height` is the height of `self` (0 for a leaf). When every node on
    /// the right spine is full the slot is handed back in `Err`.
    pub(super) fn pushed(&self, height: usize, slot: Option<T>) -> Result<Self, Option<T>> {
        match self {
            Self::Leaf(slots) => {
                if slots.is_full() {
                    return Err(slot);
                }
                let mut slots = slots.clone();
                slots.push(slot);
                Ok(Self::Leaf(slots))
            }
            Self::Branch(branch) => {
                let Some(last) = branch.children.last() else {
                    return Err(slot);
                };
                match last.pushed(height - 1, slot) {
                    Ok(child) => {
                        let mut branch = branch.clone();
                        let position = branch.children.len() - 1;
                        branch.children[position] = ReferenceCounter::new(child);
                        branch.sizes[position] += 1;
                        Ok(Self::Branch(branch))
                    }
                    Err(slot) if !branch.children.is_full() => {
                        let mut branch = branch.clone();
                        let total = branch.len() + 1;
                        branch
                            .children
                            .push(ReferenceCounter::new(Self::path(height - 1, slot)));
                        branch.sizes.push(total);
                        Ok(Self::Branch(branch))
                    }
                    Err(slot) => Err(slot),
                }
            }
        }
    }
}
