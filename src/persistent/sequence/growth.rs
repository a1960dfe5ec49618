//! Changing the depth of a tree, and runs of holes.
//!
//! Growing wraps a root in single-child levels so it can sit at a greater
//! depth; shrinking strips such levels off again. A run of holes is built
//! from shared, fully holed subtrees so that addressing an index far past the
//! end does not allocate per slot.

use arrayvec::ArrayVec;
use smallvec::SmallVec;

use super::PersistentSequence;
use super::node::{Branch, Node, NodeRef};
use crate::persistent::ReferenceCounter;

/// Wraps `root` in single-child branches until it sits at `target_depth`.
pub(super) fn grow<T, const WIDTH: usize>(
    root: &NodeRef<T, WIDTH>,
    depth: usize,
    target_depth: usize,
) -> NodeRef<T, WIDTH> {
    let mut root = root.clone();
    for _ in depth..target_depth {
        root = ReferenceCounter::new(Node::single_child(root));
    }
    root
}

/// Replaces a single-child root with its child until the root branches or
/// is a leaf. Returns the new root and its depth.
pub(super) fn shrink<T, const WIDTH: usize>(
    mut root: NodeRef<T, WIDTH>,
    mut depth: usize,
) -> (NodeRef<T, WIDTH>, usize) {
    while depth > 1 {
        let only_child = match root.as_ref() {
            Node::Branch(branch) if branch.children.len() == 1 => branch.children[0].clone(),
            _ => break,
        };
        root = only_child;
        depth -= 1;
    }
    (root, depth)
}

impl<T, const WIDTH: usize> PersistentSequence<T, WIDTH> {
    /// Builds a sequence of `count` holes.
    ///
    /// The tree is left-packed: every node is full except the rightmost one
    /// of each level. All full subtrees of the same height are one shared
    /// node, so only O(WIDTH * log count) references are allocated.
    pub(super) fn holes(count: usize) -> Self {
        if count == 0 {
            return Self::new();
        }

        let mut height = 0;
        let mut capacity = WIDTH;
        while capacity < count {
            capacity = capacity.saturating_mul(WIDTH);
            height += 1;
        }

        // full[h] is the shared node of height h with every slot a hole.
        let mut full: SmallVec<[NodeRef<T, WIDTH>; 8]> = SmallVec::new();
        full.push(ReferenceCounter::new(Node::Leaf(
            std::iter::repeat_with(|| None).take(WIDTH).collect(),
        )));
        while full.len() < height {
            let below = &full[full.len() - 1];
            let children: ArrayVec<_, WIDTH> =
                std::iter::repeat_with(|| below.clone()).take(WIDTH).collect();
            let node = ReferenceCounter::new(Node::Branch(Branch::from_children(children)));
            full.push(node);
        }

        tracing::trace!(count, depth = height + 1, "building a run of holes");
        let root = Self::partial_holes(&full, height, count);
        Self::from_root(root, height + 1)
    }

    /// Builds a left-packed node of the given height holding `count` holes.
    fn partial_holes(full: &[NodeRef<T, WIDTH>], height: usize, count: usize) -> NodeRef<T, WIDTH> {
        if height == 0 {
            return ReferenceCounter::new(Node::Leaf(
                std::iter::repeat_with(|| None).take(count).collect(),
            ));
        }
        let child_capacity = full[height - 1].len();
        let mut children: ArrayVec<NodeRef<T, WIDTH>, WIDTH> = ArrayVec::new();
        for _ in 0..count / child_capacity {
            children.push(full[height - 1].clone());
        }
        let rest = count % child_capacity;
        if rest > 0 {
            children.push(Self::partial_holes(full, height - 1, rest));
        }
        ReferenceCounter::new(Node::Branch(Branch::from_children(children)))
    }
}

impl<T: Clone, const WIDTH: usize> PersistentSequence<T, WIDTH> {
    /// Appends `count` holes by concatenating a run of holes.
    pub(super) fn extended_with_holes(&self, count: usize) -> Self {
        if count == 0 {
            return self.clone();
        }
        self.concat(&Self::holes(count))
    }
}
