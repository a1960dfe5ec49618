//! Concatenation of two sequences.
//!
//! Both trees are first grown to the same depth. The right spine of the left
//! tree and the left spine of the right tree are then merged level by level,
//! starting just above the leaves. At every level the items of the nodes
//! along the seam are packed into full nodes from the left, and a short tail
//! is evenly split with the node before it. Whatever does not fit into one
//! parent is split evenly into a second group carried to the next level up,
//! and a leftover second group at the top becomes a new root level.
//!
//! A level whose seam packs into a single short node has no sibling to share
//! items with. That node is merged into its neighbour one level up, so every
//! node away from the left and right edges of the tree holds at least
//! `WIDTH / 2` items (rounded up) and the depth stays logarithmic under any
//! sequence of concatenations.
//!
//! Only nodes on the two spines and their direct children are rewritten;
//! every other subtree of both inputs is shared by the result, as are seam
//! nodes whose items line up with a packed node.

use arrayvec::ArrayVec;
use smallvec::SmallVec;

use super::PersistentSequence;
use super::growth::{grow, shrink};
use super::node::{Branch, Node, NodeRef};
use crate::persistent::ReferenceCounter;

/// Nodes taking part in the merge at one level: at most `2 * WIDTH`.
type Seam<T, const WIDTH: usize> = SmallVec<[NodeRef<T, WIDTH>; 64]>;

/// The groups produced at one level and handed to the level above.
struct Carry<T, const WIDTH: usize> {
    left: NodeRef<T, WIDTH>,
    right: Option<NodeRef<T, WIDTH>>,
}

impl<T, const WIDTH: usize> Carry<T, WIDTH> {
    /// Groups the packed nodes of one level, splitting them evenly over two
    /// parents when they do not fit into one.
    fn split(mut packed: Seam<T, WIDTH>) -> Self {
        if packed.len() <= WIDTH {
            return Self {
                left: group(packed),
                right: None,
            };
        }
        let middle = packed.len().div_ceil(2);
        let right: Seam<T, WIDTH> = packed.drain(middle..).collect();
        Self {
            left: group(packed),
            right: Some(group(right)),
        }
    }

    /// Returns `true` when the level below packed into one short node.
    fn has_short_lone_child(&self) -> bool {
        self.right.is_none()
            && matches!(
                self.left.as_ref(),
                Node::Branch(branch) if branch.children.len() == 1 && branch.children[0].is_short()
            )
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl<T: Clone, const WIDTH: usize> PersistentSequence<T, WIDTH> {
    /// Returns a new sequence holding the slots of `self` followed by the
    /// slots of `other`.
    ///
    /// Concatenating with an empty sequence returns the other operand without
    /// allocating. Holes are carried over at their shifted positions.
    ///
    /// # Complexity
    ///
    /// O(WIDTH² * log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::persistent::PersistentSequence;
    ///
    /// let left: PersistentSequence<i32> = (1..=3).collect();
    /// let right: PersistentSequence<i32> = (4..=6).collect();
    /// let combined = left.concat(&right);
    ///
    /// assert_eq!(combined.len(), 6);
    /// assert_eq!(combined.get(3), Some(&4));
    /// ```
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }

        let depth = self.depth.max(other.depth).max(2);
        let left_root = grow(&self.root, self.depth, depth);
        let right_root = grow(&other.root, other.depth, depth);
        let left_spine = spine(&left_root, Side::Right);
        let right_spine = spine(&right_root, Side::Left);
        debug_assert_eq!(left_spine.len(), depth - 1);
        debug_assert_eq!(right_spine.len(), depth - 1);

        let mut carry: Option<Carry<T, WIDTH>> = None;
        let levels = left_spine.iter().rev().zip(right_spine.iter().rev());
        for (child_height, (left_parent, right_parent)) in levels.enumerate() {
            let short_carry = carry.as_ref().is_some_and(Carry::has_short_lone_child);
            let (mut seam, carry_position) = seam(left_parent, right_parent, carry.take());
            if short_carry {
                absorb_into_neighbour(&mut seam, carry_position);
            }
            let packed = if child_height == 0 {
                pack::<T, Option<T>, WIDTH>(&seam)
            } else {
                pack::<T, NodeRef<T, WIDTH>, WIDTH>(&seam)
            };
            carry = Some(Carry::split(packed));
        }

        let (root, depth) = match carry {
            Some(Carry {
                left,
                right: Some(right),
            }) => (group([left, right]), depth + 1),
            Some(Carry { left, right: None }) => shrink(left, depth),
            None => return self.clone(),
        };
        let result = Self::from_root(root, depth);
        debug_assert_eq!(result.length, self.length + other.length);

        tracing::trace!(
            left_length = self.length,
            left_depth = self.depth,
            right_length = other.length,
            right_depth = other.depth,
            depth = result.depth,
            "concatenated sequences"
        );
        result
    }
}

/// Collects the branches along one edge of a tree, from the root down to the
/// parents of the leaves.
fn spine<T, const WIDTH: usize>(
    root: &NodeRef<T, WIDTH>,
    side: Side,
) -> SmallVec<[&Branch<T, WIDTH>; 8]> {
    let mut spine = SmallVec::new();
    let mut node = root.as_ref();
    while let Node::Branch(branch) = node {
        spine.push(branch);
        let next = match side {
            Side::Left => branch.children.first(),
            Side::Right => branch.children.last(),
        };
        match next {
            Some(child) => node = child.as_ref(),
            None => break,
        }
    }
    spine
}

/// Lists the children of two adjacent spine nodes in order, with the edge
/// children replaced by the groups merged one level below.
///
/// Also returns the position of the first carried group in the list.
fn seam<T, const WIDTH: usize>(
    left_parent: &Branch<T, WIDTH>,
    right_parent: &Branch<T, WIDTH>,
    carry: Option<Carry<T, WIDTH>>,
) -> (Seam<T, WIDTH>, usize) {
    let left_children = &left_parent.children;
    let right_children = &right_parent.children;
    let mut seam = Seam::new();
    seam.extend(
        left_children
            .iter()
            .take(left_children.len().saturating_sub(1))
            .cloned(),
    );
    let carry_position = seam.len();
    match carry {
        Some(Carry { left, right }) => {
            seam.push(left);
            seam.extend(right);
        }
        None => {
            seam.extend(left_children.last().cloned());
            seam.extend(right_children.first().cloned());
        }
    }
    seam.extend(right_children.iter().skip(1).cloned());
    (seam, carry_position)
}

/// Builds a branch over at most `WIDTH` nodes.
fn group<T, const WIDTH: usize>(
    children: impl IntoIterator<Item = NodeRef<T, WIDTH>>,
) -> NodeRef<T, WIDTH> {
    let children: ArrayVec<_, WIDTH> = children.into_iter().collect();
    ReferenceCounter::new(Node::Branch(Branch::from_children(children)))
}

// =============================================================================
// Rebalancing
// =============================================================================

/// The items a node is made of: slots for leaves, children for branches.
trait Item<T, const WIDTH: usize>: Clone {
    fn items_of(node: &Node<T, WIDTH>) -> &[Self];
    fn assemble(items: ArrayVec<Self, WIDTH>) -> Node<T, WIDTH>;
}

impl<T: Clone, const WIDTH: usize> Item<T, WIDTH> for Option<T> {
    fn items_of(node: &Node<T, WIDTH>) -> &[Self] {
        match node {
            Node::Leaf(slots) => slots.as_slice(),
            Node::Branch(_) => &[],
        }
    }

    fn assemble(items: ArrayVec<Self, WIDTH>) -> Node<T, WIDTH> {
        Node::Leaf(items)
    }
}

impl<T, const WIDTH: usize> Item<T, WIDTH> for NodeRef<T, WIDTH> {
    fn items_of(node: &Node<T, WIDTH>) -> &[Self] {
        match node {
            Node::Branch(branch) => branch.children.as_slice(),
            Node::Leaf(_) => &[],
        }
    }

    fn assemble(items: ArrayVec<Self, WIDTH>) -> Node<T, WIDTH> {
        Node::Branch(Branch::from_children(items))
    }
}

/// Sizes of the nodes `total` items are packed into.
///
/// Every node is full except the last two, which share their items evenly
/// whenever the last one would otherwise be short.
fn chunk_sizes<const WIDTH: usize>(total: usize) -> SmallVec<[usize; 64]> {
    let count = total.div_ceil(WIDTH);
    let mut sizes: SmallVec<[usize; 64]> = smallvec::smallvec![WIDTH; count];
    if let Some(last) = sizes.last_mut() {
        *last = total - (count - 1) * WIDTH;
    }
    if count >= 2 && sizes[count - 1] < WIDTH.div_ceil(2) {
        let pair = WIDTH + sizes[count - 1];
        sizes[count - 2] = pair.div_ceil(2);
        sizes[count - 1] = pair / 2;
    }
    sizes
}

/// Repacks the items of consecutive nodes into as few nodes as possible.
///
/// A node whose items line up exactly with a packed node is kept as it is.
fn pack<T, I, const WIDTH: usize>(seam: &[NodeRef<T, WIDTH>]) -> Seam<T, WIDTH>
where
    I: Item<T, WIDTH>,
{
    let total = seam.iter().map(|node| I::items_of(node).len()).sum();
    let mut packed = Seam::new();
    let mut position = 0;
    let mut offset = 0;

    for size in chunk_sizes::<WIDTH>(total) {
        while offset == I::items_of(&seam[position]).len() {
            position += 1;
            offset = 0;
        }
        if offset == 0 && I::items_of(&seam[position]).len() == size {
            packed.push(seam[position].clone());
            offset = size;
            continue;
        }

        let mut items: ArrayVec<I, WIDTH> = ArrayVec::new();
        while items.len() < size {
            let available = &I::items_of(&seam[position])[offset..];
            let taken = available.len().min(size - items.len());
            items.extend(available[..taken].iter().cloned());
            offset += taken;
            if offset == I::items_of(&seam[position]).len() && items.len() < size {
                position += 1;
                offset = 0;
            }
        }
        packed.push(ReferenceCounter::new(I::assemble(items)));
    }

    packed
}

/// Merges the short lone child of the group at `position` into the node next
/// to it, preferring the one on its right.
fn absorb_into_neighbour<T: Clone, const WIDTH: usize>(seam: &mut Seam<T, WIDTH>, position: usize) {
    let (neighbour, short_first) = if position + 1 < seam.len() {
        (position + 1, true)
    } else if position > 0 {
        (position - 1, false)
    } else {
        return;
    };
    let merged = absorb(&seam[position], &seam[neighbour], short_first);
    let start = position.min(neighbour);
    seam.remove(start);
    seam.remove(start);
    seam.insert_many(start, merged);
}

/// Merges `short` into `neighbour`, two nodes of the same height, and returns
/// one node, or two evenly filled ones when the items do not fit into one.
///
/// A short node that has a single short child is a chain left by levels that
/// had nothing to merge with. Its child is merged into the facing edge child
/// of `neighbour` instead, so no short node ends up inside the tree.
fn absorb<T: Clone, const WIDTH: usize>(
    short: &NodeRef<T, WIDTH>,
    neighbour: &NodeRef<T, WIDTH>,
    short_first: bool,
) -> SmallVec<[NodeRef<T, WIDTH>; 2]> {
    match (short.as_ref(), neighbour.as_ref()) {
        (Node::Branch(lone), Node::Branch(branch))
            if lone.children.len() == 1 && lone.children[0].is_short() =>
        {
            let edge = if short_first {
                0
            } else {
                branch.children.len() - 1
            };
            let merged = absorb(&lone.children[0], &branch.children[edge], short_first);
            let mut children: Vec<NodeRef<T, WIDTH>> = branch.children.to_vec();
            children.splice(edge..=edge, merged);
            merge_items::<T, NodeRef<T, WIDTH>, WIDTH>(&children, &[])
        }
        (Node::Branch(lone), Node::Branch(branch)) => {
            if short_first {
                merge_items::<T, NodeRef<T, WIDTH>, WIDTH>(&lone.children, &branch.children)
            } else {
                merge_items::<T, NodeRef<T, WIDTH>, WIDTH>(&branch.children, &lone.children)
            }
        }
        (Node::Leaf(lone), Node::Leaf(slots)) => {
            if short_first {
                merge_items::<T, Option<T>, WIDTH>(lone, slots)
            } else {
                merge_items::<T, Option<T>, WIDTH>(slots, lone)
            }
        }
        _ => unreachable!("absorbed nodes sit at the same height"),
    }
}

/// Builds one node from `first` followed by `second`, or two evenly filled
/// nodes when they hold more than `WIDTH` items together.
fn merge_items<T, I, const WIDTH: usize>(first: &[I], second: &[I]) -> SmallVec<[NodeRef<T, WIDTH>; 2]>
where
    I: Item<T, WIDTH>,
{
    let total = first.len() + second.len();
    let split = if total <= WIDTH {
        total
    } else {
        total.div_ceil(2)
    };
    let mut items = first.iter().chain(second).cloned();
    let mut merged = SmallVec::new();
    merged.push(ReferenceCounter::new(I::assemble(
        items.by_ref().take(split).collect(),
    )));
    if split < total {
        merged.push(ReferenceCounter::new(I::assemble(items.collect())));
    }
    merged
}
