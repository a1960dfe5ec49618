//! Structural self-check used by the test suites.

use super::PersistentSequence;
use super::node::Node;

impl<T, const WIDTH: usize> PersistentSequence<T, WIDTH> {
    /// Verifies the structural invariants of the tree.
    ///
    /// Checks that all leaves sit at `depth`, that every size table is exact,
    /// that no node is empty or over capacity, that the root of a non-empty
    /// sequence is not a single-child branch, and that the cached length
    /// matches the tree. Finally runs [`check_fill`](Self::check_fill).
    ///
    /// # Errors
    ///
    /// Returns a description of the first violation found.
    #[doc(hidden)]
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.root.len() != self.length {
            return Err(format!(
                "length {} does not match root size {}",
                self.length,
                self.root.len()
            ));
        }
        if self.depth == 0 {
            return Err("depth must be at least 1".to_owned());
        }
        if self.depth > 1 && self.root.item_count() == 1 {
            return Err("root is a single-child branch".to_owned());
        }

        let mut level: Vec<&Node<T, WIDTH>> = vec![self.root.as_ref()];
        for height in (0..self.depth).rev() {
            let mut next_level = Vec::new();
            for (position, node) in level.iter().enumerate() {
                let count = node.item_count();
                if count > WIDTH {
                    return Err(format!(
                        "node {position} at height {height} holds {count} items"
                    ));
                }
                if count == 0 && self.length > 0 {
                    return Err(format!("node {position} at height {height} is empty"));
                }
                match node {
                    Node::Leaf(_) if height != 0 => {
                        return Err(format!("leaf {position} found at height {height}"));
                    }
                    Node::Leaf(_) => {}
                    Node::Branch(_) if height == 0 => {
                        return Err(format!("branch {position} found at leaf level"));
                    }
                    Node::Branch(branch) => {
                        if branch.sizes.len() != branch.children.len() {
                            return Err(format!(
                                "branch {position} at height {height} has {} sizes for {} children",
                                branch.sizes.len(),
                                branch.children.len()
                            ));
                        }
                        let mut total = 0;
                        for (child, &size) in branch.children.iter().zip(&branch.sizes) {
                            total += child.len();
                            if size != total {
                                return Err(format!(
                                    "branch {position} at height {height} records {size}, expected {total}"
                                ));
                            }
                        }
                        next_level.extend(branch.children.iter().map(|child| &**child));
                    }
                }
            }
            level = next_level;
        }
        self.check_fill()
    }

    /// Verifies that every node away from the left and right edges of the
    /// tree holds at least `WIDTH / 2` items, rounded up.
    ///
    /// Nodes on the leftmost and rightmost path from the root may be short.
    /// With this rule a tree of `len` slots is at most
    /// `log(len) / log(WIDTH / 2) + 2` levels deep.
    ///
    /// # Errors
    ///
    /// Returns a description of the first short node found.
    #[doc(hidden)]
    pub fn check_fill(&self) -> Result<(), String> {
        let minimum = Node::<T, WIDTH>::MINIMUM_FILL;
        // Each node with whether it lies on the left and on the right edge.
        let mut level: Vec<(&Node<T, WIDTH>, bool, bool)> = vec![(self.root.as_ref(), true, true)];
        for height in (0..self.depth).rev() {
            let mut next_level = Vec::new();
            for (position, &(node, leftmost, rightmost)) in level.iter().enumerate() {
                if !leftmost && !rightmost && node.is_short() {
                    return Err(format!(
                        "node {position} at height {height} holds {} items, fewer than {minimum}",
                        node.item_count()
                    ));
                }
                if let Node::Branch(branch) = node {
                    let last = branch.children.len().saturating_sub(1);
                    next_level.extend(branch.children.iter().enumerate().map(|(index, child)| {
                        (&**child, leftmost && index == 0, rightmost && index == last)
                    }));
                }
            }
            level = next_level;
        }
        Ok(())
    }

    /// Returns `true` if every node except the rightmost one of its level is
    /// full, which is the shape produced by building and appending.
    #[doc(hidden)]
    #[must_use]
    pub fn is_left_packed(&self) -> bool {
        let mut level: Vec<&Node<T, WIDTH>> = vec![self.root.as_ref()];
        while !level.is_empty() {
            let last = level.len() - 1;
            if level[..last]
                .iter()
                .any(|node| node.item_count() != WIDTH)
            {
                return false;
            }
            level = level
                .iter()
                .filter_map(|node| match node {
                    Node::Branch(branch) => Some(branch.children.iter().map(|child| &**child)),
                    Node::Leaf(_) => None,
                })
                .flatten()
                .collect();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistent::ReferenceCounter;
    use crate::persistent::sequence::node::{Branch, NodeRef};
    use rstest::rstest;

    fn leaf(length: i32) -> NodeRef<i32, 4> {
        ReferenceCounter::new(Node::Leaf((0..length).map(Some).collect()))
    }

    fn two_levels(leaf_lengths: &[i32]) -> PersistentSequence<i32, 4> {
        let children = leaf_lengths.iter().map(|&length| leaf(length)).collect();
        PersistentSequence::from_root(
            ReferenceCounter::new(Node::Branch(Branch::from_children(children))),
            2,
        )
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(33)]
    #[case(1025)]
    fn test_collected_sequences_are_valid_and_left_packed(#[case] length: usize) {
        let sequence: PersistentSequence<usize> = (0..length).collect();
        assert_eq!(sequence.check_invariants(), Ok(()));
        assert!(sequence.is_left_packed());
    }

    #[rstest]
    fn test_pushed_sequences_are_left_packed() {
        let mut sequence: PersistentSequence<usize, 3> = PersistentSequence::new();
        for index in 0..100 {
            sequence = sequence.push_back(index);
            assert_eq!(sequence.check_invariants(), Ok(()));
            assert!(sequence.is_left_packed());
        }
    }

    #[rstest]
    #[case(&[1, 4, 1])]
    #[case(&[2, 2, 2, 2])]
    #[case(&[4, 3])]
    fn test_check_fill_accepts_short_edge_nodes(#[case] leaf_lengths: &[i32]) {
        let sequence = two_levels(leaf_lengths);
        assert_eq!(sequence.check_fill(), Ok(()));
        assert_eq!(sequence.check_invariants(), Ok(()));
    }

    #[rstest]
    #[case(&[4, 1, 4])]
    #[case(&[4, 4, 1, 1])]
    fn test_check_fill_rejects_short_interior_nodes(#[case] leaf_lengths: &[i32]) {
        let sequence = two_levels(leaf_lengths);
        let error = sequence.check_fill().unwrap_err();
        assert!(error.contains("height 0"), "{error}");
        assert_eq!(sequence.check_invariants(), Err(error));
    }
}
