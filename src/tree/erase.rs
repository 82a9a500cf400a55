//! Deletion engine.
//!
//! A node with two children first trades structural positions with its
//! in-order successor, leaving it with at most one child. Such a node is then
//! spliced out, except for the minimum holder: that slot must survive, so it
//! absorbs the next-smallest entry instead and the absorbed slot is released.
//! Finally every ancestor of the affected position is rebalanced.

use super::node::NodeId;
use super::{AvlTree, Position};

impl<K, V, C> AvlTree<K, V, C> {
    /// Removes the element at `position` and returns its entry.
    ///
    /// Returns `None`, leaving the tree untouched, for the end position and
    /// for positions whose slot holds no element. A position must not be used
    /// after its element has been erased: its slot may be recycled for a later
    /// insertion, after which it refers to that new element instead.
    ///
    /// Erasing the minimum also moves the next-smallest entry into the begin
    /// slot and releases the slot it came from, so positions previously
    /// obtained for that entry become vacant. See [`Position`].
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, ()> = [5, 3, 8, 1, 4, 7, 9]
    ///     .into_iter()
    ///     .map(|key| (key, ()))
    ///     .collect();
    ///
    /// assert_eq!(tree.erase(tree.find(&5)), Some((5, ())));
    /// let keys: Vec<i32> = tree.keys().copied().collect();
    /// assert_eq!(keys, vec![1, 3, 4, 7, 8, 9]);
    ///
    /// assert_eq!(tree.erase(tree.end()), None);
    /// ```
    pub fn erase(&mut self, position: Position) -> Option<(K, V)> {
        let target = position.node();
        if target == NodeId::END || !self.arena.is_linked(target) {
            return None;
        }

        if let (Some(_), Some(right)) = (self.arena[target].left, self.arena[target].right) {
            let successor = self.arena.leftmost(right);
            self.swap_positions(target, successor);
        }

        let (removed, mut current) = if target == NodeId::BEGIN {
            self.unlink_minimum()
        } else {
            self.unlink(target)
        };

        while let Some(node) = current {
            let subtree_root = self.rebalance(node);
            current = self.arena[subtree_root].parent;
        }
        self.length -= 1;
        removed
    }

    /// Exchanges the structural positions of `target` and its in-order
    /// successor `successor`, a node of its right subtree with no left child.
    ///
    /// Links and heights trade places; entries stay in their slots.
    fn swap_positions(&mut self, target: NodeId, successor: NodeId) {
        let target_node = &self.arena[target];
        let (parent, left, right, height) = (
            target_node.parent,
            target_node.left,
            target_node.right,
            target_node.height,
        );
        let successor_node = &self.arena[successor];
        let (successor_parent, successor_right, successor_height) = (
            successor_node.parent,
            successor_node.right,
            successor_node.height,
        );
        debug_assert!(successor_node.left.is_none());

        self.replace_child(parent, target, Some(successor));
        self.arena[successor].parent = parent;
        self.arena[successor].left = left;
        if let Some(left) = left {
            self.arena[left].parent = Some(successor);
        }

        if right == Some(successor) {
            self.arena[successor].right = Some(target);
            self.arena[target].parent = Some(successor);
        } else {
            self.arena[successor].right = right;
            if let Some(right) = right {
                self.arena[right].parent = Some(successor);
            }
            if let Some(successor_parent) = successor_parent {
                self.arena[successor_parent].left = Some(target);
            }
            self.arena[target].parent = successor_parent;
        }

        self.arena[target].left = None;
        self.arena[target].right = successor_right;
        if let Some(successor_right) = successor_right {
            self.arena[successor_right].parent = Some(target);
        }
        self.arena[successor].height = height;
        self.arena[target].height = successor_height;
        engine_trace!(node = ?target, successor = ?successor, "swap with successor");
    }

    /// Splices out a non-minimum node with at most one child.
    ///
    /// Returns the removed entry and the node where rebalancing starts.
    fn unlink(&mut self, target: NodeId) -> (Option<(K, V)>, Option<NodeId>) {
        let node = &self.arena[target];
        let parent = node.parent;
        let child = node.left.or(node.right);
        debug_assert!(node.left.is_none() || node.right.is_none());

        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
        self.replace_child(parent, target, child);
        (self.arena.release(target), parent)
    }

    /// Removes the entry held by the minimum holder while keeping the slot.
    ///
    /// The holder has no left child. If it has a right child (necessarily a
    /// leaf), it absorbs that child's entry. Otherwise it absorbs its parent's
    /// entry, right subtree and position. A holder that is the only node
    /// leaves the tree empty.
    fn unlink_minimum(&mut self) -> (Option<(K, V)>, Option<NodeId>) {
        let removed = self.arena[NodeId::BEGIN].entry.take();
        let holder_parent = self.arena[NodeId::BEGIN].parent;

        if let Some(right) = self.arena[NodeId::BEGIN].right {
            debug_assert!(self.arena[right].left.is_none() && self.arena[right].right.is_none());
            let height = self.arena[right].height;
            self.arena[NodeId::BEGIN].right = None;
            self.arena[NodeId::BEGIN].entry = self.arena.release(right);
            self.arena[NodeId::BEGIN].height = height;
            engine_trace!(absorbed = ?right, "minimum holder absorbs right child");
            return (removed, Some(NodeId::BEGIN));
        }

        let Some(parent) = holder_parent else {
            self.arena.reset();
            self.root = None;
            return (removed, None);
        };

        let grandparent = self.arena[parent].parent;
        let sibling = self.arena[parent].right;
        let height = self.arena[parent].height;

        self.arena[parent].left = None;
        self.arena[parent].right = None;
        self.replace_child(grandparent, parent, Some(NodeId::BEGIN));
        self.arena[NodeId::BEGIN].parent = grandparent;
        self.arena[NodeId::BEGIN].right = sibling;
        if let Some(sibling) = sibling {
            self.arena[sibling].parent = Some(NodeId::BEGIN);
        }
        self.arena[NodeId::BEGIN].entry = self.arena.release(parent);
        self.arena[NodeId::BEGIN].height = height;
        engine_trace!(absorbed = ?parent, "minimum holder absorbs parent");
        (removed, Some(NodeId::BEGIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tree_of(keys: &[i32]) -> AvlTree<i32, i32> {
        let mut tree = AvlTree::new();
        for &key in keys {
            tree.insert(key, key, false);
        }
        tree
    }

    fn keys<V>(tree: &AvlTree<i32, V>) -> Vec<i32> {
        tree.keys().copied().collect()
    }

    #[rstest]
    fn test_erase_two_child_node_moves_successor_into_place() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        let target = tree.find(&5);
        let successor = tree.find(&7);
        let Some(root) = tree.root else {
            panic!("tree should have a root");
        };
        assert_eq!(root, target.node());

        assert_eq!(tree.erase(target), Some((5, 5)));

        assert_eq!(tree.root, Some(successor.node()));
        assert_eq!(tree.find(&7), successor);
        assert_eq!(keys(&tree), vec![1, 3, 4, 7, 8, 9]);
        assert!(tree.check_invariants().is_ok());
    }

    #[rstest]
    fn test_erase_two_child_node_whose_successor_is_equal() {
        let mut tree: AvlTree<i32, char> = AvlTree::new();
        tree.insert(2, 'a', true);
        tree.insert(1, 'b', true);
        tree.insert(2, 'c', true);
        let target = tree.next(tree.begin());
        assert_eq!(tree.root, Some(target.node()));

        assert_eq!(tree.erase(target), Some((2, 'a')));

        let entries: Vec<(i32, char)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, vec![(1, 'b'), (2, 'c')]);
        assert!(tree.check_invariants().is_ok());
    }

    #[rstest]
    fn test_erase_among_equal_keys_keeps_insertion_order() {
        let mut tree: AvlTree<i32, usize> = AvlTree::new();
        for (index, &key) in [2, 1, 2, 2, 3, 2, 2, 0, 2].iter().enumerate() {
            tree.insert(key, index, true);
        }

        loop {
            let position = tree.find(&2);
            if tree.is_end(position) {
                break;
            }
            assert_eq!(tree.erase(position).map(|(key, _)| key), Some(2));
            assert!(tree.check_invariants().is_ok());

            let survivors: Vec<usize> =
                tree.iter().filter(|(k, _)| **k == 2).map(|(_, v)| *v).collect();
            assert!(survivors.windows(2).all(|pair| pair[0] < pair[1]));
        }

        assert_eq!(keys(&tree), vec![0, 1, 3]);
    }

    #[rstest]
    fn test_erase_with_adjacent_successor() {
        // 2 has right child 3 with no left subtree: the successor is adjacent.
        let mut tree = tree_of(&[2, 1, 3]);
        let successor = tree.find(&3);

        tree.erase(tree.find(&2));

        assert_eq!(tree.root, Some(successor.node()));
        assert_eq!(keys(&tree), vec![1, 3]);
        assert!(tree.check_invariants().is_ok());
    }

    #[rstest]
    fn test_erase_minimum_repeatedly() {
        let mut tree = tree_of(&[1, 2, 3, 4, 5]);
        let begin = tree.begin();

        for expected_next in [2, 3, 4, 5] {
            tree.erase(tree.begin());
            assert_eq!(tree.begin(), begin);
            assert_eq!(tree.key(tree.begin()), Some(&expected_next));
            assert!(tree.check_invariants().is_ok());
        }

        assert_eq!(tree.erase(tree.begin()), Some((5, 5)));
        assert!(tree.is_empty());
        assert_eq!(tree.begin(), tree.end());
        assert!(tree.check_invariants().is_ok());
    }

    #[rstest]
    fn test_erase_minimum_absorbs_parent_and_rebalances() {
        // Removing 1 from [2, 1, 4, 3, 5] leaves 2 with a right subtree of
        // height 2 after the holder takes its place, forcing a rotation.
        let mut tree = tree_of(&[2, 1, 4, 3, 5]);
        let begin = tree.begin();
        tree.erase(tree.find(&5));
        tree.erase(begin);

        assert_eq!(tree.begin(), begin);
        assert_eq!(tree.key(begin), Some(&2));
        assert_eq!(keys(&tree), vec![2, 3, 4]);
        assert!(tree.check_invariants().is_ok());
    }

    #[rstest]
    fn test_erase_root_with_single_left_child() {
        let mut tree = tree_of(&[5, 3]);
        tree.erase(tree.find(&5));

        assert_eq!(tree.root, Some(NodeId::BEGIN));
        assert_eq!(keys(&tree), vec![3]);
        assert!(tree.check_invariants().is_ok());
    }

    #[rstest]
    fn test_erase_leaf() {
        let mut tree = tree_of(&[2, 1, 3]);
        assert_eq!(tree.erase(tree.find(&3)), Some((3, 3)));
        assert_eq!(keys(&tree), vec![1, 2]);
        assert!(tree.check_invariants().is_ok());
    }

    #[rstest]
    fn test_erase_end_and_stale_positions_are_noops() {
        let mut tree = tree_of(&[1, 2, 3]);
        let stale = tree.find(&3);
        tree.erase(stale);

        assert_eq!(tree.erase(stale), None);
        assert_eq!(tree.erase(tree.end()), None);
        assert_eq!(tree.len(), 2);

        let mut empty: AvlTree<i32, i32> = AvlTree::new();
        assert_eq!(empty.erase(empty.begin()), None);
        assert!(empty.is_empty());
    }

    #[rstest]
    fn test_insert_then_erase_round_trip() {
        let mut tree = tree_of(&[10, 20, 30, 40, 50, 60]);
        let before = keys(&tree);

        for key in [5, 25, 65] {
            let (position, _) = tree.insert(key, key, false);
            tree.erase(position);
            assert_eq!(keys(&tree), before);
            assert_eq!(tree.len(), before.len());
            assert!(tree.check_invariants().is_ok());
        }
    }

    #[rstest]
    fn test_erase_everything_in_mixed_order_stays_balanced() {
        let input: Vec<i32> = (0..200).map(|index| (index * 37) % 200).collect();
        let mut tree = tree_of(&input);

        for (step, key) in input.iter().rev().enumerate() {
            assert!(tree.erase(tree.find(key)).is_some());
            assert_eq!(tree.len(), input.len() - step - 1);
            assert!(tree.check_invariants().is_ok(), "after erasing {key}");
        }
        assert!(tree.is_empty());
    }
}
