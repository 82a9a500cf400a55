//! Insertion engine.
//!
//! Descends from the root recording the path, attaches a fresh leaf, then
//! rebalances the recorded path bottom-up. A key smaller than the current
//! minimum is special: the minimum-holder slot receives the new entry and
//! its previous contents move into a freshly allocated slot.

use std::cmp::Ordering;

use smallvec::SmallVec;

use super::node::{Node, NodeId};
use super::{AvlTree, Position};
use crate::compare::Comparator;

/// Inline capacity of the descent path. An AVL tree indexed by `u32` is never
/// taller than this, so the path stays on the stack.
const DESCENT_PATH_INLINE: usize = 48;

type DescentPath = SmallVec<[NodeId; DESCENT_PATH_INLINE]>;

impl<K, V, C: Comparator<K>> AvlTree<K, V, C> {
    /// Inserts `key` with `value`.
    ///
    /// When `allow_duplicate` is `false` and an equivalent key is already
    /// present, nothing changes and the existing position is returned with
    /// `false`. With `allow_duplicate` set, an equivalent key is placed after
    /// the existing ones.
    ///
    /// Returns the position of the element and whether it was created.
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
    /// let mut tree = AvlTree::new();
    /// assert!(tree.insert(5, "five", false).1);
    /// assert!(!tree.insert(5, "FIVE", false).1);
    /// assert_eq!(tree.len(), 1);
    ///
    /// // Multiset semantics
    /// assert!(tree.insert(5, "again", true).1);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V, allow_duplicate: bool) -> (Position, bool) {
        let Some(root) = self.root else {
            self.arena[NodeId::BEGIN] = Node::leaf(None, (key, value));
            self.root = Some(NodeId::BEGIN);
            self.length = 1;
            return (Position::new(NodeId::BEGIN), true);
        };

        let mut path = DescentPath::new();
        let mut current = root;
        let created = loop {
            path.push(current);
            let ordering = self.comparator.compare(&key, self.arena.key(current));
            if ordering == Ordering::Equal && !allow_duplicate {
                return (Position::new(current), false);
            }
            if ordering == Ordering::Less {
                match self.arena[current].left {
                    Some(left) => current = left,
                    None => break self.attach_left(current, key, value, &mut path),
                }
            } else {
                match self.arena[current].right {
                    Some(right) => current = right,
                    None => break self.attach_right(current, key, value),
                }
            }
        };

        for &node in path.iter().rev() {
            self.rebalance(node);
        }
        self.length += 1;
        (Position::new(created), true)
    }

    /// Hangs a new leaf on the empty left slot of `parent`.
    ///
    /// If the key is a new minimum, `parent` is the minimum holder. Its
    /// contents then move into a fresh slot that takes over its structural
    /// position, and the minimum holder becomes that slot's left leaf with
    /// the new entry. The last entry of `path` is updated to the fresh slot.
    fn attach_left(&mut self, parent: NodeId, key: K, value: V, path: &mut DescentPath) -> NodeId {
        let below_minimum = self.comparator.less(&key, self.arena.key(NodeId::BEGIN));
        if !below_minimum {
            let leaf = self.arena.allocate(Node::leaf(Some(parent), (key, value)));
            self.arena[parent].left = Some(leaf);
            return leaf;
        }

        debug_assert_eq!(parent, NodeId::BEGIN);
        let holder = std::mem::replace(
            &mut self.arena[NodeId::BEGIN],
            Node::leaf(None, (key, value)),
        );
        let grandparent = holder.parent;
        let right = holder.right;
        let relocated = self.arena.allocate(holder);

        if let Some(right) = right {
            self.arena[right].parent = Some(relocated);
        }
        self.replace_child(grandparent, NodeId::BEGIN, Some(relocated));
        self.arena[relocated].left = Some(NodeId::BEGIN);
        self.arena[NodeId::BEGIN].parent = Some(relocated);

        if let Some(last) = path.last_mut() {
            *last = relocated;
        }
        engine_trace!(relocated = ?relocated, "minimum holder takes new minimum");
        NodeId::BEGIN
    }

    /// Hangs a new leaf on the empty right slot of `parent`.
    fn attach_right(&mut self, parent: NodeId, key: K, value: V) -> NodeId {
        let leaf = self.arena.allocate(Node::leaf(Some(parent), (key, value)));
        self.arena[parent].right = Some(leaf);
        leaf
    }
}
