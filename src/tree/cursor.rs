//! Positions, cursors and the in-order traversal protocol.
//!
//! A [`Position`] is a plain handle naming one slot of a tree. A [`Cursor`]
//! pairs a position with a shared borrow of its tree and can read and move;
//! a [`CursorMut`] pairs it with an exclusive borrow and can also update
//! values and remove the element under it.
//!
//! Traversal treats the end position as a ghost element between the last and
//! the first element: stepping forward from the last element reaches end,
//! and stepping forward again wraps to the first. Stepping backward from end
//! reaches the last element.

use super::AvlTree;
use super::node::NodeId;
use crate::compare::NaturalOrder;

// =============================================================================
// Position
// =============================================================================

/// A handle to one element of an [`AvlTree`], or to its end.
///
/// Positions are returned by [`AvlTree::insert`], [`AvlTree::find`],
/// [`AvlTree::begin`] and [`AvlTree::end`], and are dereferenced through the
/// tree. They are compared by identity, never by key.
///
/// The position returned by [`AvlTree::begin`] keeps referring to the
/// smallest element for as long as the tree is non-empty. That slot is kept
/// in place by moving entries between slots, which affects other positions:
///
/// - Inserting a key smaller than the current minimum moves the old minimum
///   out of the begin slot. A position obtained earlier for the old minimum
///   (from [`AvlTree::find`] or [`AvlTree::insert`]) then refers to the new
///   minimum instead.
/// - Erasing the minimum refills the begin slot with the next-smallest entry
///   and releases the slot that entry lived in. A position to that entry
///   becomes vacant, although the entry is still in the tree; it may later
///   be recycled for a new element.
///
/// Apart from these two cases, a position stays valid until the element it
/// refers to is erased. A vacant position reads as `None` and erasing it is a
/// no-op.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position(NodeId);

impl Position {
    #[inline]
    pub(crate) const fn new(node: NodeId) -> Self {
        Self(node)
    }

    #[inline]
    pub(crate) const fn node(self) -> NodeId {
        self.0
    }
}

// =============================================================================
// Traversal Protocol
// =============================================================================

impl<K, V, C> AvlTree<K, V, C> {
    /// In-order successor of `node`; end wraps around to the first element.
    pub(super) fn successor_of(&self, node: NodeId) -> NodeId {
        if node == NodeId::END {
            return self.begin().node();
        }
        let Some(slot) = self.arena.get(node) else {
            return NodeId::END;
        };
        if let Some(right) = slot.right {
            return self.arena.leftmost(right);
        }
        let mut child = node;
        while let Some(parent) = self.arena[child].parent {
            if self.arena[parent].left == Some(child) {
                return parent;
            }
            child = parent;
        }
        NodeId::END
    }

    /// In-order predecessor of `node`; end steps back to the last element
    /// and the first element steps back to end.
    pub(super) fn predecessor_of(&self, node: NodeId) -> NodeId {
        if node == NodeId::END {
            return self
                .root
                .map_or(NodeId::END, |root| self.arena.rightmost(root));
        }
        let Some(slot) = self.arena.get(node) else {
            return NodeId::END;
        };
        if let Some(left) = slot.left {
            return self.arena.rightmost(left);
        }
        let mut child = node;
        while let Some(parent) = self.arena[child].parent {
            if self.arena[parent].right == Some(child) {
                return parent;
            }
            child = parent;
        }
        NodeId::END
    }

    /// The position after `position` in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::AvlTree;
    ///
    /// let tree: AvlTree<i32, ()> = [2, 1, 3].into_iter().map(|key| (key, ())).collect();
    /// let second = tree.next(tree.begin());
    /// assert_eq!(tree.key(second), Some(&2));
    ///
    /// let last = tree.next(second);
    /// assert_eq!(tree.next(last), tree.end());
    /// assert_eq!(tree.next(tree.end()), tree.begin());
    /// ```
    #[must_use]
    pub fn next(&self, position: Position) -> Position {
        Position(self.successor_of(position.0))
    }

    /// The position before `position` in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::AvlTree;
    ///
    /// let tree: AvlTree<i32, ()> = [2, 1, 3].into_iter().map(|key| (key, ())).collect();
    /// let last = tree.prev(tree.end());
    /// assert_eq!(tree.key(last), Some(&3));
    /// assert_eq!(tree.prev(tree.begin()), tree.end());
    /// ```
    #[must_use]
    pub fn prev(&self, position: Position) -> Position {
        Position(self.predecessor_of(position.0))
    }

    /// A read-only cursor at `position`.
    #[must_use]
    pub const fn cursor(&self, position: Position) -> Cursor<'_, K, V, C> {
        Cursor {
            tree: self,
            node: position.0,
        }
    }

    /// A read-only cursor at the first element (or end when empty).
    #[must_use]
    pub const fn cursor_front(&self) -> Cursor<'_, K, V, C> {
        self.cursor(self.begin())
    }

    /// A mutable cursor at `position`.
    pub const fn cursor_mut(&mut self, position: Position) -> CursorMut<'_, K, V, C> {
        CursorMut {
            tree: self,
            node: position.0,
        }
    }

    /// A mutable cursor at the first element (or end when empty).
    pub const fn cursor_front_mut(&mut self) -> CursorMut<'_, K, V, C> {
        let position = self.begin();
        self.cursor_mut(position)
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A read-only cursor over an [`AvlTree`].
///
/// # Examples
///
/// ```rust
/// use ordtree::AvlTree;
///
/// let tree: AvlTree<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
/// let mut cursor = tree.cursor_front();
/// let mut seen = Vec::new();
/// while let Some((key, value)) = cursor.key_value() {
///     seen.push((*key, *value));
///     cursor.move_next();
/// }
/// assert_eq!(seen, vec![(1, 'a'), (2, 'b'), (3, 'c')]);
/// assert!(cursor.is_end());
/// ```
pub struct Cursor<'a, K, V, C = NaturalOrder> {
    tree: &'a AvlTree<K, V, C>,
    node: NodeId,
}

impl<'a, K, V, C> Cursor<'a, K, V, C> {
    /// The position under the cursor.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        Position(self.node)
    }

    /// Returns `true` when the cursor is at the end position.
    #[inline]
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.node == NodeId::END
    }

    /// The key under the cursor.
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.tree.arena.entry(self.node).map(|(key, _)| key)
    }

    /// The value under the cursor.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.tree.arena.entry(self.node).map(|(_, value)| value)
    }

    /// The key and value under the cursor.
    #[must_use]
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        self.tree.arena.entry(self.node)
    }

    /// Advances to the next position in key order.
    pub fn move_next(&mut self) {
        self.node = self.tree.successor_of(self.node);
    }

    /// Steps back to the previous position in key order.
    pub fn move_prev(&mut self) {
        self.node = self.tree.predecessor_of(self.node);
    }

    /// The entry after the cursor, without moving.
    #[must_use]
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        self.tree.arena.entry(self.tree.successor_of(self.node))
    }

    /// The entry before the cursor, without moving.
    #[must_use]
    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        self.tree.arena.entry(self.tree.predecessor_of(self.node))
    }
}

impl<K, V, C> Clone for Cursor<'_, K, V, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, C> Copy for Cursor<'_, K, V, C> {}

/// Cursors are equal when they point at the same slot of the same tree.
impl<K, V, C> PartialEq for Cursor<'_, K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl<K, V, C> Eq for Cursor<'_, K, V, C> {}

impl<K: std::fmt::Debug, V: std::fmt::Debug, C> std::fmt::Debug for Cursor<'_, K, V, C> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_tuple("Cursor")
            .field(&self.key_value())
            .finish()
    }
}

// =============================================================================
// CursorMut
// =============================================================================

/// A cursor over an [`AvlTree`] that can update values and remove elements.
///
/// # Examples
///
/// ```rust
/// use ordtree::AvlTree;
///
/// let mut tree: AvlTree<i32, i32> = (1..=6).map(|key| (key, key)).collect();
/// let mut cursor = tree.cursor_front_mut();
/// while let Some(key) = cursor.key().copied() {
///     if key % 2 == 0 {
///         cursor.remove_current();
///     } else {
///         if let Some(value) = cursor.value_mut() {
///             *value *= 100;
///         }
///         cursor.move_next();
///     }
/// }
///
/// let entries: Vec<(i32, i32)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
/// assert_eq!(entries, vec![(1, 100), (3, 300), (5, 500)]);
/// ```
pub struct CursorMut<'a, K, V, C = NaturalOrder> {
    tree: &'a mut AvlTree<K, V, C>,
    node: NodeId,
}

impl<K, V, C> CursorMut<'_, K, V, C> {
    /// The position under the cursor.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        Position(self.node)
    }

    /// Returns `true` when the cursor is at the end position.
    #[inline]
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.node == NodeId::END
    }

    /// The key under the cursor.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.tree.arena.entry(self.node).map(|(key, _)| key)
    }

    /// The value under the cursor.
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        self.tree.arena.entry(self.node).map(|(_, value)| value)
    }

    /// Mutable access to the value under the cursor.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.tree.arena.value_mut(self.node)
    }

    /// The key and value under the cursor.
    #[must_use]
    pub fn key_value(&self) -> Option<(&K, &V)> {
        self.tree.arena.entry(self.node)
    }

    /// Advances to the next position in key order.
    pub fn move_next(&mut self) {
        self.node = self.tree.successor_of(self.node);
    }

    /// Steps back to the previous position in key order.
    pub fn move_prev(&mut self) {
        self.node = self.tree.predecessor_of(self.node);
    }

    /// A read-only view of this cursor.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V, C> {
        Cursor {
            tree: &*self.tree,
            node: self.node,
        }
    }

    /// Removes the element under the cursor and moves to its successor.
    ///
    /// Returns `None` without moving when the cursor is at end.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        if self.node == NodeId::END {
            return None;
        }
        // Removing the minimum refills the holder slot with the successor.
        let next = (self.node != NodeId::BEGIN).then(|| self.tree.successor_of(self.node));
        let removed = self.tree.erase(Position(self.node));
        self.node = next.unwrap_or_else(|| self.tree.begin().node());
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tree_of(keys: &[i32]) -> AvlTree<i32, i32> {
        keys.iter().map(|&key| (key, key)).collect()
    }

    fn walk_forward(tree: &AvlTree<i32, i32>) -> Vec<i32> {
        let mut result = Vec::new();
        let mut position = tree.begin();
        while position != tree.end() {
            result.extend(tree.key(position).copied());
            position = tree.next(position);
        }
        result
    }

    fn walk_backward(tree: &AvlTree<i32, i32>) -> Vec<i32> {
        let mut result = Vec::new();
        let mut position = tree.prev(tree.end());
        while position != tree.end() {
            result.extend(tree.key(position).copied());
            position = tree.prev(position);
        }
        result
    }

    #[rstest]
    fn test_forward_walk_is_sorted() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(walk_forward(&tree), vec![1, 3, 4, 5, 7, 8, 9]);
    }

    #[rstest]
    fn test_backward_walk_is_reverse_sorted() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(walk_backward(&tree), vec![9, 8, 7, 5, 4, 3, 1]);
    }

    #[rstest]
    fn test_empty_tree_positions_collapse_to_end() {
        let tree = tree_of(&[]);
        assert_eq!(tree.next(tree.end()), tree.end());
        assert_eq!(tree.prev(tree.end()), tree.end());
        assert!(tree.cursor_front().is_end());
    }

    #[rstest]
    fn test_end_wraps_to_first() {
        let tree = tree_of(&[2, 1]);
        assert_eq!(tree.next(tree.end()), tree.begin());
        assert_eq!(tree.prev(tree.begin()), tree.end());
    }

    #[rstest]
    fn test_cursor_peek_does_not_move() {
        let tree = tree_of(&[1, 2, 3]);
        let cursor = tree.cursor(tree.find(&2));

        assert_eq!(cursor.peek_next(), Some((&3, &3)));
        assert_eq!(cursor.peek_prev(), Some((&1, &1)));
        assert_eq!(cursor.key(), Some(&2));
    }

    #[rstest]
    fn test_cursor_equality_is_identity() {
        let tree = tree_of(&[1, 2]);
        let other = tree_of(&[1, 2]);

        let mut first = tree.cursor_front();
        let second = tree.cursor(tree.find(&1));
        assert_eq!(first, second);
        assert_ne!(first, other.cursor_front());

        first.move_next();
        assert_ne!(first, second);
        first.move_prev();
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_cursor_mut_remove_current_advances() {
        let mut tree = tree_of(&[1, 2, 3, 4]);
        let mut cursor = tree.cursor_mut(tree.find(&2));

        assert_eq!(cursor.remove_current(), Some((2, 2)));
        assert_eq!(cursor.key(), Some(&3));
        assert_eq!(cursor.remove_current(), Some((3, 3)));
        assert_eq!(cursor.key(), Some(&4));
        assert_eq!(cursor.remove_current(), Some((4, 4)));
        assert!(cursor.is_end());
        assert_eq!(cursor.remove_current(), None);
        assert_eq!(walk_forward(&tree), vec![1]);
    }

    #[rstest]
    fn test_cursor_mut_remove_minimum_stays_on_begin() {
        let mut tree = tree_of(&[1, 2, 3]);
        let mut cursor = tree.cursor_front_mut();

        cursor.remove_current();
        assert_eq!(cursor.key(), Some(&2));
        cursor.remove_current();
        cursor.remove_current();
        assert!(cursor.is_end());
        assert!(tree.is_empty());
    }

    #[rstest]
    fn test_cursor_mut_updates_value() {
        let mut tree = tree_of(&[7]);
        let mut cursor = tree.cursor_front_mut();
        if let Some(value) = cursor.value_mut() {
            *value = 70;
        }
        assert_eq!(cursor.as_cursor().value(), Some(&70));
        assert_eq!(tree.first(), Some((&7, &70)));
    }

    #[rstest]
    fn test_new_minimum_retargets_position_of_old_minimum() {
        let mut tree: AvlTree<i32, &str> = AvlTree::new();
        let (five, _) = tree.insert(5, "five", false);
        let (three, _) = tree.insert(3, "three", false);

        assert_eq!(five, three);
        assert_eq!(five, tree.begin());
        assert_eq!(tree.key_value(five), Some((&3, &"three")));
        assert_ne!(tree.find(&5), five);
        assert_eq!(tree.value(tree.find(&5)), Some(&"five"));
    }

    #[rstest]
    fn test_erasing_minimum_vacates_position_of_its_successor() {
        let mut tree = tree_of(&[1]);
        let (two, _) = tree.insert(2, 2, false);
        assert_ne!(two, tree.begin());

        tree.erase(tree.begin());

        assert!(tree.contains(&2));
        assert_eq!(tree.find(&2), tree.begin());
        assert_eq!(tree.key(two), None);
        assert_eq!(tree.erase(two), None);
        assert_eq!(tree.len(), 1);
    }

    #[rstest]
    fn test_erasing_minimum_vacates_position_of_absorbed_parent() {
        let mut tree = tree_of(&[2, 1]);
        let two = tree.find(&2);
        assert_ne!(two, tree.begin());

        tree.erase(tree.begin());

        assert_eq!(tree.key(tree.begin()), Some(&2));
        assert_eq!(tree.key(two), None);
    }

    #[rstest]
    fn test_positions_survive_unrelated_erase() {
        let mut tree = tree_of(&[10, 20, 30, 40, 50]);
        let forty = tree.find(&40);
        tree.erase(tree.find(&20));
        tree.erase(tree.find(&10));

        assert_eq!(tree.key(forty), Some(&40));
        assert_eq!(tree.key(tree.next(forty)), Some(&50));
    }
}
