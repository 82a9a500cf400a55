//! AVL tree engine with sentinel-stable positions.
//!
//! This module provides [`AvlTree`], a mutable height-balanced binary search
//! tree that backs the ordered containers of this crate.
//!
//! # Overview
//!
//! Nodes live in an index-addressed arena and refer to each other by index,
//! so the parent/child graph is expressed without shared ownership. Two
//! arena slots are reserved for the lifetime of the tree:
//!
//! - **begin** holds the smallest element whenever the tree is non-empty.
//!   Insertion of a new minimum and removal of the current minimum both
//!   relocate contents so that the minimum keeps living in this slot. A
//!   [`Position`] obtained from [`AvlTree::begin`] therefore keeps referring
//!   to "the first element" across such changes.
//! - **end** is the past-the-end marker. It is never linked into the tree.
//!
//! # Time Complexity
//!
//! | Operation                    | Complexity        |
//! |------------------------------|-------------------|
//! | `insert`                     | O(log N)          |
//! | `erase`                      | O(log N)          |
//! | `find` / `contains`          | O(log N)          |
//! | `lower_bound`/`upper_bound`  | O(log N)          |
//! | `begin` / `end`              | O(1)              |
//! | `next` / `prev`              | O(log N), O(1) amortized over a traversal |
//! | `len` / `is_empty`           | O(1)              |
//! | `swap`                       | O(1)              |
//!
//! # Examples
//!
//! ```rust
//! use ordtree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key, key * 10, false);
//! }
//!
//! let keys: Vec<i32> = tree.keys().copied().collect();
//! assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);
//!
//! let first = tree.begin();
//! assert_eq!(tree.key(first), Some(&1));
//!
//! // A new minimum lands in the same slot
//! tree.insert(0, 0, false);
//! assert_eq!(tree.begin(), first);
//! assert_eq!(tree.key(first), Some(&0));
//! ```

mod cursor;
mod erase;
mod insert;
mod iter;
mod node;
mod rotation;
mod validate;

use std::fmt;

use crate::compare::{Comparator, NaturalOrder};

pub use cursor::{Cursor, CursorMut, Position};
pub use iter::{IntoIter, IntoKeys, Iter, Keys, Values};

use node::{Arena, NodeId};

// =============================================================================
// AvlTree Definition
// =============================================================================

/// A height-balanced ordered tree of key-value entries.
///
/// The duplicate policy is chosen per insertion: with `allow_duplicate` set,
/// equivalent keys are kept side by side (multiset semantics); otherwise an
/// equivalent key is left untouched and its position is reported.
///
/// Keys are ordered by the comparator `C`, which defaults to
/// [`NaturalOrder`].
///
/// # Examples
///
/// ```rust
/// use ordtree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// let (position, created) = tree.insert("b", 2, false);
/// assert!(created);
///
/// let (again, created) = tree.insert("b", 20, false);
/// assert!(!created);
/// assert_eq!(again, position);
/// assert_eq!(tree.value(position), Some(&2));
///
/// assert_eq!(tree.find(&"z"), tree.end());
/// ```
#[derive(Clone)]
pub struct AvlTree<K, V, C = NaturalOrder> {
    arena: Arena<K, V>,
    root: Option<NodeId>,
    length: usize,
    comparator: C,
}

impl<K, V> AvlTree<K, V, NaturalOrder> {
    /// Creates an empty tree ordered by [`Ord`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::AvlTree;
    ///
    /// let tree: AvlTree<i32, String> = AvlTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.begin(), tree.end());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Creates an empty tree with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
            length: 0,
            comparator: NaturalOrder,
        }
    }
}

impl<K, V, C> AvlTree<K, V, C> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// `comparator` must be a strict weak ordering over `K` and must not
    /// change its answers while the tree holds keys. Behaviour is unspecified
    /// otherwise; see [`Comparator`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::{AvlTree, ReverseOrder};
    ///
    /// let mut tree = AvlTree::with_comparator(ReverseOrder);
    /// tree.insert(1, (), false);
    /// tree.insert(3, (), false);
    /// tree.insert(2, (), false);
    ///
    /// let keys: Vec<i32> = tree.keys().copied().collect();
    /// assert_eq!(keys, vec![3, 2, 1]);
    /// ```
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            length: 0,
            comparator,
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Upper bound on the number of elements a tree can hold.
    ///
    /// Limited by the 32-bit arena index (one slot is reserved for the end
    /// sentinel) and by the address space.
    #[must_use]
    pub fn max_size(&self) -> usize {
        let by_memory = isize::MAX.unsigned_abs() / size_of::<node::Node<K, V>>().max(1);
        let by_index = usize::try_from(u32::MAX - 1).unwrap_or(usize::MAX);
        by_memory.min(by_index)
    }

    /// Returns the comparator that orders this tree.
    #[inline]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Height of the tree; 0 when empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::AvlTree;
    ///
    /// let tree: AvlTree<i32, ()> = (1..=5).map(|key| (key, ())).collect();
    /// assert!(tree.height() <= 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> u32 {
        self.arena.height(self.root)
    }

    /// Position of the smallest element, or [`end`](Self::end) when empty.
    ///
    /// While the tree is non-empty this always returns the same position;
    /// only the element it refers to changes.
    #[inline]
    #[must_use]
    pub const fn begin(&self) -> Position {
        if self.root.is_some() {
            Position::new(NodeId::BEGIN)
        } else {
            Position::new(NodeId::END)
        }
    }

    /// The past-the-end position.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> Position {
        Position::new(NodeId::END)
    }

    /// Returns `true` if `position` is the past-the-end position.
    #[inline]
    #[must_use]
    pub fn is_end(&self, position: Position) -> bool {
        position.node() == NodeId::END
    }

    /// Key stored at `position`, or `None` for the end position.
    #[must_use]
    pub fn key(&self, position: Position) -> Option<&K> {
        self.arena.entry(position.node()).map(|(key, _)| key)
    }

    /// Value stored at `position`, or `None` for the end position.
    #[must_use]
    pub fn value(&self, position: Position) -> Option<&V> {
        self.arena.entry(position.node()).map(|(_, value)| value)
    }

    /// Mutable access to the value stored at `position`.
    ///
    /// Keys cannot be mutated in place since that could break ordering.
    pub fn value_mut(&mut self, position: Position) -> Option<&mut V> {
        self.arena.value_mut(position.node())
    }

    /// Key and value stored at `position`.
    #[must_use]
    pub fn key_value(&self, position: Position) -> Option<(&K, &V)> {
        self.arena.entry(position.node())
    }

    /// The smallest entry.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.key_value(self.begin())
    }

    /// The largest entry.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.root
            .and_then(|root| self.arena.entry(self.arena.rightmost(root)))
    }

    /// Drops every element. Both sentinel slots are reset fresh.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, i32> = (0..10).map(|key| (key, key)).collect();
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.begin(), tree.end());
    /// ```
    pub fn clear(&mut self) {
        engine_debug!(len = self.length, "clear tree");
        self.arena.reset();
        self.root = None;
        self.length = 0;
    }

    /// Exchanges the whole state of two trees in constant time.
    ///
    /// Positions move with the elements they refer to.
    pub fn swap(&mut self, other: &mut Self) {
        engine_debug!(left = self.length, right = other.length, "swap trees");
        std::mem::swap(self, other);
    }

    /// Removes and returns the smallest entry.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.erase(self.begin())
    }

    /// Removes and returns the largest entry.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.root.map(|root| self.arena.rightmost(root))?;
        self.erase(Position::new(last))
    }

    /// Points the parent's link (or the root) that referred to `old` at `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            Some(parent) => {
                if self.arena[parent].left == Some(old) {
                    self.arena[parent].left = new;
                } else {
                    debug_assert_eq!(self.arena[parent].right, Some(old));
                    self.arena[parent].right = new;
                }
            }
            None => self.root = new,
        }
    }
}

// =============================================================================
// Lookup
// =============================================================================

impl<K, V, C: Comparator<K>> AvlTree<K, V, C> {
    /// Position of an element equivalent to `key`, or [`end`](Self::end).
    ///
    /// With duplicates present, any one of the equivalent elements may be
    /// returned; use [`lower_bound`](Self::lower_bound) for the first one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::AvlTree;
    ///
    /// let tree: AvlTree<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    /// let position = tree.find(&2);
    /// assert_eq!(tree.value(position), Some(&"two"));
    /// assert_eq!(tree.find(&3), tree.end());
    /// ```
    #[must_use]
    pub fn find(&self, key: &K) -> Position {
        let mut current = self.root;
        while let Some(node) = current {
            match self.comparator.compare(key, self.arena.key(node)) {
                std::cmp::Ordering::Less => current = self.arena[node].left,
                std::cmp::Ordering::Greater => current = self.arena[node].right,
                std::cmp::Ordering::Equal => return Position::new(node),
            }
        }
        self.end()
    }

    /// Returns `true` if an element equivalent to `key` is present.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.find(key) != self.end()
    }

    /// Position of the first element that does not order before `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::AvlTree;
    ///
    /// let tree: AvlTree<i32, ()> = [10, 20, 30].into_iter().map(|key| (key, ())).collect();
    /// assert_eq!(tree.key(tree.lower_bound(&20)), Some(&20));
    /// assert_eq!(tree.key(tree.lower_bound(&21)), Some(&30));
    /// assert_eq!(tree.lower_bound(&31), tree.end());
    /// ```
    #[must_use]
    pub fn lower_bound(&self, key: &K) -> Position {
        self.bound(|node_key| !self.comparator.less(node_key, key))
    }

    /// Position of the first element that orders after `key`.
    #[must_use]
    pub fn upper_bound(&self, key: &K) -> Position {
        self.bound(|node_key| self.comparator.less(key, node_key))
    }

    /// Leftmost node satisfying a predicate that is monotone in key order.
    fn bound(&self, mut satisfies: impl FnMut(&K) -> bool) -> Position {
        let mut candidate = NodeId::END;
        let mut current = self.root;
        while let Some(node) = current {
            if satisfies(self.arena.key(node)) {
                candidate = node;
                current = self.arena[node].left;
            } else {
                current = self.arena[node].right;
            }
        }
        Position::new(candidate)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Default> Default for AvlTree<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for AvlTree<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for AvlTree<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for AvlTree<K, V, C> {}

/// Inserts each entry without duplicates; entries with a key already present
/// are dropped.
impl<K, V, C: Comparator<K>> Extend<(K, V)> for AvlTree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value, false);
        }
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for AvlTree<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ReverseOrder;
    use rstest::rstest;

    fn tree_of(keys: &[i32]) -> AvlTree<i32, i32> {
        let mut tree = AvlTree::new();
        for &key in keys {
            tree.insert(key, key * 10, false);
        }
        tree
    }

    #[rstest]
    fn test_new_tree_is_empty() {
        let tree: AvlTree<i32, ()> = AvlTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.begin(), tree.end());
        assert!(tree.first().is_none());
        assert!(tree.last().is_none());
    }

    #[rstest]
    fn test_default_matches_new() {
        let tree: AvlTree<i32, ()> = AvlTree::default();
        assert_eq!(tree, AvlTree::new());
    }

    #[rstest]
    fn test_first_and_last() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(tree.first(), Some((&1, &10)));
        assert_eq!(tree.last(), Some((&9, &90)));
    }

    #[rstest]
    #[case(5, true)]
    #[case(1, true)]
    #[case(9, true)]
    #[case(6, false)]
    #[case(0, false)]
    #[case(10, false)]
    fn test_find_and_contains(#[case] key: i32, #[case] present: bool) {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(tree.contains(&key), present);
        let position = tree.find(&key);
        if present {
            assert_eq!(tree.key(position), Some(&key));
        } else {
            assert_eq!(position, tree.end());
        }
    }

    #[rstest]
    fn test_find_on_empty_tree_returns_end() {
        let tree: AvlTree<i32, ()> = AvlTree::new();
        assert_eq!(tree.find(&1), tree.end());
        assert!(!tree.contains(&1));
    }

    #[rstest]
    #[case(0, Some(1), Some(1))]
    #[case(4, Some(4), Some(5))]
    #[case(6, Some(7), Some(7))]
    #[case(9, Some(9), None)]
    #[case(10, None, None)]
    fn test_bounds(#[case] key: i32, #[case] lower: Option<i32>, #[case] upper: Option<i32>) {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(tree.key(tree.lower_bound(&key)).copied(), lower);
        assert_eq!(tree.key(tree.upper_bound(&key)).copied(), upper);
    }

    #[rstest]
    fn test_value_mut_updates_in_place() {
        let mut tree = tree_of(&[1, 2, 3]);
        let position = tree.find(&2);
        if let Some(value) = tree.value_mut(position) {
            *value = 200;
        }
        assert_eq!(tree.value(position), Some(&200));
        assert!(tree.value_mut(tree.end()).is_none());
    }

    #[rstest]
    fn test_end_position_has_no_entry() {
        let tree = tree_of(&[1]);
        assert!(tree.is_end(tree.end()));
        assert!(tree.key_value(tree.end()).is_none());
    }

    #[rstest]
    fn test_clear_resets_sentinels() {
        let mut tree = tree_of(&[3, 1, 2]);
        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.begin(), tree.end());
        assert_eq!(tree.arena.slot_count(), 2);
        assert!(tree.check_invariants().is_ok());

        tree.insert(7, 70, false);
        assert_eq!(tree.first(), Some((&7, &70)));
    }

    #[rstest]
    fn test_swap_exchanges_contents_and_positions() {
        let mut left = tree_of(&[1, 2, 3]);
        let mut right = tree_of(&[10]);
        let position = left.find(&2);

        left.swap(&mut right);

        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 3);
        assert_eq!(right.key(position), Some(&2));
        assert_eq!(left.first(), Some((&10, &100)));
    }

    #[rstest]
    fn test_pop_first_and_last() {
        let mut tree = tree_of(&[2, 1, 3]);
        assert_eq!(tree.pop_first(), Some((1, 10)));
        assert_eq!(tree.pop_last(), Some((3, 30)));
        assert_eq!(tree.pop_last(), Some((2, 20)));
        assert_eq!(tree.pop_first(), None);
        assert!(tree.is_empty());
    }

    #[rstest]
    fn test_reverse_comparator_orders_descending() {
        let mut tree = AvlTree::with_comparator(ReverseOrder);
        for key in [1, 5, 3] {
            tree.insert(key, (), false);
        }
        assert_eq!(tree.first(), Some((&5, &())));
        assert_eq!(tree.key(tree.lower_bound(&4)), Some(&3));
    }

    #[rstest]
    fn test_debug_formats_as_map() {
        let tree = tree_of(&[2, 1]);
        assert_eq!(format!("{tree:?}"), "{1: 10, 2: 20}");
    }

    #[rstest]
    fn test_max_size_is_bounded_by_index_space() {
        let tree: AvlTree<u8, ()> = AvlTree::new();
        assert!(tree.max_size() <= u32::MAX as usize - 1);
        assert!(tree.max_size() > 0);
    }

    #[rstest]
    fn test_with_capacity_starts_empty() {
        let tree: AvlTree<i32, i32> = AvlTree::with_capacity(64);
        assert!(tree.is_empty());
        assert_eq!(tree.begin(), tree.end());
    }
}
