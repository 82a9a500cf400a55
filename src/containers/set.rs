//! Unique-key ordered set.

use std::fmt;

use crate::compare::{Comparator, NaturalOrder};
use crate::tree::{AvlTree, IntoKeys, Keys, Position};

/// An ordered set of unique keys.
///
/// # Examples
///
/// ```rust
/// use ordtree::OrderedSet;
///
/// let mut set = OrderedSet::new();
/// assert!(set.insert(3).1);
/// assert!(set.insert(1).1);
/// assert!(!set.insert(3).1);
///
/// assert_eq!(set.first(), Some(&1));
/// assert_eq!(set.last(), Some(&3));
/// assert!(set.remove(&1));
/// assert!(!set.remove(&1));
/// ```
#[derive(Clone)]
pub struct OrderedSet<K, C = NaturalOrder> {
    tree: AvlTree<K, (), C>,
}

impl<K> OrderedSet<K, NaturalOrder> {
    /// Creates an empty set ordered by [`Ord`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: AvlTree::new(),
        }
    }
}

impl<K, C> OrderedSet<K, C> {
    /// Creates an empty set ordered by `comparator`, which must be a strict
    /// weak ordering (see [`Comparator`]).
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: AvlTree::with_comparator(comparator),
        }
    }

    /// Returns the number of keys.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set holds no keys.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two sets in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Position of the smallest key, or [`end`](Self::end) when empty.
    #[must_use]
    pub const fn begin(&self) -> Position {
        self.tree.begin()
    }

    /// The past-the-end position.
    #[must_use]
    pub const fn end(&self) -> Position {
        self.tree.end()
    }

    /// The position after `position`.
    #[must_use]
    pub fn next(&self, position: Position) -> Position {
        self.tree.next(position)
    }

    /// The position before `position`.
    #[must_use]
    pub fn prev(&self, position: Position) -> Position {
        self.tree.prev(position)
    }

    /// Key at `position`, or `None` for the end position.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&K> {
        self.tree.key(position)
    }

    /// The smallest key.
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.tree.first().map(|(key, ())| key)
    }

    /// The largest key.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.tree.last().map(|(key, ())| key)
    }

    /// Removes the key at `position`.
    pub fn erase(&mut self, position: Position) -> Option<K> {
        self.tree.erase(position).map(|(key, ())| key)
    }

    /// Returns an iterator over keys in order.
    #[must_use]
    pub fn iter(&self) -> Keys<'_, K, (), C> {
        self.tree.keys()
    }

    /// The underlying tree, for cursor-based traversal.
    #[must_use]
    pub const fn as_tree(&self) -> &AvlTree<K, (), C> {
        &self.tree
    }
}

impl<K, C: Comparator<K>> OrderedSet<K, C> {
    /// Inserts `key` unless an equivalent key is present.
    ///
    /// Returns the position of the key and whether it was inserted.
    pub fn insert(&mut self, key: K) -> (Position, bool) {
        self.tree.insert(key, (), false)
    }

    /// Inserts every key of `keys` in turn, reporting each outcome.
    ///
    /// An earlier returned position for the then-smallest key refers to the
    /// new minimum once a later key takes its place. See [`Position`].
    pub fn insert_many<I>(&mut self, keys: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().map(|key| self.insert(key)).collect()
    }

    /// Position of `key`, or [`end`](Self::end).
    #[must_use]
    pub fn find(&self, key: &K) -> Position {
        self.tree.find(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Removes `key` and reports whether it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        let position = self.tree.find(key);
        self.tree.erase(position).is_some()
    }

    /// Moves every key of `other` that is absent from `self`.
    ///
    /// Keys already present in `self` stay in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::OrderedSet;
    ///
    /// let mut left: OrderedSet<i32> = [1, 2].into_iter().collect();
    /// let mut right: OrderedSet<i32> = [2, 3].into_iter().collect();
    /// left.merge(&mut right);
    ///
    /// assert_eq!(left.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// assert_eq!(right.iter().copied().collect::<Vec<_>>(), vec![2]);
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        let mut cursor = other.tree.cursor_front_mut();
        while let Some(key) = cursor.key() {
            if self.tree.contains(key) {
                cursor.move_next();
            } else if let Some((key, ())) = cursor.remove_current() {
                self.tree.insert(key, (), false);
            }
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, C: Default> Default for OrderedSet<K, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: fmt::Debug, C> fmt::Debug for OrderedSet<K, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, C> PartialEq for OrderedSet<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, C> Eq for OrderedSet<K, C> {}

impl<K, C: Comparator<K>> Extend<K> for OrderedSet<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K, C: Comparator<K> + Default> FromIterator<K> for OrderedSet<K, C> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<K, C> IntoIterator for OrderedSet<K, C> {
    type Item = K;
    type IntoIter = IntoKeys<K, (), C>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_keys()
    }
}

impl<'a, K, C> IntoIterator for &'a OrderedSet<K, C> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, (), C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
