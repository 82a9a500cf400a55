//! Unique-key ordered map.

use std::fmt;

use crate::compare::{Comparator, NaturalOrder};
use crate::error::ContainerError;
use crate::tree::{AvlTree, IntoIter, Iter, Keys, Position, Values};

/// An ordered map with unique keys.
///
/// # Examples
///
/// ```rust
/// use ordtree::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert(2, "two");
/// map.insert(1, "one");
///
/// let (_, created) = map.insert(1, "uno");
/// assert!(!created);
/// assert_eq!(map.get(&1), Some(&"one"));
///
/// map.insert_or_assign(1, "uno");
/// assert_eq!(map.get(&1), Some(&"uno"));
///
/// let keys: Vec<i32> = map.keys().copied().collect();
/// assert_eq!(keys, vec![1, 2]);
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V, C = NaturalOrder> {
    tree: AvlTree<K, V, C>,
}

impl<K, V> OrderedMap<K, V, NaturalOrder> {
    /// Creates an empty map ordered by [`Ord`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: AvlTree::new(),
        }
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`, which must be a strict
    /// weak ordering (see [`Comparator`]).
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: AvlTree::with_comparator(comparator),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two maps in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Position of the smallest entry, or [`end`](Self::end) when empty.
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

    /// Key and value at `position`.
    #[must_use]
    pub fn key_value(&self, position: Position) -> Option<(&K, &V)> {
        self.tree.key_value(position)
    }

    /// Removes the entry at `position`.
    pub fn erase(&mut self, position: Position) -> Option<(K, V)> {
        self.tree.erase(position)
    }

    /// Returns an iterator over entries in key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        self.tree.iter()
    }

    /// Returns an iterator over keys in order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        self.tree.keys()
    }

    /// Returns an iterator over values in key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, C> {
        self.tree.values()
    }

    /// The underlying tree, for cursor-based traversal.
    #[must_use]
    pub const fn as_tree(&self) -> &AvlTree<K, V, C> {
        &self.tree
    }
}

impl<K, V, C: Comparator<K>> OrderedMap<K, V, C> {
    /// Inserts `key` with `value` unless the key is already present.
    ///
    /// Returns the position of the entry for `key` and whether it was
    /// created. An existing value is left untouched.
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        self.tree.insert(key, value, false)
    }

    /// Inserts `key` with `value`, overwriting the value of an existing entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.insert_or_assign("k", 1).1);
    /// assert!(!map.insert_or_assign("k", 2).1);
    /// assert_eq!(map.get(&"k"), Some(&2));
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (Position, bool) {
        let position = self.tree.find(&key);
        match self.tree.value_mut(position) {
            Some(slot) => {
                *slot = value;
                (position, false)
            }
            None => self.tree.insert(key, value, false),
        }
    }

    /// Inserts every entry of `entries` in turn, reporting each outcome.
    ///
    /// The positions are those reported at the time of each insertion. A
    /// later entry with a new smallest key moves the previous minimum out of
    /// the begin slot, so an earlier position for that minimum then refers to
    /// the new one. See [`Position`].
    pub fn insert_many<I>(&mut self, entries: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        entries
            .into_iter()
            .map(|(key, value)| self.insert(key, value))
            .collect()
    }

    /// Checked access to the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if `key` is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::{ContainerError, OrderedMap};
    ///
    /// let map: OrderedMap<i32, &str> = [(1, "one")].into_iter().collect();
    /// assert_eq!(map.at(&1), Ok(&"one"));
    /// assert_eq!(map.at(&2), Err(ContainerError::KeyNotFound));
    /// ```
    pub fn at(&self, key: &K) -> Result<&V, ContainerError> {
        self.get(key).ok_or(ContainerError::KeyNotFound)
    }

    /// Checked mutable access to the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if `key` is absent.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, ContainerError> {
        self.get_mut(key).ok_or(ContainerError::KeyNotFound)
    }

    /// The value for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.value(self.tree.find(key))
    }

    /// Mutable access to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let position = self.tree.find(key);
        self.tree.value_mut(position)
    }

    /// The value for `key`, inserting `make()` first if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::OrderedMap;
    ///
    /// let mut counts: OrderedMap<char, usize> = OrderedMap::new();
    /// for letter in "hello".chars() {
    ///     *counts.get_or_insert_with(letter, || 0) += 1;
    /// }
    /// assert_eq!(counts.get(&'l'), Some(&2));
    /// ```
    pub fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &mut V {
        let mut position = self.tree.find(&key);
        if self.tree.is_end(position) {
            position = self.tree.insert(key, make(), false).0;
        }
        match self.tree.value_mut(position) {
            Some(value) => value,
            None => unreachable!("entry was just found or inserted"),
        }
    }

    /// Position of the entry for `key`, or [`end`](Self::end).
    #[must_use]
    pub fn find(&self, key: &K) -> Position {
        self.tree.find(key)
    }

    /// Returns `true` if the map has an entry for `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Removes the entry for `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let position = self.tree.find(key);
        self.tree.erase(position).map(|(_, value)| value)
    }

    /// Moves every entry of `other` whose key is absent from `self`.
    ///
    /// Entries whose key collides stay in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::OrderedMap;
    ///
    /// let mut left: OrderedMap<i32, &str> = [(1, "a"), (2, "b")].into_iter().collect();
    /// let mut right: OrderedMap<i32, &str> = [(2, "x"), (3, "c")].into_iter().collect();
    /// left.merge(&mut right);
    ///
    /// assert_eq!(left.len(), 3);
    /// assert_eq!(left.get(&2), Some(&"b"));
    /// assert_eq!(right.len(), 1);
    /// assert_eq!(right.get(&2), Some(&"x"));
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        let mut cursor = other.tree.cursor_front_mut();
        while let Some(key) = cursor.key() {
            if self.tree.contains(key) {
                cursor.move_next();
            } else if let Some((key, value)) = cursor.remove_current() {
                self.tree.insert(key, value, false);
            }
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Default> Default for OrderedMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for OrderedMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C> Eq for OrderedMap<K, V, C> {}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for OrderedMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for OrderedMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<K, V, C> IntoIterator for OrderedMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
