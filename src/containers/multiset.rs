//! Ordered multiset.
//!
//! Equivalent keys are stored side by side, later insertions after earlier
//! ones, so `lower_bound..upper_bound` spans exactly the copies of a key.

use std::fmt;

use crate::compare::{Comparator, NaturalOrder};
use crate::tree::{AvlTree, IntoKeys, Keys, Position};

/// An ordered collection that keeps every inserted key, duplicates included.
///
/// # Examples
///
/// ```rust
/// use ordtree::OrderedMultiset;
///
/// let mut bag = OrderedMultiset::new();
/// bag.insert("b");
/// bag.insert("a");
/// bag.insert("b");
///
/// assert_eq!(bag.len(), 3);
/// assert_eq!(bag.count(&"b"), 2);
/// assert_eq!(bag.remove_all(&"b"), 2);
/// assert_eq!(bag.iter().copied().collect::<Vec<_>>(), vec!["a"]);
/// ```
#[derive(Clone)]
pub struct OrderedMultiset<K, C = NaturalOrder> {
    tree: AvlTree<K, (), C>,
}

impl<K> OrderedMultiset<K, NaturalOrder> {
    /// Creates an empty multiset ordered by [`Ord`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: AvlTree::new(),
        }
    }
}

impl<K, C> OrderedMultiset<K, C> {
    /// Creates an empty multiset ordered by `comparator`, which must be a strict
    /// weak ordering (see [`Comparator`]).
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: AvlTree::with_comparator(comparator),
        }
    }

    /// Returns the number of keys, duplicates included.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the multiset holds no keys.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two multisets in constant time.
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

    /// Removes the single key at `position`.
    pub fn erase(&mut self, position: Position) -> Option<K> {
        self.tree.erase(position).map(|(key, ())| key)
    }

    /// Returns an iterator over keys in order, duplicates included.
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

impl<K, C: Comparator<K>> OrderedMultiset<K, C> {
    /// Inserts `key` after any equivalent keys already present.
    pub fn insert(&mut self, key: K) -> Position {
        self.tree.insert(key, (), true).0
    }

    /// Inserts every key of `keys` in turn.
    ///
    /// Each position is the one reported by its own insertion. A later key
    /// that orders before every key present retargets the earlier position
    /// of the previous minimum to itself. See [`Position`].
    pub fn insert_many<I>(&mut self, keys: I) -> Vec<Position>
    where
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().map(|key| self.insert(key)).collect()
    }

    /// Position of some key equivalent to `key`, or [`end`](Self::end).
    #[must_use]
    pub fn find(&self, key: &K) -> Position {
        self.tree.find(key)
    }

    /// Returns `true` if at least one key equivalent to `key` is present.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Number of keys equivalent to `key`.
    ///
    /// # Complexity
    ///
    /// O(log N + k) where k is the count returned.
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        let (mut position, upper) = self.equal_range(key);
        let mut count = 0;
        while position != upper {
            count += 1;
            position = self.tree.next(position);
        }
        count
    }

    /// Position of the first key that does not order before `key`.
    #[must_use]
    pub fn lower_bound(&self, key: &K) -> Position {
        self.tree.lower_bound(key)
    }

    /// Position of the first key that orders after `key`.
    #[must_use]
    pub fn upper_bound(&self, key: &K) -> Position {
        self.tree.upper_bound(key)
    }

    /// The half-open range of positions holding keys equivalent to `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::OrderedMultiset;
    ///
    /// let bag: OrderedMultiset<i32> = [1, 2, 2, 3].into_iter().collect();
    /// let (mut position, upper) = bag.equal_range(&2);
    /// let mut copies = 0;
    /// while position != upper {
    ///     assert_eq!(bag.get(position), Some(&2));
    ///     copies += 1;
    ///     position = bag.next(position);
    /// }
    /// assert_eq!(copies, 2);
    /// ```
    #[must_use]
    pub fn equal_range(&self, key: &K) -> (Position, Position) {
        (self.tree.lower_bound(key), self.tree.upper_bound(key))
    }

    /// Removes the first key equivalent to `key` and reports whether one was
    /// present.
    pub fn remove_one(&mut self, key: &K) -> bool {
        let position = self.tree.lower_bound(key);
        let matches = self
            .tree
            .key(position)
            .is_some_and(|found| self.tree.comparator().equivalent(found, key));
        matches && self.tree.erase(position).is_some()
    }

    /// Removes every key equivalent to `key` and returns how many were removed.
    pub fn remove_all(&mut self, key: &K) -> usize {
        let mut removed = 0;
        while self.remove_one(key) {
            removed += 1;
        }
        removed
    }

    /// Moves every key of `other` into `self`, leaving `other` empty.
    pub fn merge(&mut self, other: &mut Self) {
        while let Some((key, ())) = other.tree.pop_first() {
            self.tree.insert(key, (), true);
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, C: Default> Default for OrderedMultiset<K, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: fmt::Debug, C> fmt::Debug for OrderedMultiset<K, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, C> PartialEq for OrderedMultiset<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, C> Eq for OrderedMultiset<K, C> {}

impl<K, C: Comparator<K>> Extend<K> for OrderedMultiset<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K, C: Comparator<K> + Default> FromIterator<K> for OrderedMultiset<K, C> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut multiset = Self::default();
        multiset.extend(iter);
        multiset
    }
}

impl<K, C> IntoIterator for OrderedMultiset<K, C> {
    type Item = K;
    type IntoIter = IntoKeys<K, (), C>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_keys()
    }
}

impl<'a, K, C> IntoIterator for &'a OrderedMultiset<K, C> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, (), C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bag_of(keys: &[i32]) -> OrderedMultiset<i32> {
        keys.iter().copied().collect()
    }

    fn contents(bag: &OrderedMultiset<i32>) -> Vec<i32> {
        bag.iter().copied().collect()
    }

    #[rstest]
    fn test_keeps_duplicates_in_order() {
        let bag = bag_of(&[3, 1, 3, 2, 3]);
        assert_eq!(contents(&bag), vec![1, 2, 3, 3, 3]);
        assert_eq!(bag.len(), 5);
    }

    #[rstest]
    #[case(3, 3)]
    #[case(1, 1)]
    #[case(4, 0)]
    fn test_count(#[case] key: i32, #[case] expected: usize) {
        let bag = bag_of(&[3, 1, 3, 2, 3]);
        assert_eq!(bag.count(&key), expected);
    }

    #[rstest]
    fn test_equal_range_of_absent_key_is_empty() {
        let bag = bag_of(&[1, 5]);
        let (lower, upper) = bag.equal_range(&3);
        assert_eq!(lower, upper);
        assert_eq!(bag.get(lower), Some(&5));
    }

    #[rstest]
    fn test_bounds_bracket_duplicates() {
        let bag = bag_of(&[1, 2, 2, 2, 3]);
        assert_eq!(bag.get(bag.lower_bound(&2)), Some(&2));
        assert_eq!(bag.get(bag.prev(bag.lower_bound(&2))), Some(&1));
        assert_eq!(bag.get(bag.upper_bound(&2)), Some(&3));
    }

    #[rstest]
    fn test_insert_places_duplicate_last() {
        let mut bag = bag_of(&[2, 2]);
        let position = bag.insert(2);
        assert_eq!(bag.next(position), bag.upper_bound(&2));
        assert!(bag.as_tree().check_invariants().is_ok());
    }

    #[rstest]
    fn test_interleaved_duplicate_inserts_and_removals_stay_balanced() {
        let mut bag = OrderedMultiset::new();
        for round in 0..6 {
            for key in 0..8 {
                bag.insert((key * 5 + round) % 4);
            }
            assert!(bag.remove_one(&(round % 4)));
            assert!(bag.as_tree().check_invariants().is_ok());
        }

        assert_eq!(bag.len(), 42);
        assert_eq!((0..4).map(|key| bag.count(&key)).sum::<usize>(), 42);
        assert!(contents(&bag).windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[rstest]
    fn test_remove_one_and_remove_all() {
        let mut bag = bag_of(&[1, 2, 2, 2, 3]);

        assert!(bag.remove_one(&2));
        assert_eq!(bag.count(&2), 2);
        assert_eq!(bag.remove_all(&2), 2);
        assert!(!bag.remove_one(&2));
        assert_eq!(bag.remove_all(&9), 0);
        assert_eq!(contents(&bag), vec![1, 3]);
        assert!(bag.as_tree().check_invariants().is_ok());
    }

    #[rstest]
    fn test_merge_moves_everything() {
        let mut left = bag_of(&[1, 2]);
        let mut right = bag_of(&[2, 3, 3]);

        left.merge(&mut right);

        assert_eq!(contents(&left), vec![1, 2, 2, 3, 3]);
        assert!(right.is_empty());
        assert!(left.as_tree().check_invariants().is_ok());
        assert!(right.as_tree().check_invariants().is_ok());
    }

    #[rstest]
    fn test_insert_many_returns_every_position() {
        let mut bag = OrderedMultiset::new();
        let positions = bag.insert_many([4, 4, 4]);
        assert_eq!(positions.len(), 3);
        assert_eq!(bag.count(&4), 3);
        for position in positions {
            assert_eq!(bag.get(position), Some(&4));
        }
    }

    #[rstest]
    fn test_erase_single_copy_by_position() {
        let mut bag = bag_of(&[7, 7]);
        assert_eq!(bag.erase(bag.begin()), Some(7));
        assert_eq!(bag.count(&7), 1);
    }

    #[rstest]
    fn test_debug_formats_as_list() {
        assert_eq!(format!("{:?}", bag_of(&[2, 1, 2])), "[1, 2, 2]");
    }
}
