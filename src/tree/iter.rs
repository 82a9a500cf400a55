//! Borrowing and owning iterators over an [`AvlTree`].
//!
//! Borrowing iterators walk the tree with the same successor and predecessor
//! steps that positions use, so they need no auxiliary stack. Both ends can be
//! consumed; a remaining-element count keeps them from crossing.

use std::iter::FusedIterator;

use super::AvlTree;
use super::node::NodeId;
use crate::compare::NaturalOrder;

impl<K, V, C> AvlTree<K, V, C> {
    /// Returns an iterator over entries in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::AvlTree;
    ///
    /// let tree: AvlTree<i32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
    /// let entries: Vec<(&i32, &&str)> = tree.iter().collect();
    /// assert_eq!(entries, vec![(&1, &"a"), (&2, &"b")]);
    ///
    /// let reversed: Vec<i32> = tree.iter().rev().map(|(key, _)| *key).collect();
    /// assert_eq!(reversed, vec![2, 1]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            tree: self,
            front: self.begin().node(),
            back: self.prev(self.end()).node(),
            remaining: self.length,
        }
    }

    /// Returns an iterator over keys in order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over values in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::AvlTree;
    ///
    /// let tree: AvlTree<i32, i32> = [(1, 10), (2, 20), (3, 30)].into_iter().collect();
    /// let sum: i32 = tree.values().sum();
    /// assert_eq!(sum, 60);
    /// ```
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, C> {
        Values { inner: self.iter() }
    }

    /// Consumes the tree, yielding its keys in order.
    #[must_use]
    pub fn into_keys(self) -> IntoKeys<K, V, C> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }
}

// =============================================================================
// Iter
// =============================================================================

/// An iterator over the entries of an [`AvlTree`] in key order.
pub struct Iter<'a, K, V, C = NaturalOrder> {
    tree: &'a AvlTree<K, V, C>,
    front: NodeId,
    back: NodeId,
    remaining: usize,
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.tree.arena.entry(self.front)?;
        self.front = self.tree.successor_of(self.front);
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.tree.arena.entry(self.back)?;
        self.back = self.tree.predecessor_of(self.back);
        self.remaining -= 1;
        Some(entry)
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, C> FusedIterator for Iter<'_, K, V, C> {}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// Keys / Values
// =============================================================================

/// An iterator over the keys of an [`AvlTree`] in order.
pub struct Keys<'a, K, V, C = NaturalOrder> {
    inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Keys<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V, C> ExactSizeIterator for Keys<'_, K, V, C> {}

impl<K, V, C> FusedIterator for Keys<'_, K, V, C> {}

/// An iterator over the values of an [`AvlTree`] in key order.
pub struct Values<'a, K, V, C = NaturalOrder> {
    inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C> Iterator for Values<'a, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Values<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V, C> ExactSizeIterator for Values<'_, K, V, C> {}

impl<K, V, C> FusedIterator for Values<'_, K, V, C> {}

// =============================================================================
// IntoIter / IntoKeys
// =============================================================================

/// An owning iterator that drains an [`AvlTree`] in key order.
pub struct IntoIter<K, V, C = NaturalOrder> {
    tree: AvlTree<K, V, C>,
}

impl<K, V, C> Iterator for IntoIter<K, V, C> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<K, V, C> DoubleEndedIterator for IntoIter<K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree.pop_last()
    }
}

impl<K, V, C> ExactSizeIterator for IntoIter<K, V, C> {}

impl<K, V, C> FusedIterator for IntoIter<K, V, C> {}

/// An owning iterator over the keys of an [`AvlTree`].
pub struct IntoKeys<K, V, C = NaturalOrder> {
    inner: IntoIter<K, V, C>,
}

impl<K, V, C> Iterator for IntoKeys<K, V, C> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for IntoKeys<K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V, C> ExactSizeIterator for IntoKeys<K, V, C> {}

impl<K, V, C> FusedIterator for IntoKeys<K, V, C> {}

// =============================================================================
// IntoIterator
// =============================================================================

impl<K, V, C> IntoIterator for AvlTree<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { tree: self }
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
