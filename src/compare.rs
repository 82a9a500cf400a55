//! Key ordering injected into trees and containers.
//!
//! Every ordering decision in the engine goes through a [`Comparator`]. The
//! comparator must define a strict weak ordering over keys; two keys are
//! *equivalent* when neither compares less than the other.
//!
//! # Examples
//!
//! ```rust
//! use ordtree::{AvlTree, Comparator, NaturalOrder, ReverseOrder};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//! assert_eq!(ReverseOrder.compare(&1, &2), Ordering::Greater);
//!
//! // Closures are comparators too
//! let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
//! let mut tree = AvlTree::with_comparator(by_length);
//! tree.insert("ccc", 3, false);
//! tree.insert("a", 1, false);
//! let keys: Vec<&&str> = tree.keys().collect();
//! assert_eq!(keys, vec![&"a", &"ccc"]);
//! ```

use std::cmp::Ordering;

/// A strict weak ordering over `K`.
///
/// Implementations must be irreflexive, asymmetric and transitive, and
/// equivalence (neither key less than the other) must be transitive too.
/// Trees built with a comparator that breaks these rules stay memory-safe,
/// but their traversal order, lookups and balance are unspecified.
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, left: &K, right: &K) -> Ordering;

    /// Returns `true` if `left` orders strictly before `right`.
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        self.compare(left, right) == Ordering::Less
    }

    /// Returns `true` if neither key orders before the other.
    #[inline]
    fn equivalent(&self, left: &K, right: &K) -> bool {
        self.compare(left, right) == Ordering::Equal
    }
}

/// Orders keys by their [`Ord`] implementation. The default comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }
}

/// Orders keys by the reverse of their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder;

impl<K: Ord + ?Sized> Comparator<K> for ReverseOrder {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        right.cmp(left)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        self(left, right)
    }
}
