//! Ordered containers built on [`AvlTree`](crate::AvlTree).
//!
//! Each adapter owns one tree and fixes its duplicate policy:
//!
//! - [`OrderedMap`]: unique keys, each with a value
//! - [`OrderedSet`]: unique keys
//! - [`OrderedMultiset`]: equivalent keys kept side by side in insertion order
//!
//! Positions returned by an adapter follow the same rules as engine positions
//! and are only meaningful for the container that issued them.
//!
//! # Examples
//!
//! ```rust
//! use ordtree::containers::{OrderedMap, OrderedMultiset, OrderedSet};
//!
//! let mut map = OrderedMap::new();
//! map.insert("apple", 3);
//! assert_eq!(map.get(&"apple"), Some(&3));
//!
//! let set: OrderedSet<i32> = [3, 1, 3, 2].into_iter().collect();
//! assert_eq!(set.len(), 3);
//!
//! let bag: OrderedMultiset<i32> = [3, 1, 3, 2].into_iter().collect();
//! assert_eq!(bag.count(&3), 2);
//! ```

mod map;
mod multiset;
mod set;

pub use map::OrderedMap;
pub use multiset::OrderedMultiset;
pub use set::OrderedSet;
