//! # ordtree
//!
//! A mutable AVL tree engine with sentinel-stable positions, and the ordered
//! containers built on top of it.
//!
//! ## Overview
//!
//! - **Engine**: [`AvlTree`], a height-balanced binary search tree with
//!   explicit positions, bidirectional traversal and a per-insertion
//!   duplicate policy.
//! - **Ordering**: every comparison goes through a [`Comparator`];
//!   [`NaturalOrder`] and [`ReverseOrder`] are provided and any
//!   `Fn(&K, &K) -> Ordering` closure works too.
//! - **Containers**: [`OrderedMap`], [`OrderedSet`] and [`OrderedMultiset`]
//!   wrap the engine with map, set and multiset semantics.
//!
//! ## Feature Flags
//!
//! - `containers`: The ordered container adapters (enabled by default)
//! - `tracing`: Emit `trace`/`debug` events from the engine through `tracing`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use ordtree::prelude::*;
//!
//! let mut tree = AvlTree::new();
//! for key in [3, 1, 2] {
//!     tree.insert(key, key.to_string(), false);
//! }
//!
//! let mut position = tree.begin();
//! let mut keys = Vec::new();
//! while position != tree.end() {
//!     keys.extend(tree.key(position).copied());
//!     position = tree.next(position);
//! }
//! assert_eq!(keys, vec![1, 2, 3]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Emits a `tracing` trace event when the `tracing` feature is enabled.
macro_rules! engine_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
    };
}

/// Emits a `tracing` debug event when the `tracing` feature is enabled.
macro_rules! engine_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
    };
}

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use ordtree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compare::*;
    pub use crate::error::*;
    pub use crate::tree::*;

    #[cfg(feature = "containers")]
    pub use crate::containers::*;
}

pub mod compare;
pub mod error;
pub mod tree;

#[cfg(feature = "containers")]
pub mod containers;

pub use compare::{Comparator, NaturalOrder, ReverseOrder};
pub use error::{ContainerError, InvariantViolation};
pub use tree::{AvlTree, Cursor, CursorMut, IntoIter, IntoKeys, Iter, Keys, Position, Values};

#[cfg(feature = "containers")]
pub use containers::{OrderedMap, OrderedMultiset, OrderedSet};
