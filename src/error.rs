//! Error types for the tree engine and its containers.
//!
//! The engine itself reports "not found" through the end position and never
//! fails otherwise. Errors only appear at two edges:
//!
//! - [`ContainerError`]: keyed access on an adapter (such as
//!   [`OrderedMap::at`](crate::containers::OrderedMap::at)) for a key that is
//!   absent.
//! - [`InvariantViolation`]: returned by
//!   [`AvlTree::check_invariants`](crate::AvlTree::check_invariants) when the
//!   structure is found to be inconsistent.

use crate::tree::Position;

/// Represents errors raised by the ordered containers.
///
/// # Examples
///
/// ```rust
/// use ordtree::ContainerError;
///
/// let error = ContainerError::KeyNotFound;
/// assert_eq!(format!("{error}"), "key not found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// The requested key is not present in the container.
    KeyNotFound,
}

impl std::fmt::Display for ContainerError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyNotFound => formatter.write_str("key not found"),
        }
    }
}

impl std::error::Error for ContainerError {}

/// A structural invariant of the tree that does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// An in-order neighbour pair is out of order under the comparator.
    Unordered {
        /// The earlier node in traversal order.
        previous: Position,
        /// The node that compares less than `previous`.
        current: Position,
    },
    /// Child subtree heights differ by more than one.
    Unbalanced {
        /// The node whose children are out of balance.
        node: Position,
        /// Height of the left subtree.
        left: u32,
        /// Height of the right subtree.
        right: u32,
    },
    /// The cached height does not match the children.
    StaleHeight {
        /// The node with the stale height.
        node: Position,
        /// Height stored in the node.
        cached: u32,
        /// Height derived from the children.
        computed: u32,
    },
    /// A child does not point back to its parent.
    BrokenParentLink {
        /// The child whose parent link is wrong.
        node: Position,
    },
    /// The leftmost node is not the minimum-holder slot.
    MinimumNotAtBegin {
        /// The node actually found at the leftmost position.
        leftmost: Position,
    },
    /// The end sentinel carries links or an entry.
    EndLinked,
    /// The cached element count disagrees with the nodes reachable in order.
    LengthMismatch {
        /// The cached count.
        expected: usize,
        /// The number of nodes visited.
        found: usize,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unordered { previous, current } => write!(
                formatter,
                "in-order sequence broken: {current:?} orders before {previous:?}"
            ),
            Self::Unbalanced { node, left, right } => write!(
                formatter,
                "node {node:?} is unbalanced: left height {left}, right height {right}"
            ),
            Self::StaleHeight {
                node,
                cached,
                computed,
            } => write!(
                formatter,
                "node {node:?} caches height {cached} but its children give {computed}"
            ),
            Self::BrokenParentLink { node } => {
                write!(formatter, "node {node:?} does not link back to its parent")
            }
            Self::MinimumNotAtBegin { leftmost } => write!(
                formatter,
                "leftmost node {leftmost:?} is not the minimum-holder slot"
            ),
            Self::EndLinked => formatter.write_str("end sentinel is linked into the tree"),
            Self::LengthMismatch { expected, found } => write!(
                formatter,
                "length mismatch: cached {expected}, reachable {found}"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}
