//! Arena storage for tree nodes and the two sentinel slots.
//!
//! Nodes never hold pointers to each other. Every link is a [`NodeId`], an
//! index into [`Arena`]. Two indices are reserved for the lifetime of the
//! arena:
//!
//! - [`NodeId::BEGIN`] is the *minimum holder*: while the tree is non-empty it
//!   is always the leftmost node and carries the smallest entry.
//! - [`NodeId::END`] is the past-the-end marker. It is never linked into the
//!   tree and never carries an entry.
//!
//! Released slots are recycled through a free list, so a [`NodeId`] stays
//! valid for exactly as long as the element it was issued for.

use std::fmt;
use std::num::NonZeroU32;
use std::ops::{Index, IndexMut};

use static_assertions::assert_eq_size;

// =============================================================================
// NodeId
// =============================================================================

/// Stable identity of a slot in the [`Arena`].
///
/// Stored as `index + 1` so that `Option<NodeId>` fits in four bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(NonZeroU32);

assert_eq_size!(Option<NodeId>, u32);

impl NodeId {
    /// The minimum-holder sentinel slot.
    pub(crate) const BEGIN: Self = Self(NonZeroU32::MIN);

    /// The past-the-end sentinel slot.
    pub(crate) const END: Self = Self(NonZeroU32::MIN.saturating_add(1));

    /// Number of slots reserved for sentinels at the front of the arena.
    const SENTINELS: usize = 2;

    fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index)
            .ok()
            .and_then(|index| index.checked_add(1))
            .and_then(NonZeroU32::new);
        match raw {
            Some(raw) => Self(raw),
            None => panic!("tree arena exhausted: slot index {index} exceeds u32 range"),
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    #[inline]
    pub(crate) fn is_sentinel(self) -> bool {
        self == Self::BEGIN || self == Self::END
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::BEGIN {
            formatter.write_str("#begin")
        } else if *self == Self::END {
            formatter.write_str("#end")
        } else {
            write!(formatter, "#{}", self.index())
        }
    }
}

// =============================================================================
// Node
// =============================================================================

/// A tree vertex.
///
/// `entry` is `None` only for the `END` sentinel, for `BEGIN` while the tree
/// is empty, and for vacant slots waiting on the free list.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) height: u32,
    pub(crate) entry: Option<(K, V)>,
}

impl<K, V> Node<K, V> {
    const fn vacant() -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            height: 0,
            entry: None,
        }
    }

    /// A fresh leaf holding `entry`, hanging below `parent`.
    pub(crate) const fn leaf(parent: Option<NodeId>, entry: (K, V)) -> Self {
        Self {
            parent,
            left: None,
            right: None,
            height: 1,
            entry: Some(entry),
        }
    }

    #[inline]
    pub(crate) const fn is_linked(&self) -> bool {
        self.entry.is_some()
    }
}

// =============================================================================
// Arena
// =============================================================================

/// Index-addressed slab of nodes with two permanent sentinel slots.
#[derive(Clone)]
pub(crate) struct Arena<K, V> {
    nodes: Vec<Node<K, V>>,
    vacant: Vec<NodeId>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an arena with room for `capacity` elements besides the sentinels.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(NodeId::SENTINELS));
        nodes.push(Node::vacant());
        nodes.push(Node::vacant());
        Self {
            nodes,
            vacant: Vec::new(),
        }
    }

    /// Stores `node` in a recycled slot if one is free, otherwise at the end.
    pub(crate) fn allocate(&mut self, node: Node<K, V>) -> NodeId {
        if let Some(id) = self.vacant.pop() {
            self.nodes[id.index()] = node;
            id
        } else {
            let id = NodeId::from_index(self.nodes.len());
            self.nodes.push(node);
            id
        }
    }

    /// Unlinks a non-sentinel slot and hands back its entry.
    ///
    /// The caller is responsible for having already detached the node from
    /// its parent and children.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<(K, V)> {
        debug_assert!(!id.is_sentinel(), "sentinel {id:?} cannot be released");
        let node = std::mem::replace(&mut self.nodes[id.index()], Node::vacant());
        if node.is_linked() {
            self.vacant.push(id);
        }
        node.entry
    }

    /// Drops every element and leaves both sentinel slots fresh.
    pub(crate) fn reset(&mut self) {
        self.nodes.truncate(NodeId::SENTINELS);
        self.nodes[NodeId::BEGIN.index()] = Node::vacant();
        self.nodes[NodeId::END.index()] = Node::vacant();
        self.vacant.clear();
    }

    /// Looks up a slot that may come from a stale or foreign handle.
    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.nodes.get(id.index())
    }

    /// Returns `true` if `id` refers to a slot that currently holds an element.
    #[inline]
    pub(crate) fn is_linked(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_linked)
    }

    /// Key of a node reached through tree links. Linked nodes always carry one.
    pub(crate) fn key(&self, id: NodeId) -> &K {
        match &self[id].entry {
            Some((key, _)) => key,
            None => unreachable!("linked node {id:?} carries no entry"),
        }
    }

    #[inline]
    pub(crate) fn entry(&self, id: NodeId) -> Option<(&K, &V)> {
        self.get(id)
            .and_then(|node| node.entry.as_ref())
            .map(|(key, value)| (key, value))
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, id: NodeId) -> Option<&mut V> {
        self.nodes
            .get_mut(id.index())
            .and_then(|node| node.entry.as_mut())
            .map(|(_, value)| value)
    }

    /// Cached height of an optional subtree; an empty subtree has height 0.
    #[inline]
    pub(crate) fn height(&self, id: Option<NodeId>) -> u32 {
        id.map_or(0, |id| self[id].height)
    }

    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self[id].left {
            id = left;
        }
        id
    }

    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self[id].right {
            id = right;
        }
        id
    }

    /// Number of slots in use, sentinels and vacant slots included.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub(crate) fn vacant_count(&self) -> usize {
        self.vacant.len()
    }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
    type Output = Node<K, V>;

    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.index()]
    }
}

// =============================================================================
// Tests
// =============================================================================
