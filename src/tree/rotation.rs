//! Rotation primitives and the rebalance step shared by insertion and erasure.
//!
//! Rotations only relink structure and refresh cached heights. Entries never
//! move between slots here, so the minimum-holder slot stays where it is in
//! the in-order sequence even when it is the pivot of a rotation.

use super::AvlTree;
use super::node::NodeId;

impl<K, V, C> AvlTree<K, V, C> {
    /// Heights of the left and right subtrees of `node`.
    #[inline]
    fn child_heights(&self, node: NodeId) -> (u32, u32) {
        let slot = &self.arena[node];
        (self.arena.height(slot.left), self.arena.height(slot.right))
    }

    /// Recomputes the cached height of `node` from its children.
    #[inline]
    pub(super) fn update_height(&mut self, node: NodeId) {
        let (left, right) = self.child_heights(node);
        self.arena[node].height = left.max(right) + 1;
    }

    /// Rotates `node` down to the left; its right child takes its place.
    ///
    /// Returns the new subtree root.
    pub(super) fn rotate_left(&mut self, node: NodeId) -> NodeId {
        let Some(pivot) = self.arena[node].right else {
            return node;
        };
        let parent = self.arena[node].parent;
        let inner = self.arena[pivot].left;

        self.arena[node].right = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(node);
        }
        self.replace_child(parent, node, Some(pivot));
        self.arena[pivot].parent = parent;
        self.arena[pivot].left = Some(node);
        self.arena[node].parent = Some(pivot);

        self.update_height(node);
        self.update_height(pivot);
        engine_trace!(node = ?node, pivot = ?pivot, "rotate left");
        pivot
    }

    /// Rotates `node` down to the right; its left child takes its place.
    ///
    /// Returns the new subtree root.
    pub(super) fn rotate_right(&mut self, node: NodeId) -> NodeId {
        let Some(pivot) = self.arena[node].left else {
            return node;
        };
        let parent = self.arena[node].parent;
        let inner = self.arena[pivot].right;

        self.arena[node].left = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(node);
        }
        self.replace_child(parent, node, Some(pivot));
        self.arena[pivot].parent = parent;
        self.arena[pivot].right = Some(node);
        self.arena[node].parent = Some(pivot);

        self.update_height(node);
        self.update_height(pivot);
        engine_trace!(node = ?node, pivot = ?pivot, "rotate right");
        pivot
    }

    /// Refreshes the height of `node` and restores the AVL balance there.
    ///
    /// A right-heavy node whose right child is not left-heavy gets a single
    /// left rotation; otherwise the right child is first rotated right. The
    /// left-heavy case mirrors this. Equal grandchild heights always take the
    /// single rotation.
    ///
    /// Returns the root of the (possibly rotated) subtree.
    pub(super) fn rebalance(&mut self, node: NodeId) -> NodeId {
        self.update_height(node);
        let (left, right) = self.child_heights(node);

        if right > left + 1 {
            let Some(heavy) = self.arena[node].right else {
                return node;
            };
            let (inner, outer) = self.child_heights(heavy);
            if outer < inner {
                self.rotate_right(heavy);
            }
            self.rotate_left(node)
        } else if left > right + 1 {
            let Some(heavy) = self.arena[node].left else {
                return node;
            };
            let (outer, inner) = self.child_heights(heavy);
            if outer < inner {
                self.rotate_left(heavy);
            }
            self.rotate_right(node)
        } else {
            node
        }
    }
}
