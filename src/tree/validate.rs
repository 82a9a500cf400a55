//! Structural self-check used by tests and debugging sessions.

use super::node::NodeId;
use super::{AvlTree, Position};
use crate::compare::Comparator;
use crate::error::InvariantViolation;

/// State threaded through the in-order walk.
struct Walk {
    previous: Option<NodeId>,
    visited: usize,
}

impl<K, V, C: Comparator<K>> AvlTree<K, V, C> {
    /// Verifies every structural invariant of the tree.
    ///
    /// Checks that the end sentinel is detached, that parent and child links
    /// agree, that cached heights are exact and balanced, that the in-order
    /// sequence never decreases under the comparator, that the smallest
    /// element lives in the minimum-holder slot, and that the cached length
    /// matches the number of reachable elements.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] encountered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::AvlTree;
    ///
    /// let tree: AvlTree<i32, ()> = (0..100).map(|key| (key, ())).collect();
    /// assert!(tree.check_invariants().is_ok());
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let end = &self.arena[NodeId::END];
        if end.is_linked() || end.parent.is_some() || end.left.is_some() || end.right.is_some() {
            return Err(InvariantViolation::EndLinked);
        }

        let Some(root) = self.root else {
            return if self.length == 0 {
                Ok(())
            } else {
                Err(InvariantViolation::LengthMismatch {
                    expected: self.length,
                    found: 0,
                })
            };
        };
        if self.arena[root].parent.is_some() {
            return Err(InvariantViolation::BrokenParentLink {
                node: Position::new(root),
            });
        }

        let mut walk = Walk {
            previous: None,
            visited: 0,
        };
        self.check_subtree(root, &mut walk)?;

        let leftmost = self.arena.leftmost(root);
        if leftmost != NodeId::BEGIN {
            return Err(InvariantViolation::MinimumNotAtBegin {
                leftmost: Position::new(leftmost),
            });
        }
        if walk.visited != self.length {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.length,
                found: walk.visited,
            });
        }
        Ok(())
    }

    /// Checks the subtree under `node` and returns its height.
    fn check_subtree(&self, node: NodeId, walk: &mut Walk) -> Result<u32, InvariantViolation> {
        if node == NodeId::END {
            return Err(InvariantViolation::EndLinked);
        }
        let slot = &self.arena[node];
        if !slot.is_linked() || (slot.left.is_some() && slot.left == slot.right) {
            return Err(InvariantViolation::BrokenParentLink {
                node: Position::new(node),
            });
        }

        let left = self.check_child(node, slot.left, walk)?;

        if let Some(previous) = walk.previous
            && self
                .comparator
                .less(self.arena.key(node), self.arena.key(previous))
        {
            return Err(InvariantViolation::Unordered {
                previous: Position::new(previous),
                current: Position::new(node),
            });
        }
        walk.previous = Some(node);
        walk.visited += 1;

        let right = self.check_child(node, slot.right, walk)?;

        let computed = left.max(right) + 1;
        if slot.height != computed {
            return Err(InvariantViolation::StaleHeight {
                node: Position::new(node),
                cached: slot.height,
                computed,
            });
        }
        if left.abs_diff(right) > 1 {
            return Err(InvariantViolation::Unbalanced {
                node: Position::new(node),
                left,
                right,
            });
        }
        Ok(computed)
    }

    fn check_child(
        &self,
        parent: NodeId,
        child: Option<NodeId>,
        walk: &mut Walk,
    ) -> Result<u32, InvariantViolation> {
        let Some(child) = child else {
            return Ok(0);
        };
        if self.arena.get(child).and_then(|slot| slot.parent) != Some(parent) {
            return Err(InvariantViolation::BrokenParentLink {
                node: Position::new(child),
            });
        }
        self.check_subtree(child, walk)
    }
}
