//! Height-balanced insertion and removal.
//!
//! After any change, every node on the path from the change to the root is
//! passed through [`RawTree::avl_rebalance`], which recomputes the node and
//! rotates when its children's heights differ by more than one.

use log::trace;

use super::handle::Handle;
use super::node::Tag;
use super::tree::{Placement, RawTree};
use crate::augment::Augment;
use crate::order::Compare;

impl<K, V, C: Compare<K>, A: Augment<K, V>> RawTree<K, V, C, A> {
    pub(super) fn avl_insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.place(key, value, Tag::Height(1)) {
            Placement::Replaced(previous) => Some(previous),
            Placement::Attached(leaf) => {
                let parent = self.parent(leaf);
                self.avl_rebalance_upward(parent);
                None
            }
        }
    }
}

impl<K, V, C, A: Augment<K, V>> RawTree<K, V, C, A> {
    /// Unlinks `node`. A node with two children is replaced by its in-order
    /// predecessor, which is relinked into `node`'s position.
    pub(super) fn avl_remove(&mut self, node: Handle) -> (K, V) {
        let (left, right) = (self.left(node), self.right(node));

        let unbalanced = if left.is_sentinel() || right.is_sentinel() {
            let child = if left.is_sentinel() { right } else { left };
            let parent = self.parent(node);
            self.transplant(node, child);
            parent
        } else {
            let predecessor = self.nodes.max_from(left);
            let unbalanced = if predecessor == left {
                predecessor
            } else {
                let parent = self.parent(predecessor);
                self.transplant(predecessor, self.left(predecessor));
                self.set_left(predecessor, left);
                self.set_parent(left, predecessor);
                parent
            };
            self.transplant(node, predecessor);
            self.set_right(predecessor, right);
            self.set_parent(right, predecessor);
            unbalanced
        };

        let removed = self.nodes.take(node);
        self.avl_rebalance_upward(unbalanced);
        removed.into_item()
    }

    fn avl_rebalance_upward(&mut self, mut handle: Handle) {
        while !handle.is_sentinel() {
            // Rotation keeps the subtree hanging off the same parent.
            let parent = self.parent(handle);
            self.avl_rebalance(handle);
            handle = parent;
        }
    }

    /// `height(left) - height(right)`.
    fn balance_factor(&self, handle: Handle) -> i64 {
        i64::from(self.height(self.left(handle))) - i64::from(self.height(self.right(handle)))
    }

    fn avl_rebalance(&mut self, handle: Handle) {
        self.refresh(handle);

        let balance = self.balance_factor(handle);
        if balance > 1 {
            let left = self.left(handle);
            if self.balance_factor(left) < 0 {
                trace!("left-right case at {handle:?}");
                self.rotate_left(left);
            }
            self.rotate_right(handle);
        } else if balance < -1 {
            let right = self.right(handle);
            if self.balance_factor(right) > 0 {
                trace!("right-left case at {handle:?}");
                self.rotate_right(right);
            }
            self.rotate_left(handle);
        }
    }
}
