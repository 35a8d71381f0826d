//! Color-balanced insertion and removal.
//!
//! Both fixups are written against the sentinel: it is black, so a missing
//! uncle or nephew needs no special case, and deletion may park the removed
//! node's parent in the sentinel's parent link.

use log::trace;

use super::handle::Handle;
use super::node::{Color, Tag};
use super::tree::{Placement, RawTree};
use crate::augment::Augment;
use crate::order::Compare;

impl<K, V, C: Compare<K>, A: Augment<K, V>> RawTree<K, V, C, A> {
    pub(super) fn rb_insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.place(key, value, Tag::Color(Color::Red)) {
            Placement::Replaced(previous) => Some(previous),
            Placement::Attached(leaf) => {
                self.refresh_upward(self.parent(leaf));
                self.rb_insert_fixup(leaf);
                None
            }
        }
    }
}

impl<K, V, C, A: Augment<K, V>> RawTree<K, V, C, A> {
    fn is_red(&self, handle: Handle) -> bool {
        self.color(handle) == Color::Red
    }

    fn is_black(&self, handle: Handle) -> bool {
        self.color(handle) == Color::Black
    }

    fn rb_insert_fixup(&mut self, mut node: Handle) {
        while self.is_red(self.parent(node)) {
            let parent = self.parent(node);
            let grandparent = self.parent(parent);

            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.is_red(uncle) {
                    trace!("insert case 1 at {node:?}");
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.right(parent) {
                        trace!("insert case 2 at {node:?}");
                        node = parent;
                        self.rotate_left(node);
                    }
                    trace!("insert case 3 at {node:?}");
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.is_red(uncle) {
                    trace!("insert case 1 (mirrored) at {node:?}");
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.left(parent) {
                        trace!("insert case 2 (mirrored) at {node:?}");
                        node = parent;
                        self.rotate_right(node);
                    }
                    trace!("insert case 3 (mirrored) at {node:?}");
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Unlinks `node`. A node with two children is replaced by its in-order
    /// successor, which is relinked into `node`'s position and takes its color.
    pub(super) fn rb_remove(&mut self, node: Handle) -> (K, V) {
        let (left, right) = (self.left(node), self.right(node));
        let mut removed_color = self.color(node);

        let replacement = if left.is_sentinel() {
            self.transplant(node, right);
            right
        } else if right.is_sentinel() {
            self.transplant(node, left);
            left
        } else {
            let successor = self.nodes.min_from(right);
            removed_color = self.color(successor);
            let replacement = self.right(successor);

            if self.parent(successor) == node {
                self.set_parent(replacement, successor);
            } else {
                self.transplant(successor, replacement);
                self.set_right(successor, right);
                self.set_parent(right, successor);
            }
            self.transplant(node, successor);
            self.set_left(successor, left);
            self.set_parent(left, successor);
            self.set_color(successor, self.color(node));
            replacement
        };

        // The replacement's parent link is valid even for the sentinel.
        self.refresh_upward(self.parent(replacement));
        if removed_color == Color::Black {
            self.rb_remove_fixup(replacement);
        }
        self.nodes.take(node).into_item()
    }

    fn rb_remove_fixup(&mut self, mut node: Handle) {
        while node != self.root && self.is_black(node) {
            let parent = self.parent(node);

            if node == self.left(parent) {
                let mut sibling = self.right(parent);
                if self.is_red(sibling) {
                    trace!("remove case 1 at {parent:?}");
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.right(parent);
                }
                if self.is_black(self.left(sibling)) && self.is_black(self.right(sibling)) {
                    trace!("remove case 2 at {parent:?}");
                    self.set_color(sibling, Color::Red);
                    node = parent;
                } else {
                    if self.is_black(self.right(sibling)) {
                        trace!("remove case 3 at {parent:?}");
                        self.set_color(self.left(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.right(parent);
                    }
                    trace!("remove case 4 at {parent:?}");
                    self.set_color(sibling, self.color(parent));
                    self.set_color(parent, Color::Black);
                    self.set_color(self.right(sibling), Color::Black);
                    self.rotate_left(parent);
                    node = self.root;
                }
            } else {
                let mut sibling = self.left(parent);
                if self.is_red(sibling) {
                    trace!("remove case 1 (mirrored) at {parent:?}");
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.left(parent);
                }
                if self.is_black(self.left(sibling)) && self.is_black(self.right(sibling)) {
                    trace!("remove case 2 (mirrored) at {parent:?}");
                    self.set_color(sibling, Color::Red);
                    node = parent;
                } else {
                    if self.is_black(self.left(sibling)) {
                        trace!("remove case 3 (mirrored) at {parent:?}");
                        self.set_color(self.right(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.left(parent);
                    }
                    trace!("remove case 4 (mirrored) at {parent:?}");
                    self.set_color(sibling, self.color(parent));
                    self.set_color(parent, Color::Black);
                    self.set_color(self.left(sibling), Color::Black);
                    self.rotate_right(parent);
                    node = self.root;
                }
            }
        }
        self.set_color(node, Color::Black);
    }
}
