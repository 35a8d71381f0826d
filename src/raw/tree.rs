use alloc::vec::Vec;
use core::cmp::Ordering;

use log::{debug, trace};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Tag};
use crate::augment::{Augment, SubtreeSize};
use crate::order::Compare;
use crate::strategy::Strategy;

/// A binary search tree over an arena of [`Node`]s, balanced by one
/// [`Strategy`] and augmented by `A`.
///
/// Augmented values live in `augments`, indexed by handle, so that walking the
/// tree never needs to know `A`. Slot 0 (the sentinel) always holds
/// `A::empty()`.
pub(crate) struct RawTree<K, V, C, A: Augment<K, V>> {
    pub(super) nodes: Arena<Node<K, V>>,
    pub(super) augments: Vec<A::Value>,
    pub(super) root: Handle,
    strategy: Strategy,
    cmp: C,
    aug: A,
}

/// Outcome of the shared insertion descent.
pub(super) enum Placement<K, V> {
    /// An equal key was resident; its item was swapped for the new one.
    Replaced((K, V)),
    /// A new leaf was linked under its parent.
    Attached(Handle),
}

impl<K, V, C, A: Augment<K, V>> RawTree<K, V, C, A> {
    pub(crate) fn new(strategy: Strategy, cmp: C, aug: A) -> Self {
        Self::with_capacity(strategy, cmp, aug, 0)
    }

    pub(crate) fn with_capacity(strategy: Strategy, cmp: C, aug: A, capacity: usize) -> Self {
        let mut augments = Vec::with_capacity(capacity.saturating_add(1));
        augments.push(aug.empty());
        debug!("new {strategy} tree, capacity {capacity}");

        Self {
            nodes: Arena::with_capacity(Node::sentinel(Self::sentinel_tag(strategy)), capacity),
            augments,
            root: Handle::SENTINEL,
            strategy,
            cmp,
            aug,
        }
    }

    const fn sentinel_tag(strategy: Strategy) -> Tag {
        match strategy {
            Strategy::Avl => Tag::Height(0),
            Strategy::RedBlack => Tag::Color(Color::Black),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_sentinel()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.cmp
    }

    pub(crate) fn augmentation(&self) -> &A {
        &self.aug
    }

    #[inline]
    pub(crate) fn root(&self) -> Handle {
        self.root
    }

    #[inline]
    pub(crate) fn nodes(&self) -> &Arena<Node<K, V>> {
        &self.nodes
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.nodes.get(handle).key()
    }

    #[inline]
    pub(crate) fn item(&self, handle: Handle) -> (&K, &V) {
        self.nodes.get(handle).item()
    }

    /// Mutable access to a stored value. The key stays immutable.
    #[inline]
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        &mut self.nodes.get_mut(handle).item_mut().1
    }

    /// The augmented value of the subtree rooted at `handle`.
    #[inline]
    pub(crate) fn augment(&self, handle: Handle) -> &A::Value {
        &self.augments[handle.to_index()]
    }

    pub(crate) fn first(&self) -> Handle {
        self.nodes.min_from(self.root)
    }

    pub(crate) fn last(&self) -> Handle {
        self.nodes.max_from(self.root)
    }

    #[inline]
    pub(super) fn left(&self, handle: Handle) -> Handle {
        self.nodes.get(handle).left
    }

    #[inline]
    pub(super) fn right(&self, handle: Handle) -> Handle {
        self.nodes.get(handle).right
    }

    #[inline]
    pub(super) fn parent(&self, handle: Handle) -> Handle {
        self.nodes.get(handle).parent
    }

    #[inline]
    pub(super) fn set_left(&mut self, handle: Handle, left: Handle) {
        self.nodes.get_mut(handle).left = left;
    }

    #[inline]
    pub(super) fn set_right(&mut self, handle: Handle, right: Handle) {
        self.nodes.get_mut(handle).right = right;
    }

    /// Also accepts the sentinel, whose parent link is scratch space for
    /// red-black deletion.
    #[inline]
    pub(super) fn set_parent(&mut self, handle: Handle, parent: Handle) {
        self.nodes.get_mut(handle).parent = parent;
    }

    #[inline]
    pub(super) fn height(&self, handle: Handle) -> u32 {
        self.nodes.get(handle).tag.height()
    }

    #[inline]
    pub(super) fn color(&self, handle: Handle) -> Color {
        self.nodes.get(handle).tag.color()
    }

    #[inline]
    pub(super) fn set_color(&mut self, handle: Handle, color: Color) {
        self.nodes.get_mut(handle).tag = Tag::Color(color);
    }

    /// Points `parent`'s link to `old` at `new` instead; a sentinel `parent`
    /// means `old` was the root.
    pub(super) fn replace_child(&mut self, parent: Handle, old: Handle, new: Handle) {
        if parent.is_sentinel() {
            self.root = new;
        } else if self.left(parent) == old {
            self.set_left(parent, new);
        } else {
            self.set_right(parent, new);
        }
    }

    /// Puts the subtree `new` where the subtree `old` hangs.
    pub(super) fn transplant(&mut self, old: Handle, new: Handle) {
        let parent = self.parent(old);
        self.replace_child(parent, old, new);
        self.set_parent(new, parent);
    }

    /// Recomputes the height tag (height-balanced trees only) and the
    /// augmented value of `handle` from its children.
    pub(super) fn refresh(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let (left, right) = (node.left, node.right);
        if let Tag::Height(_) = node.tag {
            let height = 1 + self.height(left).max(self.height(right));
            self.nodes.get_mut(handle).tag = Tag::Height(height);
        }

        let (key, value) = self.nodes.get(handle).item();
        let combined = self.aug.combine(key, value, &self.augments[left.to_index()], &self.augments[right.to_index()]);
        self.augments[handle.to_index()] = combined;
    }

    /// Refreshes every node from `handle` up to the root.
    pub(super) fn refresh_upward(&mut self, mut handle: Handle) {
        while !handle.is_sentinel() {
            self.refresh(handle);
            handle = self.parent(handle);
        }
    }

    /// ```text
    ///     x              y
    ///    / \            / \
    ///   a   y    =>    x   c
    ///      / \        / \
    ///     b   c      a   b
    /// ```
    pub(super) fn rotate_left(&mut self, x: Handle) {
        let y = self.right(x);
        debug_assert!(!y.is_sentinel(), "`RawTree::rotate_left()` - no right child!");
        trace!("rotate left at {x:?}");

        let b = self.left(y);
        self.set_right(x, b);
        if !b.is_sentinel() {
            self.set_parent(b, x);
        }
        self.transplant(x, y);
        self.set_left(y, x);
        self.set_parent(x, y);

        self.refresh(x);
        self.refresh(y);
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left).
    pub(super) fn rotate_right(&mut self, y: Handle) {
        let x = self.left(y);
        debug_assert!(!x.is_sentinel(), "`RawTree::rotate_right()` - no left child!");
        trace!("rotate right at {y:?}");

        let b = self.right(x);
        self.set_left(y, b);
        if !b.is_sentinel() {
            self.set_parent(b, y);
        }
        self.transplant(y, x);
        self.set_right(x, y);
        self.set_parent(y, x);

        self.refresh(y);
        self.refresh(x);
    }

    /// Removes the node at `handle` and returns its item.
    ///
    /// Every other node keeps its handle.
    pub(crate) fn remove(&mut self, handle: Handle) -> (K, V) {
        match self.strategy {
            Strategy::Avl => self.avl_remove(handle),
            Strategy::RedBlack => self.rb_remove(handle),
        }
    }

    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.first();
        (!first.is_sentinel()).then(|| self.remove(first))
    }

    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.last();
        (!last.is_sentinel()).then(|| self.remove(last))
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        *self.nodes.get_mut(Handle::SENTINEL) = Node::sentinel(Self::sentinel_tag(self.strategy));
        self.augments.truncate(1);
        self.root = Handle::SENTINEL;
        debug!("cleared {} tree", self.strategy);
    }

    /// Stores the augmented value of a freshly allocated leaf.
    fn store_augment(&mut self, handle: Handle) {
        let (key, value) = self.nodes.get(handle).item();
        let empty = &self.augments[Handle::SENTINEL.to_index()];
        let combined = self.aug.combine(key, value, empty, empty);

        let index = handle.to_index();
        if index == self.augments.len() {
            self.augments.push(combined);
        } else {
            self.augments[index] = combined;
        }
    }
}

impl<K, V, C: Compare<K>, A: Augment<K, V>> RawTree<K, V, C, A> {
    /// Inserts `(key, value)`, or replaces the resident item with an equal key
    /// and returns it.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.strategy {
            Strategy::Avl => self.avl_insert(key, value),
            Strategy::RedBlack => self.rb_insert(key, value),
        }
    }

    /// Descends from the root to where `key` belongs. A new leaf gets `tag`;
    /// the caller then restores balance upward from it.
    pub(super) fn place(&mut self, key: K, value: V, tag: Tag) -> Placement<K, V> {
        let mut parent = Handle::SENTINEL;
        let mut current = self.root;
        let mut ordering = Ordering::Equal;

        while !current.is_sentinel() {
            parent = current;
            ordering = self.cmp.compare(&key, self.key(current));
            current = match ordering {
                Ordering::Less => self.left(current),
                Ordering::Greater => self.right(current),
                Ordering::Equal => {
                    let previous = core::mem::replace(self.nodes.get_mut(current).item_mut(), (key, value));
                    self.refresh_upward(current);
                    return Placement::Replaced(previous);
                }
            };
        }

        let handle = self.nodes.alloc(Node::leaf(key, value, parent, tag));
        self.store_augment(handle);
        match ordering {
            _ if parent.is_sentinel() => self.root = handle,
            Ordering::Less => self.set_left(parent, handle),
            _ => self.set_right(parent, handle),
        }
        Placement::Attached(handle)
    }

    pub(crate) fn remove_key(&mut self, key: &K) -> Option<(K, V)> {
        let handle = self.find(key);
        (!handle.is_sentinel()).then(|| self.remove(handle))
    }

    /// The node holding a key equal to `key`, or the sentinel.
    pub(crate) fn find(&self, key: &K) -> Handle {
        let mut current = self.root;
        while !current.is_sentinel() {
            current = match self.cmp.compare(key, self.key(current)) {
                Ordering::Less => self.left(current),
                Ordering::Greater => self.right(current),
                Ordering::Equal => return current,
            };
        }
        current
    }

    /// The smallest node whose key compares greater than `key`.
    pub(crate) fn find_greater(&self, key: &K) -> Handle {
        self.bound(key, |ordering| ordering == Ordering::Less, Side::Upper)
    }

    /// The smallest node whose key does not compare less than `key`.
    pub(crate) fn find_greater_or_equal(&self, key: &K) -> Handle {
        self.bound(key, |ordering| ordering != Ordering::Greater, Side::Upper)
    }

    /// The largest node whose key compares less than `key`.
    pub(crate) fn find_lower(&self, key: &K) -> Handle {
        self.bound(key, |ordering| ordering == Ordering::Greater, Side::Lower)
    }

    /// The largest node whose key does not compare greater than `key`.
    pub(crate) fn find_lower_or_equal(&self, key: &K) -> Handle {
        self.bound(key, |ordering| ordering != Ordering::Less, Side::Lower)
    }

    /// Closest node on `side` of `key` that `accepts` (given
    /// `compare(key, node)`). Each accepted node is a candidate and the
    /// descent continues towards `key` for a closer one.
    fn bound(&self, key: &K, accepts: impl Fn(Ordering) -> bool, side: Side) -> Handle {
        let mut best = Handle::SENTINEL;
        let mut current = self.root;
        while !current.is_sentinel() {
            let accepted = accepts(self.cmp.compare(key, self.key(current)));
            if accepted {
                best = current;
            }
            current = match (side, accepted) {
                (Side::Upper, true) | (Side::Lower, false) => self.left(current),
                (Side::Upper, false) | (Side::Lower, true) => self.right(current),
            };
        }
        best
    }
}

#[derive(Clone, Copy)]
enum Side {
    Upper,
    Lower,
}

impl<K, V, C: Compare<K>> RawTree<K, V, C, SubtreeSize> {
    /// Zero-based position of `key` in sorted order, if present.
    pub(crate) fn rank(&self, key: &K) -> Option<usize> {
        let mut rank = 0;
        let mut current = self.root;
        while !current.is_sentinel() {
            let left = self.left(current);
            match self.cmp.compare(key, self.key(current)) {
                Ordering::Less => current = left,
                Ordering::Greater => {
                    rank += self.augment(left) + 1;
                    current = self.right(current);
                }
                Ordering::Equal => return Some(rank + self.augment(left)),
            }
        }
        None
    }
}

impl<K, V, C> RawTree<K, V, C, SubtreeSize> {
    /// The node at zero-based position `rank`, or the sentinel when
    /// `rank >= len`.
    pub(crate) fn select(&self, mut rank: usize) -> Handle {
        let mut current = self.root;
        while !current.is_sentinel() {
            let left = self.left(current);
            let left_size = *self.augment(left);
            current = match rank.cmp(&left_size) {
                Ordering::Equal => return current,
                Ordering::Less => left,
                Ordering::Greater => {
                    rank -= left_size + 1;
                    self.right(current)
                }
            };
        }
        current
    }
}

impl<K: Clone, V: Clone, C: Clone, A: Augment<K, V> + Clone> Clone for RawTree<K, V, C, A>
where
    A::Value: Clone,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            augments: self.augments.clone(),
            root: self.root,
            strategy: self.strategy,
            cmp: self.cmp.clone(),
            aug: self.aug.clone(),
        }
    }
}
