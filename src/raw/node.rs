use super::arena::Arena;
use super::handle::Handle;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Per-node balance information. A tree only ever holds one kind of tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Tag {
    /// Height of the subtree rooted at the node; the sentinel has height 0.
    Height(u32),
    Color(Color),
}

impl Tag {
    #[inline]
    pub(crate) fn height(self) -> u32 {
        match self {
            Tag::Height(height) => height,
            Tag::Color(_) => unreachable!("`Tag::height()` - node is not height-balanced!"),
        }
    }

    #[inline]
    pub(crate) fn color(self) -> Color {
        match self {
            Tag::Color(color) => color,
            Tag::Height(_) => unreachable!("`Tag::color()` - node is not color-balanced!"),
        }
    }
}

/// A binary tree node. Links are arena handles; [`Handle::SENTINEL`] stands
/// for "no node".
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) left: Handle,
    pub(crate) right: Handle,
    pub(crate) parent: Handle,
    pub(crate) tag: Tag,
    item: Option<(K, V)>,
}

impl<K, V> Node<K, V> {
    pub(crate) const fn sentinel(tag: Tag) -> Self {
        Self { left: Handle::SENTINEL, right: Handle::SENTINEL, parent: Handle::SENTINEL, tag, item: None }
    }

    pub(crate) const fn leaf(key: K, value: V, parent: Handle, tag: Tag) -> Self {
        Self { left: Handle::SENTINEL, right: Handle::SENTINEL, parent, tag, item: Some((key, value)) }
    }

    #[inline]
    pub(crate) fn item(&self) -> (&K, &V) {
        let (key, value) = self.item.as_ref().expect("`Node::item()` - the sentinel has no item!");
        (key, value)
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        self.item().0
    }

    #[inline]
    pub(crate) fn item_mut(&mut self) -> &mut (K, V) {
        self.item.as_mut().expect("`Node::item_mut()` - the sentinel has no item!")
    }

    /// Moves the item out, leaving the links in place.
    pub(crate) fn take_item(&mut self) -> (K, V) {
        self.item.take().expect("`Node::take_item()` - node has no item!")
    }

    pub(crate) fn into_item(self) -> (K, V) {
        self.item.expect("`Node::into_item()` - the sentinel has no item!")
    }
}

/// Structural navigation. Needs nothing but the links, so iterators and
/// cursors can walk a tree without knowing its comparator or augmentation.
impl<K, V> Arena<Node<K, V>> {
    /// Leftmost node of the subtree rooted at `handle`.
    pub(crate) fn min_from(&self, mut handle: Handle) -> Handle {
        if handle.is_sentinel() {
            return handle;
        }
        loop {
            let left = self.get(handle).left;
            if left.is_sentinel() {
                return handle;
            }
            handle = left;
        }
    }

    /// Rightmost node of the subtree rooted at `handle`.
    pub(crate) fn max_from(&self, mut handle: Handle) -> Handle {
        if handle.is_sentinel() {
            return handle;
        }
        loop {
            let right = self.get(handle).right;
            if right.is_sentinel() {
                return handle;
            }
            handle = right;
        }
    }

    /// In-order successor, or the sentinel after the maximum.
    pub(crate) fn successor(&self, mut handle: Handle) -> Handle {
        let right = self.get(handle).right;
        if !right.is_sentinel() {
            return self.min_from(right);
        }
        let mut parent = self.get(handle).parent;
        while !parent.is_sentinel() && self.get(parent).right == handle {
            handle = parent;
            parent = self.get(parent).parent;
        }
        parent
    }

    /// In-order predecessor, or the sentinel before the minimum.
    pub(crate) fn predecessor(&self, mut handle: Handle) -> Handle {
        let left = self.get(handle).left;
        if !left.is_sentinel() {
            return self.max_from(left);
        }
        let mut parent = self.get(handle).parent;
        while !parent.is_sentinel() && self.get(parent).left == handle {
            handle = parent;
            parent = self.get(parent).parent;
        }
        parent
    }
}
