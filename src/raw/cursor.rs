use core::iter::FusedIterator;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use super::tree::RawTree;
use crate::augment::Augment;

/// The order in which a cursor visits keys.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    /// Ascending, starting at the minimum.
    Forward,
    /// Descending, starting at the maximum.
    Reverse,
}

impl Direction {
    #[inline]
    fn step<K, V>(self, nodes: &Arena<Node<K, V>>, handle: Handle) -> Handle {
        match self {
            Direction::Forward => nodes.successor(handle),
            Direction::Reverse => nodes.predecessor(handle),
        }
    }
}

/// Read-only cursor. The sentinel position means exhausted.
pub(crate) struct RawCursor<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    current: Handle,
    direction: Direction,
}

impl<'a, K, V> RawCursor<'a, K, V> {
    pub(crate) fn new<C, A: Augment<K, V>>(tree: &'a RawTree<K, V, C, A>, direction: Direction) -> Self {
        let current = match direction {
            Direction::Forward => tree.first(),
            Direction::Reverse => tree.last(),
        };
        Self { nodes: tree.nodes(), current, direction }
    }

    pub(crate) fn item(&self) -> Option<(&'a K, &'a V)> {
        (!self.current.is_sentinel()).then(|| self.nodes.get(self.current).item())
    }

    /// Moves one step; stays exhausted once exhausted.
    pub(crate) fn advance(&mut self) -> Option<(&'a K, &'a V)> {
        if !self.current.is_sentinel() {
            self.current = self.direction.step(self.nodes, self.current);
        }
        self.item()
    }
}

impl<K, V> Clone for RawCursor<'_, K, V> {
    fn clone(&self) -> Self {
        Self { nodes: self.nodes, current: self.current, direction: self.direction }
    }
}

/// Cursor that can remove the item it points at.
pub(crate) struct RawCursorMut<'a, K, V, C, A: Augment<K, V>> {
    tree: &'a mut RawTree<K, V, C, A>,
    current: Handle,
    direction: Direction,
}

impl<'a, K, V, C, A: Augment<K, V>> RawCursorMut<'a, K, V, C, A> {
    pub(crate) fn new(tree: &'a mut RawTree<K, V, C, A>, direction: Direction) -> Self {
        let current = match direction {
            Direction::Forward => tree.first(),
            Direction::Reverse => tree.last(),
        };
        Self { tree, current, direction }
    }

    pub(crate) fn item(&self) -> Option<(&K, &V)> {
        (!self.current.is_sentinel()).then(|| self.tree.item(self.current))
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        if self.current.is_sentinel() { None } else { Some(self.tree.value_mut(self.current)) }
    }

    pub(crate) fn advance(&mut self) -> Option<(&K, &V)> {
        if !self.current.is_sentinel() {
            self.current = self.direction.step(&self.tree.nodes, self.current);
        }
        self.item()
    }

    /// Removes the current item and moves to the next position in the
    /// cursor's direction.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is exhausted.
    pub(crate) fn remove(&mut self) -> (K, V) {
        assert!(!self.current.is_sentinel(), "`CursorMut::remove()` - cursor is exhausted!");
        // Removal relinks nodes instead of moving items, so `next` survives it.
        let next = self.direction.step(&self.tree.nodes, self.current);
        let removed = self.tree.remove(self.current);
        self.current = next;
        removed
    }
}

/// Double-ended in-order iterator over a tree's items.
pub(crate) struct Iter<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    front: Handle,
    back: Handle,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new<C, A: Augment<K, V>>(tree: &'a RawTree<K, V, C, A>) -> Self {
        Self { nodes: tree.nodes(), front: tree.first(), back: tree.last(), remaining: tree.len() }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let handle = self.front;
        self.front = self.nodes.successor(handle);
        Some(self.nodes.get(handle).item())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let handle = self.back;
        self.back = self.nodes.predecessor(handle);
        Some(self.nodes.get(handle).item())
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { nodes: self.nodes, front: self.front, back: self.back, remaining: self.remaining }
    }
}

/// Owning in-order iterator. Items are moved out of their nodes without
/// unlinking them, so navigation keeps working until the arena is dropped.
pub(crate) struct IntoIter<K, V> {
    nodes: Arena<Node<K, V>>,
    front: Handle,
    back: Handle,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new<C, A: Augment<K, V>>(tree: RawTree<K, V, C, A>) -> Self {
        let (front, back, remaining) = (tree.first(), tree.last(), tree.len());
        Self { nodes: tree.nodes, front, back, remaining }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let handle = self.front;
        self.front = self.nodes.successor(handle);
        Some(self.nodes.get_mut(handle).take_item())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let handle = self.back;
        self.back = self.nodes.predecessor(handle);
        Some(self.nodes.get_mut(handle).take_item())
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::order::Natural;
    use crate::strategy::Strategy;
    use alloc::vec::Vec;

    fn tree(strategy: Strategy, keys: impl IntoIterator<Item = i32>) -> RawTree<i32, (), Natural, ()> {
        let mut tree = RawTree::new(strategy, Natural, ());
        for key in keys {
            tree.insert(key, ());
        }
        tree
    }

    #[test]
    fn forward_cursor_removal_while_traversing() {
        for strategy in [Strategy::Avl, Strategy::RedBlack] {
            let mut tree = tree(strategy, 1..=5);
            let mut cursor = RawCursorMut::new(&mut tree, Direction::Forward);

            assert_eq!(cursor.remove(), (1, ()));
            assert_eq!(cursor.item(), Some((&2, &())));
            assert_eq!(cursor.remove(), (2, ()));
            assert_eq!(cursor.advance(), Some((&4, &())));
            assert_eq!(cursor.advance(), Some((&5, &())));
            assert_eq!(cursor.remove(), (5, ()));
            assert_eq!(cursor.item(), None);

            assert_eq!(tree.len(), 2);
            tree.validate_invariants();
            assert_eq!(Iter::new(&tree).map(|(k, ())| *k).collect::<Vec<_>>(), [3, 4]);
        }
    }

    #[test]
    fn reverse_cursor_walks_down() {
        for strategy in [Strategy::Avl, Strategy::RedBlack] {
            let mut tree = tree(strategy, [2, 4, 6]);
            let mut cursor = RawCursorMut::new(&mut tree, Direction::Reverse);
            assert_eq!(cursor.remove(), (6, ()));
            assert_eq!(cursor.item(), Some((&4, &())));
            assert_eq!(cursor.advance(), Some((&2, &())));
            assert_eq!(cursor.remove(), (2, ()));
            assert_eq!(cursor.item(), None);
            assert_eq!(tree.len(), 1);
        }
    }

    #[test]
    fn advance_past_the_end_stays_exhausted() {
        let tree = tree(Strategy::RedBlack, [1]);
        let mut cursor = RawCursor::new(&tree, Direction::Forward);
        assert_eq!(cursor.item(), Some((&1, &())));
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.item(), None);
    }

    #[test]
    fn cursor_on_empty_tree_is_exhausted() {
        let mut tree = tree(Strategy::Avl, []);
        assert!(RawCursor::new(&tree, Direction::Reverse).item().is_none());
        assert!(RawCursorMut::new(&mut tree, Direction::Forward).item().is_none());
    }

    #[test]
    #[should_panic(expected = "`CursorMut::remove()` - cursor is exhausted!")]
    fn remove_on_exhausted_cursor_panics() {
        let mut tree = tree(Strategy::Avl, [1]);
        let mut cursor = RawCursorMut::new(&mut tree, Direction::Forward);
        let _ = cursor.remove();
        let _ = cursor.remove();
    }

    #[test]
    fn iterators_meet_in_the_middle() {
        let tree = tree(Strategy::Avl, 0..10);
        let mut iter = Iter::new(&tree);
        assert_eq!(iter.len(), 10);
        assert_eq!(iter.next().map(|(k, ())| *k), Some(0));
        assert_eq!(iter.next_back().map(|(k, ())| *k), Some(9));
        let middle: Vec<i32> = iter.by_ref().map(|(k, ())| *k).collect();
        assert_eq!(middle, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn into_iter_moves_items_out_from_both_ends() {
        let tree = tree(Strategy::RedBlack, 0..6);
        let mut iter = IntoIter::new(tree);
        assert_eq!(iter.next_back(), Some((5, ())));
        assert_eq!(iter.next(), Some((0, ())));
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.map(|(k, ())| k).collect::<Vec<_>>(), [1, 2, 3, 4]);
    }
}
