use core::fmt;

use crate::augment::Augment;
use crate::raw::{RawCursor, RawCursorMut};

/// A read-only cursor over an [`OrderedSet`](super::OrderedSet).
///
/// A cursor points at one key, or is exhausted. Cursors made by
/// [`cursor_front`](super::OrderedSet::cursor_front) step in ascending order;
/// cursors made by [`cursor_back`](super::OrderedSet::cursor_back) step in
/// descending order.
///
/// # Examples
///
/// ```
/// use ordtree::RbSet;
///
/// let set = RbSet::from([1, 2, 3]);
/// let mut cursor = set.cursor_back();
/// assert_eq!(cursor.key(), Some(&3));
/// assert_eq!(cursor.advance(), Some(&2));
/// assert_eq!(cursor.advance(), Some(&1));
/// assert_eq!(cursor.advance(), None);
/// assert_eq!(cursor.advance(), None);
/// ```
pub struct Cursor<'a, K> {
    raw: RawCursor<'a, K, ()>,
}

impl<'a, K> Cursor<'a, K> {
    pub(crate) fn new(raw: RawCursor<'a, K, ()>) -> Self {
        Self { raw }
    }

    /// Returns the key the cursor points at, or `None` once exhausted.
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.raw.item().map(|(key, ())| key)
    }

    /// Moves to the next key in the cursor's direction and returns it.
    ///
    /// An exhausted cursor stays exhausted.
    ///
    /// # Complexity
    ///
    /// Amortized O(1), worst case O(log n).
    pub fn advance(&mut self) -> Option<&'a K> {
        self.raw.advance().map(|(key, ())| key)
    }
}

impl<K> Clone for Cursor<'_, K> {
    fn clone(&self) -> Self {
        Self { raw: self.raw.clone() }
    }
}

impl<K: fmt::Debug> fmt::Debug for Cursor<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key()).finish()
    }
}

/// A cursor over an [`OrderedSet`](super::OrderedSet) that can remove the key
/// it points at.
///
/// The cursor borrows the set mutably, so the set cannot change underneath it
/// except through the cursor itself.
///
/// # Examples
///
/// ```
/// use ordtree::AvlSet;
///
/// let mut set = AvlSet::from([1, 2, 3, 4, 5]);
/// let mut cursor = set.cursor_front_mut();
///
/// assert_eq!(cursor.remove(), (1, Some(&2)));
/// assert_eq!(cursor.remove(), (2, Some(&3)));
/// cursor.advance();
/// cursor.advance();
/// assert_eq!(cursor.remove(), (5, None));
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 4]);
/// ```
pub struct CursorMut<'a, K, C, A: Augment<K, ()>> {
    raw: RawCursorMut<'a, K, (), C, A>,
}

impl<'a, K, C, A: Augment<K, ()>> CursorMut<'a, K, C, A> {
    pub(crate) fn new(raw: RawCursorMut<'a, K, (), C, A>) -> Self {
        Self { raw }
    }

    /// Returns the key the cursor points at, or `None` once exhausted.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.raw.item().map(|(key, ())| key)
    }

    /// Moves to the next key in the cursor's direction and returns it.
    ///
    /// An exhausted cursor stays exhausted.
    pub fn advance(&mut self) -> Option<&K> {
        self.raw.advance().map(|(key, ())| key)
    }

    /// Removes the key the cursor points at and moves to the next key in the
    /// cursor's direction. Returns the removed key and the new position.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is exhausted.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self) -> (K, Option<&K>) {
        let (key, ()) = self.raw.remove();
        (key, self.key())
    }
}

impl<K: fmt::Debug, C, A: Augment<K, ()>> fmt::Debug for CursorMut<'_, K, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.key()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::{AvlSet, RbSet};
    use alloc::vec::Vec;

    #[test]
    fn removing_every_key_backwards_empties_the_set() {
        let mut set: RbSet<u32> = (0..100).collect();
        let mut cursor = set.cursor_back_mut();
        let mut removed = Vec::new();
        while cursor.key().is_some() {
            removed.push(cursor.remove().0);
        }
        assert!(set.is_empty());
        assert_eq!(removed, (0..100).rev().collect::<Vec<_>>());
        set.tree.validate_invariants();
    }

    #[test]
    fn removal_during_traversal_keeps_tree_valid() {
        let mut set: AvlSet<u32> = (0..200).collect();
        let mut cursor = set.cursor_front_mut();
        while let Some(&key) = cursor.key() {
            if key % 3 == 0 {
                let (removed, next) = cursor.remove();
                assert_eq!(removed, key);
                assert_eq!(next, (key + 1 < 200).then_some(&(key + 1)));
            } else {
                cursor.advance();
            }
        }
        assert_eq!(set.len(), 133);
        set.tree.validate_invariants();
    }

    #[test]
    #[should_panic(expected = "`CursorMut::remove()` - cursor is exhausted!")]
    fn removing_from_an_exhausted_cursor_panics() {
        let mut set: RbSet<u32> = RbSet::new();
        let mut cursor = set.cursor_front_mut();
        let _ = cursor.remove();
    }
}
