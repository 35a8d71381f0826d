//! Rank and select over a color-balanced tree augmented with subtree sizes.

use core::fmt;
use core::ops::Index;

use crate::augment::SubtreeSize;
use crate::order::{Compare, Natural};
use crate::ordered_set::{Cursor, CursorMut, IntoIter, Iter, OrderedSet};
use crate::strategy::RedBlack;

/// A zero-based rank into the sorted order of an [`OrderStatisticTree`].
///
/// # Examples
///
/// ```
/// use ordtree::{OrderStatisticTree, Rank};
///
/// let tree = OrderStatisticTree::from([30, 10, 20]);
/// assert_eq!(tree[Rank(0)], 10);
/// assert_eq!(tree[Rank(2)], 30);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);

/// An ordered set that also answers "what is the position of this key" and
/// "which key is at this position" in O(log n).
///
/// Every node stores the size of its subtree, kept current by the same
/// rotations and fixups that keep the red-black tree balanced.
///
/// # Examples
///
/// ```
/// use ordtree::OrderStatisticTree;
///
/// let mut tree = OrderStatisticTree::new();
/// for key in [50, 10, 40, 20, 30] {
///     tree.insert(key);
/// }
///
/// assert_eq!(tree.rank(&40), Some(3));
/// assert_eq!(tree.rank(&45), None);
/// assert_eq!(tree.select(1), Some(&20));
/// assert_eq!(tree.select(5), None);
///
/// tree.remove(&10);
/// assert_eq!(tree.rank(&40), Some(2));
/// ```
pub struct OrderStatisticTree<K, C = Natural> {
    set: OrderedSet<K, RedBlack, C, SubtreeSize>,
}

impl<K> OrderStatisticTree<K> {
    /// Makes a new, empty tree ordered by [`Ord`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, C> OrderStatisticTree<K, C> {
    /// Makes a new, empty tree ordered by `cmp`.
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        Self { set: OrderedSet::with_augment(cmp, SubtreeSize) }
    }

    /// Returns the number of keys in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns `true` if the tree holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Returns the smallest key, which is also `select(0)`.
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.set.first()
    }

    /// Returns the largest key.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.set.last()
    }

    /// Removes and returns the smallest key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Option<K> {
        self.set.pop_first()
    }

    /// Removes and returns the largest key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<K> {
        self.set.pop_last()
    }

    /// Removes every key. Ranks start over from zero.
    pub fn clear(&mut self) {
        self.set.clear();
    }

    /// Returns the key at zero-based position `rank` in sorted order, or
    /// `None` if `rank >= len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn select(&self, rank: usize) -> Option<&K> {
        let handle = self.set.tree.select(rank);
        (!handle.is_sentinel()).then(|| self.set.tree.key(handle))
    }

    /// Gets an iterator over the keys in rank order.
    pub fn iter(&self) -> Iter<'_, K> {
        self.set.iter()
    }

    /// Returns a read-only cursor at rank 0, stepping forward.
    pub fn cursor_front(&self) -> Cursor<'_, K> {
        self.set.cursor_front()
    }

    /// Returns a read-only cursor at the highest rank, stepping backward.
    pub fn cursor_back(&self) -> Cursor<'_, K> {
        self.set.cursor_back()
    }

    /// Returns a cursor at rank 0 that can remove keys while stepping forward.
    ///
    /// Ranks of the remaining keys stay current after each removal.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, K, C, SubtreeSize> {
        self.set.cursor_front_mut()
    }

    /// Returns a cursor at the highest rank that can remove keys while stepping backward.
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, K, C, SubtreeSize> {
        self.set.cursor_back_mut()
    }
}

impl<K, C: Compare<K>> OrderStatisticTree<K, C> {
    /// Returns the zero-based position of `key` in sorted order, or `None`
    /// if no equal key is present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank(&self, key: &K) -> Option<usize> {
        self.set.tree.rank(key)
    }

    /// Returns `true` if a key equal to `key` is present.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.set.contains(key)
    }

    /// Returns the resident key equal to `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&K> {
        self.set.get(key)
    }

    /// Returns the smallest key strictly greater than `key`.
    #[must_use]
    pub fn get_greater(&self, key: &K) -> Option<&K> {
        self.set.get_greater(key)
    }

    /// Returns the smallest key greater than or equal to `key`.
    #[must_use]
    pub fn get_greater_or_equal(&self, key: &K) -> Option<&K> {
        self.set.get_greater_or_equal(key)
    }

    /// Returns the largest key strictly less than `key`.
    #[must_use]
    pub fn get_lower(&self, key: &K) -> Option<&K> {
        self.set.get_lower(key)
    }

    /// Returns the largest key less than or equal to `key`.
    #[must_use]
    pub fn get_lower_or_equal(&self, key: &K) -> Option<&K> {
        self.set.get_lower_or_equal(key)
    }

    /// Inserts `key`, replacing an equal resident key. Returns the replaced
    /// key, or `None` if the tree grew.
    pub fn replace_or_insert(&mut self, key: K) -> Option<K> {
        self.set.replace_or_insert(key)
    }

    /// Adds `key`. Returns whether the key was newly inserted.
    pub fn insert(&mut self, key: K) -> bool {
        self.set.insert(key)
    }

    /// Removes the key equal to `key` and returns it. Every later key moves down one rank.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, key: &K) -> Option<K> {
        self.set.remove(key)
    }
}

impl<K, C> Index<Rank> for OrderStatisticTree<K, C> {
    type Output = K;

    /// Returns the key at `rank`.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is out of bounds.
    fn index(&self, rank: Rank) -> &K {
        self.select(rank.0).expect("`OrderStatisticTree::index()` - rank out of bounds!")
    }
}

impl<K: Clone, C: Clone> Clone for OrderStatisticTree<K, C> {
    fn clone(&self) -> Self {
        Self { set: self.set.clone() }
    }
}

impl<K: fmt::Debug, C> fmt::Debug for OrderStatisticTree<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, C: Default> Default for OrderStatisticTree<K, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: PartialEq, C> PartialEq for OrderStatisticTree<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.set == other.set
    }
}

impl<K: Eq, C> Eq for OrderStatisticTree<K, C> {}

impl<K, C: Compare<K> + Default> FromIterator<K> for OrderStatisticTree<K, C> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<K, C: Compare<K>> Extend<K> for OrderStatisticTree<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.set.extend(iter);
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for OrderStatisticTree<K> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<K, C> IntoIterator for OrderStatisticTree<K, C> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> IntoIter<K> {
        self.set.into_iter()
    }
}

impl<'a, K, C> IntoIterator for &'a OrderStatisticTree<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.set.iter()
    }
}
