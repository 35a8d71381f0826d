use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::augment::Augment;
use crate::order::{Compare, Natural};
use crate::raw::{self, Direction, RawCursor, RawCursorMut, RawTree};
use crate::strategy::{Avl, Balance, RedBlack, Strategy};

mod cursor;

pub use cursor::{Cursor, CursorMut};

/// An ordered set of unique keys backed by a self-balancing binary search tree.
///
/// The balancing strategy `S` is either [`RedBlack`] (the default) or [`Avl`].
/// Keys are ordered by the comparator `C`, which defaults to the key type's
/// [`Ord`] implementation. Two keys are duplicates when neither precedes the
/// other. Every node additionally carries the augmented value `A` of its
/// subtree (none by default, see [`augment`](crate::augment)).
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key changes while it is in the set. The
/// behavior resulting from such a logic error is not specified, but will be
/// encapsulated to the `OrderedSet` that observed it and not result in
/// undefined behavior.
///
/// Iterators returned by [`OrderedSet::iter`] and [`OrderedSet::into_iter`]
/// produce their items in order, and take worst-case logarithmic and amortized
/// constant time per item returned.
///
/// # Examples
///
/// ```
/// use ordtree::{AvlSet, RbSet};
///
/// let mut set = RbSet::new();
/// for key in [5, 2, 3, 11, 7] {
///     set.insert(key);
/// }
///
/// assert_eq!(set.get(&2), Some(&2));
/// assert_eq!(set.get_greater(&2), Some(&3));
/// assert_eq!(set.get_lower_or_equal(&5), Some(&5));
/// assert_eq!(set.last(), Some(&11));
///
/// assert_eq!(set.remove(&2), Some(2));
/// assert_eq!(set.get(&2), None);
/// assert_eq!(set.len(), 4);
///
/// // The same operations on a height-balanced tree.
/// let avl: AvlSet<i32> = set.iter().copied().collect();
/// assert!(avl.iter().eq(set.iter()));
/// ```
pub struct OrderedSet<K, S = RedBlack, C = Natural, A = ()>
where
    A: Augment<K, ()>,
{
    pub(crate) tree: RawTree<K, (), C, A>,
    strategy: PhantomData<S>,
}

/// A height-balanced [`OrderedSet`].
pub type AvlSet<K, C = Natural, A = ()> = OrderedSet<K, Avl, C, A>;

/// A color-balanced [`OrderedSet`].
pub type RbSet<K, C = Natural, A = ()> = OrderedSet<K, RedBlack, C, A>;

/// An iterator over the keys of an [`OrderedSet`], in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`OrderedSet`].
///
/// # Examples
///
/// ```
/// use ordtree::RbSet;
///
/// let set: RbSet<i32> = [3, 1, 2].into_iter().collect();
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: OrderedSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K> {
    inner: raw::Iter<'a, K, ()>,
}

/// An owning iterator over the keys of an [`OrderedSet`], in ascending order.
///
/// This `struct` is created by the `into_iter` method on [`OrderedSet`]
/// (provided by the [`IntoIterator`] trait).
pub struct IntoIter<K> {
    inner: raw::IntoIter<K, ()>,
}

impl<K, S: Balance> OrderedSet<K, S> {
    /// Makes a new, empty `OrderedSet` ordered by [`Ord`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_augment(Natural, ())
    }
}

impl<K, S: Balance, C> OrderedSet<K, S, C> {
    /// Makes a new, empty `OrderedSet` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{OrderedSet, RbSet};
    /// use ordtree::order::{Natural, Reverse};
    ///
    /// let mut set: RbSet<i32, Reverse<Natural>> = OrderedSet::with_comparator(Reverse(Natural));
    /// set.extend([1, 3, 2]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_augment(cmp, ())
    }
}

impl<K, S: Balance, C, A: Augment<K, ()>> OrderedSet<K, S, C, A> {
    /// Makes a new, empty `OrderedSet` ordered by `cmp` whose nodes carry the
    /// augmented values computed by `aug`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{OrderedSet, RbSet};
    /// use ordtree::augment::SubtreeSize;
    /// use ordtree::order::Natural;
    ///
    /// let mut set: RbSet<i32, Natural, SubtreeSize> = OrderedSet::with_augment(Natural, SubtreeSize);
    /// set.extend(0..10);
    /// assert_eq!(*set.root_augment(), 10);
    /// ```
    #[must_use]
    pub fn with_augment(cmp: C, aug: A) -> Self {
        Self { tree: RawTree::new(S::STRATEGY, cmp, aug), strategy: PhantomData }
    }

    /// Like [`with_augment`](Self::with_augment), but with room for at least
    /// `capacity` keys before reallocating.
    #[must_use]
    pub fn with_capacity(cmp: C, aug: A, capacity: usize) -> Self {
        Self { tree: RawTree::with_capacity(S::STRATEGY, cmp, aug, capacity), strategy: PhantomData }
    }
}

impl<K, S, C, A: Augment<K, ()>> OrderedSet<K, S, C, A> {
    /// Returns the number of keys in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::RbSet;
    ///
    /// let mut set = RbSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no keys.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of keys the set can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }

    /// Returns the balancing strategy of this set.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.tree.strategy()
    }

    /// Returns the comparator ordering this set.
    #[must_use]
    pub fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    /// Returns the augmentation maintained by this set.
    #[must_use]
    pub fn augmentation(&self) -> &A {
        self.tree.augmentation()
    }

    /// Returns the augmented value of the whole set, or `A::empty()` for an
    /// empty set.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn root_augment(&self) -> &A::Value {
        self.tree.augment(self.tree.root())
    }

    /// Returns the smallest key in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.key_at(self.tree.first())
    }

    /// Returns the largest key in the set.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.key_at(self.tree.last())
    }

    /// Removes and returns the smallest key in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::RbSet;
    ///
    /// let mut set: RbSet<i32> = [1, 2].into_iter().collect();
    /// assert_eq!(set.pop_first(), Some(1));
    /// assert_eq!(set.pop_first(), Some(2));
    /// assert_eq!(set.pop_first(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Option<K> {
        self.tree.pop_first().map(|(key, ())| key)
    }

    /// Removes and returns the largest key in the set.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<K> {
        self.tree.pop_last().map(|(key, ())| key)
    }

    /// Clears the set, removing all keys.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Gets an iterator that visits the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::AvlSet;
    ///
    /// let set: AvlSet<usize> = [3, 1, 2].into_iter().collect();
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter { inner: raw::Iter::new(&self.tree) }
    }

    /// Returns a cursor positioned at the smallest key, stepping forward.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::RbSet;
    ///
    /// let set: RbSet<i32> = [1, 2, 3].into_iter().collect();
    /// let mut cursor = set.cursor_front();
    /// assert_eq!(cursor.key(), Some(&1));
    /// assert_eq!(cursor.advance(), Some(&2));
    /// ```
    pub fn cursor_front(&self) -> Cursor<'_, K> {
        Cursor::new(RawCursor::new(&self.tree, Direction::Forward))
    }

    /// Returns a cursor positioned at the largest key, stepping backward.
    pub fn cursor_back(&self) -> Cursor<'_, K> {
        Cursor::new(RawCursor::new(&self.tree, Direction::Reverse))
    }

    /// Returns a mutating cursor positioned at the smallest key, stepping
    /// forward.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::AvlSet;
    ///
    /// let mut set: AvlSet<i32> = (1..=5).collect();
    /// let mut cursor = set.cursor_front_mut();
    /// while let Some(&key) = cursor.key() {
    ///     if key % 2 == 0 {
    ///         cursor.remove();
    ///     } else {
    ///         cursor.advance();
    ///     }
    /// }
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 5]);
    /// ```
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, K, C, A> {
        CursorMut::new(RawCursorMut::new(&mut self.tree, Direction::Forward))
    }

    /// Returns a mutating cursor positioned at the largest key, stepping
    /// backward.
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, K, C, A> {
        CursorMut::new(RawCursorMut::new(&mut self.tree, Direction::Reverse))
    }

    fn key_at(&self, handle: raw::Handle) -> Option<&K> {
        (!handle.is_sentinel()).then(|| self.tree.key(handle))
    }
}

impl<K, S, C: Compare<K>, A: Augment<K, ()>> OrderedSet<K, S, C, A> {
    /// Returns `true` if the set contains a key equal to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        !self.tree.find(key).is_sentinel()
    }

    /// Returns the resident key equal to `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::RbSet;
    ///
    /// let set: RbSet<i32> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&K> {
        self.key_at(self.tree.find(key))
    }

    /// Returns the smallest key strictly greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::AvlSet;
    ///
    /// let set: AvlSet<i32> = [10, 20, 30].into_iter().collect();
    /// assert_eq!(set.get_greater(&10), Some(&20));
    /// assert_eq!(set.get_greater(&15), Some(&20));
    /// assert_eq!(set.get_greater(&30), None);
    /// ```
    #[must_use]
    pub fn get_greater(&self, key: &K) -> Option<&K> {
        self.key_at(self.tree.find_greater(key))
    }

    /// Returns the smallest key greater than or equal to `key`.
    #[must_use]
    pub fn get_greater_or_equal(&self, key: &K) -> Option<&K> {
        self.key_at(self.tree.find_greater_or_equal(key))
    }

    /// Returns the largest key strictly less than `key`.
    #[must_use]
    pub fn get_lower(&self, key: &K) -> Option<&K> {
        self.key_at(self.tree.find_lower(key))
    }

    /// Returns the largest key less than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::RbSet;
    ///
    /// let set: RbSet<i32> = [10, 20, 30].into_iter().collect();
    /// assert_eq!(set.get_lower_or_equal(&20), Some(&20));
    /// assert_eq!(set.get_lower_or_equal(&25), Some(&20));
    /// assert_eq!(set.get_lower_or_equal(&5), None);
    /// ```
    #[must_use]
    pub fn get_lower_or_equal(&self, key: &K) -> Option<&K> {
        self.key_at(self.tree.find_lower_or_equal(key))
    }

    /// Returns the augmented value of the subtree rooted at the node holding
    /// `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{OrderedSet, RbSet};
    /// use ordtree::augment::SubtreeSize;
    /// use ordtree::order::Natural;
    ///
    /// let mut set: RbSet<i32, Natural, SubtreeSize> = OrderedSet::with_augment(Natural, SubtreeSize);
    /// set.extend([2, 1, 3]);
    /// assert_eq!(set.augment_of(&2), Some(&3));
    /// assert_eq!(set.augment_of(&1), Some(&1));
    /// assert_eq!(set.augment_of(&9), None);
    /// ```
    #[must_use]
    pub fn augment_of(&self, key: &K) -> Option<&A::Value> {
        let handle = self.tree.find(key);
        (!handle.is_sentinel()).then(|| self.tree.augment(handle))
    }

    /// Inserts `key`, replacing an equal resident key. Returns the replaced
    /// key, or `None` if the set grew.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::RbSet;
    ///
    /// let mut set = RbSet::new();
    /// assert_eq!(set.replace_or_insert(5), None);
    /// assert_eq!(set.replace_or_insert(5), Some(5));
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn replace_or_insert(&mut self, key: K) -> Option<K> {
        self.tree.insert(key, ()).map(|(previous, ())| previous)
    }

    /// Adds `key` to the set. Returns whether the key was newly inserted.
    ///
    /// An equal resident key is replaced by `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K) -> bool {
        self.replace_or_insert(key).is_none()
    }

    /// Removes and returns the resident key equal to `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), Some(2));
    /// assert_eq!(set.remove(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, key: &K) -> Option<K> {
        self.tree.remove_key(key).map(|(key, ())| key)
    }

    /// Retains only the keys specified by the predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::RbSet;
    ///
    /// let mut set: RbSet<i32> = (0..8).collect();
    /// set.retain(|&k| k % 2 == 0);
    /// assert!(set.iter().eq([0, 2, 4, 6].iter()));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K) -> bool,
    {
        let mut cursor = self.cursor_front_mut();
        while let Some(key) = cursor.key() {
            if f(key) {
                cursor.advance();
            } else {
                cursor.remove();
            }
        }
    }
}

impl<K: Clone, S, C: Clone, A> Clone for OrderedSet<K, S, C, A>
where
    A: Augment<K, ()> + Clone,
    A::Value: Clone,
{
    fn clone(&self) -> Self {
        Self { tree: self.tree.clone(), strategy: PhantomData }
    }
}

impl<K: fmt::Debug, S, C, A: Augment<K, ()>> fmt::Debug for OrderedSet<K, S, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, S: Balance, C: Default, A: Augment<K, ()> + Default> Default for OrderedSet<K, S, C, A> {
    fn default() -> Self {
        Self::with_augment(C::default(), A::default())
    }
}

impl<K: PartialEq, S, C, A: Augment<K, ()>> PartialEq for OrderedSet<K, S, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K: Eq, S, C, A: Augment<K, ()>> Eq for OrderedSet<K, S, C, A> {}

impl<K, S, C, A> FromIterator<K> for OrderedSet<K, S, C, A>
where
    S: Balance,
    C: Compare<K> + Default,
    A: Augment<K, ()> + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<K, S, C: Compare<K>, A: Augment<K, ()>> Extend<K> for OrderedSet<K, S, C, A> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.replace_or_insert(key);
        }
    }
}

impl<'a, K: Copy + 'a, S, C: Compare<K>, A: Augment<K, ()>> Extend<&'a K> for OrderedSet<K, S, C, A> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        for &key in iter {
            self.replace_or_insert(key);
        }
    }
}

impl<K, S: Balance, const N: usize> From<[K; N]> for OrderedSet<K, S>
where
    Natural: Compare<K>,
{
    /// Converts a `[K; N]` into an `OrderedSet<K, S>`.
    ///
    /// ```
    /// use ordtree::AvlSet;
    ///
    /// let set = AvlSet::from([4, 1, 3]);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    fn from(keys: [K; N]) -> Self {
        let mut set = Self::with_augment(Natural, ());
        set.extend(keys);
        set
    }
}

impl<K, S, C, A: Augment<K, ()>> IntoIterator for OrderedSet<K, S, C, A> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    /// Gets an iterator for moving out the `OrderedSet`'s contents in
    /// ascending order.
    fn into_iter(self) -> IntoIter<K> {
        IntoIter { inner: raw::IntoIter::new(self.tree) }
    }
}

impl<'a, K, S, C, A: Augment<K, ()>> IntoIterator for &'a OrderedSet<K, S, C, A> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, ())| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(key, ())| key)
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter { inner: self.inner.clone() }
    }
}

impl<K: fmt::Debug> fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(key, ())| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(key, ())| key)
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}

impl<K> FusedIterator for IntoIter<K> {}

impl<K> fmt::Debug for IntoIter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("remaining", &self.inner.len()).finish()
    }
}
