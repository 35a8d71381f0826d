use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

use crate::order::{Compare, Natural};
use crate::raw::{self, Direction, RawCursorMut, RawTree};
use crate::strategy::Strategy;

/// An ordered map whose balancing strategy is chosen at construction time.
///
/// Keys are unique under the comparator `C`; only keys are ever compared.
/// The map is red-black by default and height-balanced on request, see
/// [`with_strategy`](OrderedMap::with_strategy) and
/// [`with_tag`](OrderedMap::with_tag).
///
/// # Examples
///
/// ```
/// use ordtree::{OrderedMap, Strategy};
/// use ordtree::order::Natural;
///
/// let mut ages = OrderedMap::with_strategy(Strategy::Avl, Natural);
/// ages.insert("carol", 41);
/// ages.insert("alice", 29);
/// ages.insert("bob", 35);
///
/// assert_eq!(ages.get(&"bob"), Some(&35));
/// assert_eq!(ages.first(), Some((&"alice", &29)));
/// assert_eq!(ages.get_greater(&"alice"), Some((&"bob", &35)));
///
/// if let Some(age) = ages.get_mut(&"alice") {
///     *age += 1;
/// }
/// assert_eq!(ages[&"alice"], 30);
///
/// let names: Vec<_> = ages.keys().copied().collect();
/// assert_eq!(names, ["alice", "bob", "carol"]);
/// ```
pub struct OrderedMap<K, V, C = Natural> {
    tree: RawTree<K, V, C, ()>,
}

/// An iterator over the entries of an [`OrderedMap`], sorted by key.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    inner: raw::Iter<'a, K, V>,
}

/// An iterator over the keys of an [`OrderedMap`], in ascending order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: raw::Iter<'a, K, V>,
}

/// An iterator over the values of an [`OrderedMap`], in key order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: raw::Iter<'a, K, V>,
}

/// An owning iterator over the entries of an [`OrderedMap`], sorted by key.
pub struct IntoIter<K, V> {
    inner: raw::IntoIter<K, V>,
}

/// A cursor over an [`OrderedMap`] that can update or remove the entry it
/// points at.
///
/// # Examples
///
/// ```
/// use ordtree::OrderedMap;
///
/// let mut map: OrderedMap<i32, &str> = [(1, "a"), (2, "b"), (3, "c")].into_iter().collect();
/// let mut cursor = map.cursor_back_mut();
/// if let Some(value) = cursor.value_mut() {
///     *value = "z";
/// }
/// assert_eq!(cursor.remove(), ((3, "z"), Some((&2, &"b"))));
/// assert_eq!(map.len(), 2);
/// ```
pub struct CursorMut<'a, K, V, C> {
    raw: RawCursorMut<'a, K, V, C, ()>,
}

impl<K, V> OrderedMap<K, V> {
    /// Makes a new, empty red-black `OrderedMap` ordered by [`Ord`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(Strategy::default(), Natural)
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    /// Makes a new, empty red-black `OrderedMap` ordered by `cmp`.
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_strategy(Strategy::default(), cmp)
    }

    /// Makes a new, empty `OrderedMap` balanced by `strategy` and ordered by
    /// `cmp`.
    #[must_use]
    pub fn with_strategy(strategy: Strategy, cmp: C) -> Self {
        Self { tree: RawTree::new(strategy, cmp, ()) }
    }

    /// Makes a new, empty `OrderedMap` balanced by the strategy named `tag`
    /// (see [`Strategy`]'s [`FromStr`](core::str::FromStr) implementation).
    ///
    /// # Panics
    ///
    /// Panics if `tag` names no known strategy. Parse the tag with
    /// [`str::parse`] first to handle that case without panicking.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{OrderedMap, Strategy};
    /// use ordtree::order::Natural;
    ///
    /// let map: OrderedMap<u8, u8> = OrderedMap::with_tag("avl", Natural);
    /// assert_eq!(map.strategy(), Strategy::Avl);
    /// ```
    ///
    /// ```should_panic
    /// use ordtree::OrderedMap;
    /// use ordtree::order::Natural;
    ///
    /// let _: OrderedMap<u8, u8> = OrderedMap::with_tag("splay", Natural);
    /// ```
    #[must_use]
    pub fn with_tag(tag: &str, cmp: C) -> Self {
        match tag.parse() {
            Ok(strategy) => Self::with_strategy(strategy, cmp),
            Err(err) => panic!("`OrderedMap::with_tag()` - {err}: {tag:?}!"),
        }
    }

    /// Returns the balancing strategy chosen at construction.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.tree.strategy()
    }

    /// Returns the comparator that orders the keys.
    #[must_use]
    pub fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.entry_at(self.tree.first())
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.entry_at(self.tree.last())
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.pop_first()
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.pop_last()
    }

    /// Removes every entry, keeping the strategy and comparator.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Gets an iterator over the entries, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { inner: raw::Iter::new(&self.tree) }
    }

    /// Gets an iterator over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: raw::Iter::new(&self.tree) }
    }

    /// Gets an iterator over the values, in key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: raw::Iter::new(&self.tree) }
    }

    /// Returns a cursor at the entry with the smallest key, stepping forward.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, K, V, C> {
        CursorMut { raw: RawCursorMut::new(&mut self.tree, Direction::Forward) }
    }

    /// Returns a cursor at the entry with the largest key, stepping backward.
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, K, V, C> {
        CursorMut { raw: RawCursorMut::new(&mut self.tree, Direction::Reverse) }
    }

    fn entry_at(&self, handle: raw::Handle) -> Option<(&K, &V)> {
        (!handle.is_sentinel()).then(|| self.tree.item(handle))
    }
}

impl<K, V, C: Compare<K>> OrderedMap<K, V, C> {
    /// Returns a reference to the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the resident key equal to `key` and its value.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.entry_at(self.tree.find(key))
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.tree.find(key);
        if handle.is_sentinel() { None } else { Some(self.tree.value_mut(handle)) }
    }

    /// Returns `true` if the map holds an entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        !self.tree.find(key).is_sentinel()
    }

    /// Returns the entry with the smallest key strictly greater than `key`.
    #[must_use]
    pub fn get_greater(&self, key: &K) -> Option<(&K, &V)> {
        self.entry_at(self.tree.find_greater(key))
    }

    /// Returns the entry with the smallest key greater than or equal to `key`.
    #[must_use]
    pub fn get_greater_or_equal(&self, key: &K) -> Option<(&K, &V)> {
        self.entry_at(self.tree.find_greater_or_equal(key))
    }

    /// Returns the entry with the largest key strictly less than `key`.
    #[must_use]
    pub fn get_lower(&self, key: &K) -> Option<(&K, &V)> {
        self.entry_at(self.tree.find_lower(key))
    }

    /// Returns the entry with the largest key less than or equal to `key`.
    #[must_use]
    pub fn get_lower_or_equal(&self, key: &K) -> Option<(&K, &V)> {
        self.entry_at(self.tree.find_lower_or_equal(key))
    }

    /// Stores `value` under `key`, replacing an entry with an equal key.
    /// Returns the replaced entry, or `None` if the map grew.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.replace_or_insert(1, "a"), None);
    /// assert_eq!(map.replace_or_insert(1, "b"), Some((1, "a")));
    /// assert_eq!(map.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn replace_or_insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.tree.insert(key, value)
    }

    /// Stores `value` under `key`. Returns the previous value, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.replace_or_insert(key, value).map(|(_, previous)| previous)
    }

    /// Removes the entry under `key` and returns its value.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry under `key` and returns it.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.tree.remove_key(key)
    }
}

impl<'a, K, V, C> CursorMut<'a, K, V, C> {
    /// Returns the entry the cursor points at, or `None` once exhausted.
    #[must_use]
    pub fn entry(&self) -> Option<(&K, &V)> {
        self.raw.item()
    }

    /// Returns the key under the cursor, or `None` once exhausted.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.raw.item().map(|(key, _)| key)
    }

    /// Returns the value under the cursor for in-place modification.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.raw.value_mut()
    }

    /// Moves to the next entry in the cursor's direction and returns it.
    /// An exhausted cursor stays exhausted.
    pub fn advance(&mut self) -> Option<(&K, &V)> {
        self.raw.advance()
    }

    /// Removes the entry the cursor points at and moves to the next entry in
    /// the cursor's direction.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is exhausted.
    pub fn remove(&mut self) -> ((K, V), Option<(&K, &V)>) {
        let removed = self.raw.remove();
        (removed, self.raw.item())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for CursorMut<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.entry()).finish()
    }
}

impl<K, V, C: Compare<K>> Index<&K> for OrderedMap<K, V, C> {
    type Output = V;

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("`OrderedMap::index()` - key not found!")
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for OrderedMap<K, V, C> {
    fn clone(&self) -> Self {
        Self { tree: self.tree.clone() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default> Default for OrderedMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for OrderedMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for OrderedMap<K, V, C> {}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for OrderedMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for OrderedMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.replace_or_insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V, C> IntoIterator for OrderedMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter { inner: raw::IntoIter::new(self.tree) }
    }
}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter { inner: self.inner.clone() }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::order::from_less;
    use crate::strategy::Strategy;
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::vec::Vec;
    use proptest::prelude::*;
    use proptest::strategy::Strategy as _;

    #[test]
    fn default_strategy_is_red_black() {
        assert_eq!(OrderedMap::<i32, i32>::new().strategy(), Strategy::RedBlack);
        assert_eq!(OrderedMap::<i32, i32>::with_tag("rb", Natural).strategy(), Strategy::RedBlack);
        assert_eq!(OrderedMap::<i32, i32>::with_tag("AVL", Natural).strategy(), Strategy::Avl);
    }

    #[test]
    #[should_panic(expected = "`OrderedMap::with_tag()` - unknown balancing strategy")]
    fn unknown_tag_panics() {
        let _ = OrderedMap::<i32, i32>::with_tag("treap", Natural);
    }

    #[test]
    fn comparator_only_sees_keys() {
        let by_length = from_less(|a: &&str, b: &&str| a.len() < b.len());
        let mut map = OrderedMap::with_strategy(Strategy::Avl, by_length);
        map.insert("aa", 1);
        map.insert("b", 2);
        assert_eq!(map.replace_or_insert("cc", 3), Some(("aa", 1)));
        assert_eq!(map.get_key_value(&"zz"), Some((&"cc", &3)));
        assert_eq!(map.first(), Some((&"b", &2)));
    }

    #[test]
    fn cursor_removes_while_walking_forward() {
        for strategy in [Strategy::Avl, Strategy::RedBlack] {
            let mut map = OrderedMap::with_strategy(strategy, Natural);
            map.extend((1..=5).map(|k| (k, k * 10)));

            let mut cursor = map.cursor_front_mut();
            assert_eq!(cursor.remove(), ((1, 10), Some((&2, &20))));
            assert_eq!(cursor.remove(), ((2, 20), Some((&3, &30))));
            cursor.advance();
            cursor.advance();
            assert_eq!(cursor.remove(), ((5, 50), None));
            assert_eq!(cursor.advance(), None);

            assert_eq!(map.len(), 2);
            assert_eq!(map.iter().collect::<Vec<_>>(), [(&3, &30), (&4, &40)]);
        }
    }

    #[test]
    #[should_panic(expected = "`OrderedMap::index()` - key not found!")]
    fn index_of_missing_key_panics() {
        let map = OrderedMap::from([(1, 'a')]);
        let _ = map[&2];
    }

    #[test]
    fn debug_formats_as_map() {
        let map = OrderedMap::from([(2, 'b'), (1, 'a')]);
        assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b'}");
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(u16, u32),
        Remove(u16),
        PopFirst,
        PopLast,
        Mutate(u16),
    }

    fn op_strategy() -> impl proptest::strategy::Strategy<Value = Op> {
        prop_oneof![
            5 => (0u16..300, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            3 => (0u16..300).prop_map(Op::Remove),
            1 => Just(Op::PopFirst),
            1 => Just(Op::PopLast),
            1 => (0u16..300).prop_map(Op::Mutate),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn map_matches_btree_map(avl in any::<bool>(), ops in prop::collection::vec(op_strategy(), 0..400)) {
            let strategy = if avl { Strategy::Avl } else { Strategy::RedBlack };
            let mut map = OrderedMap::with_strategy(strategy, Natural);
            let mut model = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(key, value) => {
                        prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                    }
                    Op::Remove(key) => {
                        prop_assert_eq!(map.remove(&key), model.remove(&key));
                    }
                    Op::PopFirst => {
                        prop_assert_eq!(map.pop_first(), model.pop_first());
                    }
                    Op::PopLast => {
                        prop_assert_eq!(map.pop_last(), model.pop_last());
                    }
                    Op::Mutate(key) => {
                        if let (Some(ours), Some(theirs)) = (map.get_mut(&key), model.get_mut(&key)) {
                            *ours = ours.wrapping_add(1);
                            *theirs = theirs.wrapping_add(1);
                        }
                    }
                }
                prop_assert_eq!(map.len(), model.len());
            }

            prop_assert!(map.iter().eq(model.iter()));
            prop_assert!(map.keys().rev().eq(model.keys().rev()));
            prop_assert!(map.values().eq(model.values()));
            prop_assert!(map.into_iter().eq(model.into_iter()));
        }
    }
}
