//! A segment tree with lazy range updates over a fixed domain `[0, n)`.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Bound, RangeBounds};

use log::debug;

/// The algebra a [`SegmentTree`] folds and updates with.
///
/// `merge` must be associative with `identity` as its neutral element.
/// `apply` must distribute over `merge`: applying an update to a merged
/// segment gives the same result as merging the updated halves, where `len`
/// is the number of positions the value covers. `compose(older, newer)` must
/// behave like applying `older` and then `newer`.
pub trait SegmentOps {
    type Value: Clone;
    type Lazy: Clone;

    fn identity(&self) -> Self::Value;

    fn merge(&self, left: &Self::Value, right: &Self::Value) -> Self::Value;

    /// Applies `lazy` to a value that summarises `len` positions.
    fn apply(&self, value: &Self::Value, lazy: &Self::Lazy, len: usize) -> Self::Value;

    fn compose(&self, older: &Self::Lazy, newer: &Self::Lazy) -> Self::Lazy;
}

/// A segment tree answering range folds and applying range updates in
/// O(log n), deferring updates below fully covered nodes.
///
/// # Examples
///
/// Range add with range sum:
///
/// ```
/// use ordtree::{SegmentOps, SegmentTree};
///
/// struct AddSum;
///
/// impl SegmentOps for AddSum {
///     type Value = i64;
///     type Lazy = i64;
///
///     fn identity(&self) -> i64 {
///         0
///     }
///     fn merge(&self, left: &i64, right: &i64) -> i64 {
///         left + right
///     }
///     fn apply(&self, value: &i64, add: &i64, len: usize) -> i64 {
///         value + add * len as i64
///     }
///     fn compose(&self, older: &i64, newer: &i64) -> i64 {
///         older + newer
///     }
/// }
///
/// let mut tree = SegmentTree::from_vec(vec![1, 2, 3, 4, 5], AddSum);
/// assert_eq!(tree.fold(..), 15);
///
/// tree.update(1..4, 10);
/// assert_eq!(tree.fold(0..2), 13);
/// assert_eq!(tree.get(3), 14);
///
/// tree.set(3, 0);
/// assert_eq!(tree.fold(2..=4), 18);
/// ```
pub struct SegmentTree<O: SegmentOps> {
    len: usize,
    /// Node 1 is the root; node `i` has children `2i` and `2i + 1`.
    values: Vec<O::Value>,
    /// Updates already reflected in `values[i]` but not yet in its children.
    pending: Vec<Option<O::Lazy>>,
    ops: O,
}

impl<O: SegmentOps> SegmentTree<O> {
    /// Builds a tree over `values` in O(n).
    #[must_use]
    pub fn from_vec(values: Vec<O::Value>, ops: O) -> Self {
        let len = values.len();
        debug!("building segment tree over {len} positions");
        let size = if len == 0 { 0 } else { 4 * len };
        let mut tree = Self { len, values: vec![ops.identity(); size], pending: vec![None; size], ops };
        if len > 0 {
            tree.build(1, 0, len, &values);
        }
        tree
    }

    /// Returns the number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree covers no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the operations the tree was built with.
    #[must_use]
    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Returns the value at position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[must_use]
    pub fn get(&self, index: usize) -> O::Value {
        assert!(index < self.len, "`SegmentTree::get()` - index {index} out of bounds for length {}!", self.len);
        self.fold_in(1, 0, self.len, index, index + 1)
    }

    /// Folds the values in `range` with [`SegmentOps::merge`]. An empty range
    /// folds to [`SegmentOps::identity`].
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or reaches past `len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn fold(&self, range: impl RangeBounds<usize>) -> O::Value {
        let (start, end) = self.bounds(&range, "fold");
        if start == end {
            return self.ops.identity();
        }
        self.fold_in(1, 0, self.len, start, end)
    }

    /// Applies `lazy` to every position in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or reaches past `len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn update(&mut self, range: impl RangeBounds<usize>, lazy: O::Lazy) {
        let (start, end) = self.bounds(&range, "update");
        if start < end {
            self.update_in(1, 0, self.len, start, end, &lazy);
        }
    }

    /// Overwrites the value at position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: usize, value: O::Value) {
        assert!(index < self.len, "`SegmentTree::set()` - index {index} out of bounds for length {}!", self.len);
        self.set_in(1, 0, self.len, index, value);
    }

    fn bounds(&self, range: &impl RangeBounds<usize>, method: &str) -> (usize, usize) {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end + 1,
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };
        assert!(
            start <= end && end <= self.len,
            "`SegmentTree::{method}()` - invalid range {start}..{end} for length {}!",
            self.len
        );
        (start, end)
    }

    fn build(&mut self, node: usize, lo: usize, hi: usize, init: &[O::Value]) {
        if hi - lo == 1 {
            self.values[node] = init[lo].clone();
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.build(2 * node, lo, mid, init);
        self.build(2 * node + 1, mid, hi, init);
        self.pull(node);
    }

    fn pull(&mut self, node: usize) {
        self.values[node] = self.ops.merge(&self.values[2 * node], &self.values[2 * node + 1]);
    }

    fn apply_at(&mut self, node: usize, lazy: &O::Lazy, len: usize) {
        self.values[node] = self.ops.apply(&self.values[node], lazy, len);
        if len > 1 {
            self.pending[node] = Some(match self.pending[node].take() {
                Some(older) => self.ops.compose(&older, lazy),
                None => lazy.clone(),
            });
        }
    }

    fn push_down(&mut self, node: usize, lo: usize, mid: usize, hi: usize) {
        if let Some(lazy) = self.pending[node].take() {
            self.apply_at(2 * node, &lazy, mid - lo);
            self.apply_at(2 * node + 1, &lazy, hi - mid);
        }
    }

    /// Folds without pushing updates down: pending updates are applied to
    /// the partial result on the way back up.
    fn fold_in(&self, node: usize, lo: usize, hi: usize, start: usize, end: usize) -> O::Value {
        if start <= lo && hi <= end {
            return self.values[node].clone();
        }
        let mid = lo + (hi - lo) / 2;
        let mut acc = self.ops.identity();
        if start < mid {
            acc = self.fold_in(2 * node, lo, mid, start, end);
        }
        if mid < end {
            acc = self.ops.merge(&acc, &self.fold_in(2 * node + 1, mid, hi, start, end));
        }
        match &self.pending[node] {
            Some(lazy) => self.ops.apply(&acc, lazy, end.min(hi) - start.max(lo)),
            None => acc,
        }
    }

    fn update_in(&mut self, node: usize, lo: usize, hi: usize, start: usize, end: usize, lazy: &O::Lazy) {
        if end <= lo || hi <= start {
            return;
        }
        if start <= lo && hi <= end {
            self.apply_at(node, lazy, hi - lo);
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.push_down(node, lo, mid, hi);
        self.update_in(2 * node, lo, mid, start, end, lazy);
        self.update_in(2 * node + 1, mid, hi, start, end, lazy);
        self.pull(node);
    }

    fn set_in(&mut self, node: usize, lo: usize, hi: usize, index: usize, value: O::Value) {
        if hi - lo == 1 {
            self.values[node] = value;
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.push_down(node, lo, mid, hi);
        if index < mid {
            self.set_in(2 * node, lo, mid, index, value);
        } else {
            self.set_in(2 * node + 1, mid, hi, index, value);
        }
        self.pull(node);
    }
}

impl<O: SegmentOps + Clone> Clone for SegmentTree<O> {
    fn clone(&self) -> Self {
        Self { len: self.len, values: self.values.clone(), pending: self.pending.clone(), ops: self.ops.clone() }
    }
}

impl<O: SegmentOps> fmt::Debug for SegmentTree<O>
where
    O::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries((0..self.len).map(|index| self.get(index))).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use proptest::prelude::*;

    /// Range add, range sum.
    struct AddSum;

    impl SegmentOps for AddSum {
        type Value = i64;
        type Lazy = i64;

        fn identity(&self) -> i64 {
            0
        }

        fn merge(&self, left: &i64, right: &i64) -> i64 {
            left + right
        }

        fn apply(&self, value: &i64, add: &i64, len: usize) -> i64 {
            value + add * i64::try_from(len).unwrap()
        }

        fn compose(&self, older: &i64, newer: &i64) -> i64 {
            older + newer
        }
    }

    /// Range assign, range minimum.
    struct AssignMin;

    impl SegmentOps for AssignMin {
        type Value = i32;
        type Lazy = i32;

        fn identity(&self) -> i32 {
            i32::MAX
        }

        fn merge(&self, left: &i32, right: &i32) -> i32 {
            *left.min(right)
        }

        fn apply(&self, _: &i32, assigned: &i32, _: usize) -> i32 {
            *assigned
        }

        fn compose(&self, _: &i32, newer: &i32) -> i32 {
            *newer
        }
    }

    #[test]
    fn empty_tree_folds_to_identity() {
        let mut tree = SegmentTree::from_vec(Vec::new(), AddSum);
        assert!(tree.is_empty());
        assert_eq!(tree.fold(..), 0);
        tree.update(.., 5);
        assert_eq!(tree.fold(0..0), 0);
    }

    #[test]
    fn overlapping_updates_compose() {
        let mut tree = SegmentTree::from_vec(vec![0; 8], AddSum);
        tree.update(0..6, 1);
        tree.update(2..8, 2);
        tree.update(3..=3, 4);
        assert_eq!(format!("{tree:?}"), "[1, 1, 3, 7, 3, 3, 2, 2]");
        assert_eq!(tree.fold(1..5), 14);
    }

    #[test]
    fn assignment_overrides_older_updates() {
        let mut tree = SegmentTree::from_vec(vec![5, 3, 8, 6, 1, 9], AssignMin);
        assert_eq!(tree.fold(..), 1);
        tree.update(2..6, 7);
        assert_eq!(tree.fold(2..), 7);
        assert_eq!(tree.fold(..2), 3);
        tree.update(0..3, 10);
        tree.set(4, 2);
        assert_eq!(tree.fold(..), 2);
        assert_eq!(tree.get(2), 10);
        assert_eq!(tree.get(3), 7);
    }

    #[test]
    #[should_panic(expected = "`SegmentTree::fold()` - invalid range 2..6 for length 5!")]
    fn range_past_the_end_panics() {
        let tree = SegmentTree::from_vec(vec![0; 5], AddSum);
        let _ = tree.fold(2..6);
    }

    #[test]
    #[should_panic(expected = "`SegmentTree::update()` - invalid range 3..2 for length 5!")]
    #[allow(clippy::reversed_empty_ranges)]
    fn inverted_range_panics() {
        let mut tree = SegmentTree::from_vec(vec![0; 5], AddSum);
        tree.update(3..2, 1);
    }

    #[test]
    #[should_panic(expected = "`SegmentTree::get()` - index 5 out of bounds for length 5!")]
    fn get_past_the_end_panics() {
        let tree = SegmentTree::from_vec(vec![0; 5], AddSum);
        let _ = tree.get(5);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Add(usize, usize, i64),
        Set(usize, i64),
        Fold(usize, usize),
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn matches_a_plain_vec(
            init in prop::collection::vec(-1000i64..1000, 1..64),
            ops in prop::collection::vec(
                prop_oneof![
                    (any::<usize>(), any::<usize>(), -50i64..50).prop_map(|(a, b, v)| Op::Add(a, b, v)),
                    (any::<usize>(), -1000i64..1000).prop_map(|(i, v)| Op::Set(i, v)),
                    (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Fold(a, b)),
                ],
                0..100,
            ),
        ) {
            let mut tree = SegmentTree::from_vec(init.clone(), AddSum);
            let mut model = init;
            let n = model.len();

            for op in ops {
                match op {
                    Op::Add(a, b, v) => {
                        let (start, end) = ((a % (n + 1)).min(b % (n + 1)), (a % (n + 1)).max(b % (n + 1)));
                        tree.update(start..end, v);
                        model[start..end].iter_mut().for_each(|x| *x += v);
                    }
                    Op::Set(i, v) => {
                        tree.set(i % n, v);
                        model[i % n] = v;
                    }
                    Op::Fold(a, b) => {
                        let (start, end) = ((a % (n + 1)).min(b % (n + 1)), (a % (n + 1)).max(b % (n + 1)));
                        prop_assert_eq!(tree.fold(start..end), model[start..end].iter().sum::<i64>());
                    }
                }
            }

            for (index, value) in model.iter().enumerate() {
                prop_assert_eq!(tree.get(index), *value);
            }
        }
    }
}
