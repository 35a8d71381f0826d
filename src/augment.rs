//! Per-node derived values maintained under every structural change.
//!
//! A container parameterized with an [`Augment`] keeps, for every node, the
//! value `combine(node, left, right)` where `left` and `right` are the values
//! already stored on the node's children (or [`Augment::empty`] for a missing
//! child). The balancing code recomputes it child-before-parent on exactly the
//! nodes whose children changed, so a value is never read stale once an
//! operation returns.
//!
//! # Examples
//!
//! Maintaining the sum of all keys of every subtree:
//!
//! ```
//! use ordtree::augment::CombineFn;
//! use ordtree::order::Natural;
//! use ordtree::{OrderedSet, RedBlack};
//!
//! let sum = CombineFn::new(0i64, |key: &i64, _: &(), l: &i64, r: &i64| key + l + r);
//! let mut set: OrderedSet<i64, RedBlack, Natural, _> = OrderedSet::with_augment(Natural, sum);
//! set.extend([5, 2, 3, 11, 7]);
//! assert_eq!(*set.root_augment(), 28);
//! ```

use core::fmt;

/// Computes a node's augmented value from its item and its children's values.
pub trait Augment<K, V> {
    /// The derived value stored on every node.
    type Value;

    /// The value of an absent child (the sentinel).
    fn empty(&self) -> Self::Value;

    /// Recomputes a node's value from its own item and its children's values.
    fn combine(&self, key: &K, value: &V, left: &Self::Value, right: &Self::Value) -> Self::Value;
}

/// No augmentation.
impl<K, V> Augment<K, V> for () {
    type Value = ();

    #[inline]
    fn empty(&self) -> Self::Value {}

    #[inline]
    fn combine(&self, _: &K, _: &V, _: &(), _: &()) -> Self::Value {}
}

/// Subtree size: `1 + left + right`, with an empty subtree counting 0.
///
/// This is the augmentation behind
/// [`OrderStatisticTree`](crate::OrderStatisticTree).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct SubtreeSize;

impl<K, V> Augment<K, V> for SubtreeSize {
    type Value = usize;

    #[inline]
    fn empty(&self) -> usize {
        0
    }

    #[inline]
    fn combine(&self, _: &K, _: &V, left: &usize, right: &usize) -> usize {
        1 + left + right
    }
}

/// An augmentation given by a caller-supplied closure and the value of an
/// empty subtree.
#[derive(Clone, Copy)]
pub struct CombineFn<X, F> {
    empty: X,
    combine: F,
}

impl<X, F> CombineFn<X, F> {
    /// Creates an augmentation whose empty subtree value is `empty`.
    pub const fn new(empty: X, combine: F) -> Self {
        Self { empty, combine }
    }
}

impl<K, V, X: Clone, F> Augment<K, V> for CombineFn<X, F>
where
    F: Fn(&K, &V, &X, &X) -> X,
{
    type Value = X;

    fn empty(&self) -> X {
        self.empty.clone()
    }

    fn combine(&self, key: &K, value: &V, left: &X, right: &X) -> X {
        (self.combine)(key, value, left, right)
    }
}

impl<X: fmt::Debug, F> fmt::Debug for CombineFn<X, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombineFn").field("empty", &self.empty).finish_non_exhaustive()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn subtree_size_counts_the_node() {
        let size = SubtreeSize;
        assert_eq!(<SubtreeSize as Augment<i32, ()>>::empty(&size), 0);
        assert_eq!(size.combine(&1, &(), &2, &3), 6);
    }

    #[test]
    fn combine_fn_uses_closure() {
        let max = CombineFn::new(i32::MIN, |k: &i32, _: &(), l: &i32, r: &i32| *k.max(l).max(r));
        assert_eq!(<_ as Augment<i32, ()>>::empty(&max), i32::MIN);
        assert_eq!(max.combine(&4, &(), &9, &i32::MIN), 9);
    }
}
