//! The ordering contract shared by every container in this crate.
//!
//! Containers never look at key equality directly. Every search, insertion
//! and removal goes through [`Compare::compare`], which by default is derived
//! from a strict less-than predicate: `a` and `b` are duplicates exactly when
//! neither precedes the other.

use core::cmp::Ordering;
use core::fmt;

/// A strict weak order over `K`.
///
/// Implementations only have to provide [`less`](Compare::less). It is a
/// logic error for `less` not to be a strict weak order; the resulting tree
/// shape is unspecified but memory safe.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use ordtree::order::{Compare, from_less};
///
/// let by_len = from_less(|a: &&str, b: &&str| a.len() < b.len());
/// assert!(by_len.less(&"ab", &"abc"));
/// assert_eq!(by_len.compare(&"ab", &"cd"), Ordering::Equal);
/// ```
pub trait Compare<K: ?Sized> {
    /// Returns `true` if `a` strictly precedes `b`.
    fn less(&self, a: &K, b: &K) -> bool;

    /// Three-way comparison derived from [`less`](Compare::less).
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl<K: ?Sized, C: Compare<K> + ?Sized> Compare<K> for &C {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (**self).less(a, b)
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (**self).compare(a, b)
    }
}

/// The natural order of a key type, as given by [`Ord`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// An order given by a caller-supplied less-than closure.
///
/// Built with [`from_less`].
#[derive(Clone, Copy, Default)]
pub struct LessFn<F>(F);

impl<F> LessFn<F> {
    /// Wraps `less` as a comparator.
    pub const fn new(less: F) -> Self {
        Self(less)
    }
}

impl<K: ?Sized, F> Compare<K> for LessFn<F>
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for LessFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LessFn(..)")
    }
}

/// Builds a comparator from a strict less-than predicate.
///
/// # Examples
///
/// ```
/// use ordtree::OrderedMap;
/// use ordtree::order::from_less;
///
/// let mut map = OrderedMap::with_comparator(from_less(|a: &i32, b: &i32| a > b));
/// map.replace_or_insert(1, "one");
/// map.replace_or_insert(2, "two");
/// assert_eq!(map.first(), Some((&2, &"two")));
/// ```
pub const fn from_less<K: ?Sized, F>(less: F) -> LessFn<F>
where
    F: Fn(&K, &K) -> bool,
{
    LessFn(less)
}

/// Reverses another comparator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reverse<C>(pub C);

impl<K: ?Sized, C: Compare<K>> Compare<K> for Reverse<C> {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self.0.less(b, a)
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn derived_compare_treats_mutual_non_precedence_as_equal() {
        let by_tens = from_less(|a: &i32, b: &i32| a / 10 < b / 10);
        assert_eq!(by_tens.compare(&11, &19), Ordering::Equal);
        assert_eq!(by_tens.compare(&9, &10), Ordering::Less);
        assert_eq!(by_tens.compare(&30, &29), Ordering::Greater);
    }

    #[test]
    fn reverse_flips_order() {
        let rev = Reverse(Natural);
        assert!(rev.less(&2, &1));
        assert_eq!(rev.compare(&1, &2), Ordering::Greater);
    }

    proptest! {
        #[test]
        fn derived_compare_matches_ord(a in any::<i64>(), b in any::<i64>()) {
            let derived = from_less(|x: &i64, y: &i64| x < y);
            prop_assert_eq!(derived.compare(&a, &b), a.cmp(&b));
            prop_assert_eq!(Natural.compare(&a, &b), a.cmp(&b));
        }
    }
}
