//! Balancing strategies.
//!
//! Every tree in this crate is either height-balanced ([`Avl`]) or
//! color-balanced ([`RedBlack`]). Sets fix the strategy in their type through
//! the [`Balance`] marker trait; maps choose at runtime with [`Strategy`].
//!
//! Both strategies share node storage, search, navigation and rotation. They
//! differ only in the tag each node carries and in how insert and delete
//! restore balance afterwards.

use core::fmt;
use core::str::FromStr;

/// The balancing strategy of a tree, chosen at runtime.
///
/// # Examples
///
/// ```
/// use ordtree::Strategy;
///
/// assert_eq!("avl".parse::<Strategy>(), Ok(Strategy::Avl));
/// assert_eq!("Red-Black".parse::<Strategy>(), Ok(Strategy::RedBlack));
/// assert!("splay".parse::<Strategy>().is_err());
/// assert_eq!(Strategy::default(), Strategy::RedBlack);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Height-balanced: sibling subtree heights differ by at most one.
    Avl,
    /// Color-balanced: no red node has a red child and every root-to-leaf
    /// path crosses the same number of black nodes.
    #[default]
    RedBlack,
}

impl Strategy {
    /// The canonical tag of this strategy, as accepted by [`FromStr`].
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Strategy::Avl => "avl",
            Strategy::RedBlack => "red-black",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    /// Parses `avl`, `rb`, `red-black` or `redblack`, ignoring ASCII case.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        const AVL: &[&str] = &["avl"];
        const RED_BLACK: &[&str] = &["rb", "red-black", "redblack", "red_black"];

        if AVL.iter().any(|known| known.eq_ignore_ascii_case(tag)) {
            Ok(Strategy::Avl)
        } else if RED_BLACK.iter().any(|known| known.eq_ignore_ascii_case(tag)) {
            Ok(Strategy::RedBlack)
        } else {
            Err(UnknownStrategy(()))
        }
    }
}

/// The error returned when parsing an unrecognised [`Strategy`] tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnknownStrategy(());

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown balancing strategy (expected `avl` or `red-black`)")
    }
}

impl core::error::Error for UnknownStrategy {}

mod sealed {
    pub trait Sealed {}
}

/// A balancing strategy fixed at the type level.
///
/// Implemented only by [`Avl`] and [`RedBlack`].
pub trait Balance: sealed::Sealed {
    /// The runtime strategy this marker selects.
    const STRATEGY: Strategy;
}

/// Height-balanced (AVL) trees.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Avl;

/// Color-balanced (red-black) trees.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct RedBlack;

impl sealed::Sealed for Avl {}
impl sealed::Sealed for RedBlack {}

impl Balance for Avl {
    const STRATEGY: Strategy = Strategy::Avl;
}

impl Balance for RedBlack {
    const STRATEGY: Strategy = Strategy::RedBlack;
}
