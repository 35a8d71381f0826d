//! Balanced binary search tree collections for Rust.
//!
//! This crate provides ordered containers built on one shared tree engine that
//! balances either by subtree height (AVL) or by node color (red-black):
//!
//! - [`OrderedSet`] - a set with a user-supplied comparator, a balancing
//!   strategy picked by type ([`AvlSet`], [`RbSet`]) and optional per-node
//!   [augmentation](augment)
//! - [`OrderStatisticTree`] - a set with O(log n) [`rank`](OrderStatisticTree::rank)
//!   and [`select`](OrderStatisticTree::select)
//! - [`OrderedMap`] - a key-value map whose [`Strategy`] is chosen at runtime
//!
//! Two independent structures round out the collection:
//!
//! - [`IndexedHeap`] - a binary heap with handle-based update and removal
//! - [`SegmentTree`] - range folds and lazy range updates over `[0, n)`
//!
//! # Example
//!
//! ```
//! use ordtree::{AvlSet, OrderStatisticTree, Rank};
//!
//! let mut set = AvlSet::new();
//! for key in [40, 10, 30, 20] {
//!     set.insert(key);
//! }
//!
//! // Neighbour queries (O(log n))
//! assert_eq!(set.get_greater(&20), Some(&30));
//! assert_eq!(set.get_lower_or_equal(&25), Some(&20));
//!
//! // Removing while walking
//! let mut cursor = set.cursor_front_mut();
//! while let Some(&key) = cursor.key() {
//!     if key % 20 == 0 {
//!         cursor.remove();
//!     } else {
//!         cursor.advance();
//!     }
//! }
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), [10, 30]);
//!
//! // Order statistics
//! let ranks: OrderStatisticTree<_> = ["kiwi", "apple", "mango"].into_iter().collect();
//! assert_eq!(ranks.rank(&"kiwi"), Some(1));
//! assert_eq!(ranks[Rank(2)], "mango");
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Stable node identity** - Removal relinks nodes instead of moving items, so
//!   cursors stay valid while they remove
//! - **Augmentation** - Any associative per-subtree summary, kept current through
//!   every rotation and relink
//! - **Logging** - Tree construction and restructuring are reported through the
//!   [`log`] facade at `debug` and `trace` level
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by 32-bit handles. Handle 0
//! is a shared sentinel that stands for every missing child and for the root's
//! parent, which keeps the rebalancing code free of null checks.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![warn(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod augment;
pub mod binary_heap;
pub mod order;
pub mod order_statistic;
pub mod ordered_map;
pub mod ordered_set;
pub mod segment_tree;
pub mod strategy;

pub use binary_heap::{HeapHandle, IndexedHeap};
pub use order_statistic::{OrderStatisticTree, Rank};
pub use ordered_map::OrderedMap;
pub use ordered_set::{AvlSet, OrderedSet, RbSet};
pub use segment_tree::{SegmentOps, SegmentTree};
pub use strategy::{Avl, Balance, RedBlack, Strategy, UnknownStrategy};
