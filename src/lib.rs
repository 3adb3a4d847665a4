//! ## Introduction
//!
//! This crate implements an ordered collection based on a binary search tree, balanced using the
//! red-black scheme. Every node is colored red or black, and insertions and deletions recolor and
//! rotate a handful of nodes so that no red node has a red child and every path from the root to
//! an empty child crosses the same number of black nodes. Together these keep the height of the
//! tree below `2 * log2(n + 1)`, so searches, insertions and deletions all take logarithmic time.
//!
//! ## Benefits
//!
//! - Values do not need to be hashable, `Clone` or `Copy`. Values that support `Ord` can use
//!   `RBTree::default()`, otherwise a custom comparison function is supplied to `RBTree::new`.
//! - Inserting a value that compares equal to one already present is rejected with
//!   `TreeError::DuplicateKey` and leaves the tree untouched.
//! - `insert` and `search` return a `NodeRef` handle that can be held across later mutations and
//!   used to step to the `successor` or `predecessor`, or to delete that node directly. A handle
//!   to a deleted node is detected as stale rather than silently pointing at another value.
//! - Values are traversed lazily in order, pre-order, post-order or level order.
//! - The crate is small and `#![no_std]`.
//! - The storage of values is separate to the storage of the structure of the tree. Values are
//!   moved when inserted and when the storage grows, but otherwise do not move as the tree is
//!   rebalanced around them. Storage freed by deletions is recycled for future insertions.
//!
//! ## Contents
//!
//! <center>
//!
//! | Type         | Stores     | Sorts By          | Iterator                         |
//! |:-------------|:-----------|:------------------|----------------------------------|
//! | `RBTree`     | Value      | Ord, or Function  | `Traverse`, `InOrder`, ...       |
//! | `StringTree` | String     | Ord               | `StringTreeIterator`             |
//!
//! </center>
//!
//! `RBTree::dot` renders the tree as a Graphviz graph for debugging. The crate also exposes
//! `util::Tree`, which implements the balancing over a set of `usize` indices into external
//! storage, without storing the values itself. It is provided to support development of additional
//! collection types.
//!
//! ## Logging
//!
//! Insertions, deletions and rotations are reported through the `log` facade at `trace` level and
//! rejected duplicates at `debug` level. No logger is installed by this crate.

#![no_std]
#![warn(missing_docs)]

mod dot;
mod error;
mod iter;
mod string;
mod tree;
pub mod util;

pub use dot::Dot;
pub use error::TreeError;
pub use iter::*;
pub use string::*;
pub use tree::*;
