//! A red-black tree of strings
#![warn(missing_docs)]

extern crate alloc;

use compact_str::CompactString;
use core::{cmp::Ordering, iter::FusedIterator};

use crate::{
    dot::Dot,
    error::TreeError,
    iter::{Traversal, Traverse},
    tree::{NodeRef, RBTree},
};

type StrCompare = fn(&CompactString, &CompactString) -> Ordering;

//-----------------------------------------------------------------------------------------------//

/// An ordered set of strings, implemented using a red-black tree.
///
/// This is specialised version of `RBTree` that stores keys as compact strings and looks them up
/// by `&str` without allocating.
#[derive(Clone, Default)]
pub struct StringTree {
    rbtree: RBTree<CompactString>,
}

impl StringTree {
    /// Constructor
    pub fn new() -> StringTree {
        StringTree {
            rbtree: RBTree::default(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> StringTree {
        StringTree {
            rbtree: RBTree::with_capacity(capacity, CompactString::cmp),
        }
    }

    /// Get the number of strings in the `StringTree`
    #[inline]
    pub fn count(&self) -> usize {
        self.rbtree.count()
    }

    /// Check if there are any strings in the `StringTree`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rbtree.is_empty()
    }

    /// Remove all strings from the `StringTree`
    pub fn clear(&mut self) {
        self.rbtree.clear();
    }

    /// Reserves capacity for at least `additional` more strings
    pub fn reserve(&mut self, additional: usize) {
        self.rbtree.reserve(additional);
    }

    /// Insert a string.
    ///
    /// Fails with `TreeError::DuplicateKey` if the string is already present.
    pub fn insert(&mut self, key: &str) -> Result<NodeRef, TreeError> {
        self.rbtree.insert(CompactString::new(key))
    }

    /// Delete a string.
    ///
    /// If the string does not exist, then `false` is returned.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.search(key) {
            Some(node) => self.rbtree.delete_node(node),
            None => false,
        }
    }

    /// Delete the node behind a handle, returning `false` if the handle is stale
    pub fn delete_node(&mut self, node: NodeRef) -> bool {
        self.rbtree.delete_node(node)
    }

    /// Search for a string
    pub fn search(&self, key: &str) -> Option<NodeRef> {
        self.rbtree.search_by(|other| key.cmp(other.as_str()))
    }

    /// Check if a string is in the tree
    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.search(key).is_some()
    }

    /// Get the string behind a handle
    pub fn value(&self, node: NodeRef) -> Option<&str> {
        self.rbtree.value(node).map(CompactString::as_str)
    }

    /// Get the node holding the next string in order
    pub fn successor(&self, node: NodeRef) -> Option<NodeRef> {
        self.rbtree.successor(node)
    }

    /// Get the node holding the previous string in order
    pub fn predecessor(&self, node: NodeRef) -> Option<NodeRef> {
        self.rbtree.predecessor(node)
    }

    /// Get the first string in the tree
    pub fn first(&self) -> Option<&str> {
        self.rbtree.first().and_then(|node| self.value(node))
    }

    /// Get the last string in the tree
    pub fn last(&self) -> Option<&str> {
        self.rbtree.last().and_then(|node| self.value(node))
    }

    /// Iterate over the strings in ascending order
    pub fn iter(&self) -> StringTreeIterator<'_> {
        self.traverse(Traversal::InOrder)
    }

    /// Iterate over the strings in the given order
    pub fn traverse(&self, traversal: Traversal) -> StringTreeIterator<'_> {
        StringTreeIterator {
            inner: self.rbtree.iter(traversal),
        }
    }

    /// Render the tree as a Graphviz `digraph`, for diagnostics
    pub fn dot(&self) -> Dot<'_, CompactString, StrCompare> {
        self.rbtree.dot()
    }
}

impl<'a> IntoIterator for &'a StringTree {
    type Item = &'a str;
    type IntoIter = StringTreeIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> FromIterator<&'a str> for StringTree {
    /// Collect strings into a tree. Repeated strings are dropped.
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut tree = Self::with_capacity(iter.size_hint().0);
        for key in iter {
            let _ = tree.insert(key);
        }
        tree
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `StringTree`
pub struct StringTreeIterator<'a> {
    inner: Traverse<'a, CompactString, StrCompare>,
}

impl<'a> Iterator for StringTreeIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next().map(CompactString::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl FusedIterator for StringTreeIterator<'_> {}

//-----------------------------------------------------------------------------------------------//

#[test]
// A very simple test of a string tree
fn test_string_0() {
    use alloc::vec::Vec;

    let mut tree = StringTree::new();
    tree.insert("Five").unwrap();
    tree.insert("One").unwrap();
    tree.insert("Nine").unwrap();

    debug_assert!(tree.has("Five"));
    debug_assert!(!tree.has("Seven"));
    debug_assert_eq!(tree.insert("One"), Err(TreeError::DuplicateKey));
    debug_assert_eq!(tree.count(), 3);

    let v: Vec<&str> = tree.iter().collect();
    debug_assert_eq!(v, ["Five", "Nine", "One"]);
    debug_assert_eq!(tree.first(), Some("Five"));
    debug_assert_eq!(tree.last(), Some("One"));

    let nine = tree.search("Nine").unwrap();
    debug_assert_eq!(tree.value(nine), Some("Nine"));
    let five = tree.predecessor(nine).unwrap();
    debug_assert_eq!(tree.value(five), Some("Five"));
    debug_assert_eq!(tree.predecessor(five), None);
    debug_assert_eq!(tree.successor(nine).and_then(|n| tree.value(n)), Some("One"));

    debug_assert!(tree.delete("Nine"));
    debug_assert!(!tree.delete("Nine"));
    debug_assert!(!tree.delete_node(nine));
    debug_assert_eq!(tree.value(nine), None);

    let mut v = Vec::new();
    for key in &tree {
        v.push(key);
    }
    debug_assert_eq!(v, ["Five", "One"]);
}

#[test]
// A stress test with long and short strings
fn test_string_1() {
    use alloc::{string::ToString, vec::Vec};
    use rand::prelude::*;

    const COUNT: usize = 10000;

    let mut rng = SmallRng::seed_from_u64(9876543210);

    let mut keys: Vec<alloc::string::String> = (0..COUNT)
        .map(|n| {
            let mut key = n.to_string();
            if n % 3 == 0 {
                key.push_str("-a-key-long-enough-to-live-on-the-heap");
            }
            key
        })
        .collect();
    keys.shuffle(&mut rng);

    let mut tree: StringTree = keys.iter().map(|k| k.as_str()).collect();
    tree.rbtree.check();
    debug_assert_eq!(tree.count(), COUNT);

    let mut sorted = keys.clone();
    sorted.sort();
    debug_assert!(tree.iter().eq(sorted.iter().map(|k| k.as_str())));
    debug_assert_eq!(tree.traverse(Traversal::LevelOrder).count(), COUNT);

    for key in &keys {
        debug_assert!(tree.delete(key));
    }
    tree.rbtree.check();
    debug_assert!(tree.is_empty());
}
