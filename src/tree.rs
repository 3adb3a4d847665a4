//! Implementation of an ordered collection, backed by a red-black tree
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;
use core::{cmp::Ordering, fmt};

use crate::{
    dot::Dot,
    error::TreeError,
    iter::{InOrder, LevelOrder, PostOrder, PreOrder, Traversal, Traverse},
    util::Tree,
};

//-----------------------------------------------------------------------------------------------//

// Storage for the value at one leaf of the tree
#[derive(Clone)]
struct Slot<T> {
    value: Option<T>,
    generation: u32,
}

/// A handle to a node in an `RBTree`.
///
/// Handles are returned by `insert`, `search`, `first`, `last`, `successor` and `predecessor`, and
/// stay valid across later insertions and deletions of *other* values, even though rebalancing
/// moves nodes around. A handle follows the identity of its node: once that node is deleted the
/// handle is stale, and every operation given a stale handle reports "no result".
///
/// A handle is only meaningful for the tree that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    leaf: usize,
    generation: u32,
}

//-----------------------------------------------------------------------------------------------//

/// An ordered collection of values, implemented using a red-black tree.
///
/// Values are sorted by a comparison function supplied on construction. The function must be a
/// total order, and two values comparing `Equal` may not coexist: inserting the second one fails
/// with `TreeError::DuplicateKey`.
///
/// The tree is not internally synchronised. Traversals borrow the tree, so it cannot be modified
/// while one is in progress.
#[derive(Clone)]
pub struct RBTree<T, F = fn(&T, &T) -> Ordering>
where
    F: Fn(&T, &T) -> Ordering,
{
    tree: Tree,
    slot: Vec<Slot<T>>,
    compare: F,
}

impl<T, F> RBTree<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Constructor
    pub fn new(compare: F) -> RBTree<T, F> {
        RBTree {
            tree: Tree::new(),
            slot: Vec::new(),
            compare,
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize, compare: F) -> RBTree<T, F> {
        RBTree {
            tree: Tree::with_capacity(capacity),
            slot: Vec::with_capacity(capacity),
            compare,
        }
    }

    /// Get the number of values in the `RBTree`
    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are any values in the `RBTree`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all values from the `RBTree`
    ///
    /// Every handle into the tree becomes stale.
    pub fn clear(&mut self) {
        self.tree.clear();
        for slot in self.slot.iter_mut() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
    }

    /// Reserves capacity for at least `additional` more values
    pub fn reserve(&mut self, additional: usize) {
        let required = self.tree.reserve(additional);
        let spare = self.slot.len() - self.tree.allocated_count();
        if required > spare {
            self.slot.reserve(required - spare);
        }
    }

    /// Insert a value.
    ///
    /// Returns a handle to the new node. If a value comparing `Equal` is already present the tree
    /// is left untouched and `TreeError::DuplicateKey` is returned.
    pub fn insert(&mut self, value: T) -> Result<NodeRef, TreeError> {
        let slot = &self.slot;
        let compare = &self.compare;

        let leaf = match self.tree.insert(|leaf| compare(&value, value_at(slot, leaf))) {
            Ok(leaf) => leaf,
            Err(leaf) => {
                log::debug!("insert rejected, duplicate of leaf {leaf}");
                return Err(TreeError::DuplicateKey);
            }
        };
        log::trace!("insert at leaf {leaf}, count {}", self.tree.count());

        debug_assert!(leaf <= self.slot.len());
        let generation = if leaf == self.slot.len() {
            self.slot.push(Slot {
                value: Some(value),
                generation: 0,
            });
            0
        } else {
            let slot = &mut self.slot[leaf];
            slot.value = Some(value);
            slot.generation
        };

        Ok(NodeRef { leaf, generation })
    }

    /// Delete a value.
    ///
    /// Returns `false` if the value is not in the tree. This is the equivalent of searching for the
    /// value and deleting the node found.
    pub fn delete(&mut self, value: &T) -> bool {
        match self.search(value) {
            Some(node) => self.delete_node(node),
            None => false,
        }
    }

    /// Delete the node behind a handle.
    ///
    /// Returns `false` if the handle is stale. When the node has two children its in-order
    /// successor moves into its place; the successor's own handle stays valid.
    pub fn delete_node(&mut self, node: NodeRef) -> bool {
        self.remove_node(node).is_some()
    }

    /// Delete the node behind a handle, returning its value.
    ///
    /// Returns `None` if the handle is stale.
    pub fn remove_node(&mut self, node: NodeRef) -> Option<T> {
        if !self.is_live(node) {
            return None;
        }

        log::trace!("remove leaf {}, count {}", node.leaf, self.tree.count());
        self.tree.remove(node.leaf);

        let slot = &mut self.slot[node.leaf];
        slot.generation = slot.generation.wrapping_add(1);
        slot.value.take()
    }

    /// Search for a value.
    ///
    /// If the value is not in the tree then `None` is returned.
    pub fn search(&self, value: &T) -> Option<NodeRef> {
        let compare = &self.compare;
        self.search_by(|other| compare(value, other))
    }

    /// Search using a probe function.
    ///
    /// `probe` is given stored values and must return the ordering of the sought key relative to
    /// them, consistent with the tree's comparison function. This allows lookups by a borrowed
    /// form of the stored values.
    pub fn search_by<P>(&self, mut probe: P) -> Option<NodeRef>
    where
        P: FnMut(&T) -> Ordering,
    {
        let slot = &self.slot;
        let leaf = self.tree.get(|leaf| probe(value_at(slot, leaf)));
        self.node(leaf)
    }

    /// Check if a value is in the tree
    #[inline]
    pub fn has(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Get the value behind a handle, or `None` if the handle is stale
    pub fn value(&self, node: NodeRef) -> Option<&T> {
        match self.slot.get(node.leaf) {
            Some(slot) if slot.generation == node.generation => slot.value.as_ref(),
            _ => None,
        }
    }

    /// Get the node holding the next value in order.
    ///
    /// Returns `None` at the last value, or if the handle is stale.
    pub fn successor(&self, node: NodeRef) -> Option<NodeRef> {
        if !self.is_live(node) {
            return None;
        }
        self.node(self.tree.next(node.leaf))
    }

    /// Get the node holding the previous value in order.
    ///
    /// Returns `None` at the first value, or if the handle is stale.
    pub fn predecessor(&self, node: NodeRef) -> Option<NodeRef> {
        if !self.is_live(node) {
            return None;
        }
        self.node(self.tree.prev(node.leaf))
    }

    /// Get the node holding the smallest value
    pub fn first(&self) -> Option<NodeRef> {
        self.node(self.tree.first())
    }

    /// Get the node holding the largest value
    pub fn last(&self) -> Option<NodeRef> {
        self.node(self.tree.last())
    }

    /// Remove and return the smallest value
    pub fn pop_first(&mut self) -> Option<T> {
        let node = self.first()?;
        self.remove_node(node)
    }

    /// Remove and return the largest value
    pub fn pop_last(&mut self) -> Option<T> {
        let node = self.last()?;
        self.remove_node(node)
    }

    /// Iterate over the values in the given order
    pub fn iter(&self, traversal: Traversal) -> Traverse<'_, T, F> {
        Traverse::new(self, traversal)
    }

    /// Iterate over the values in ascending order
    pub fn in_order(&self) -> InOrder<'_, T, F> {
        InOrder::new(self)
    }

    /// Iterate over the values, each before its children, left subtree first
    pub fn pre_order(&self) -> PreOrder<'_, T, F> {
        PreOrder::new(self)
    }

    /// Iterate over the values, each after its children, left subtree first
    pub fn post_order(&self) -> PostOrder<'_, T, F> {
        PostOrder::new(self)
    }

    /// Iterate over the values breadth first, top to bottom, left to right
    pub fn level_order(&self) -> LevelOrder<'_, T, F> {
        LevelOrder::new(self)
    }

    /// Render the tree as a Graphviz `digraph`, for diagnostics
    pub fn dot(&self) -> Dot<'_, T, F> {
        Dot::new(self)
    }

    // The structure of the tree, for the traversals
    #[inline]
    pub(crate) fn structure(&self) -> &Tree {
        &self.tree
    }

    // The value at a leaf that is linked into the tree
    #[inline]
    pub(crate) fn value_at(&self, leaf: usize) -> &T {
        value_at(&self.slot, leaf)
    }

    #[inline]
    fn is_live(&self, node: NodeRef) -> bool {
        self.value(node).is_some()
    }

    // A handle for a linked leaf, or `None` for `usize::MAX`
    #[inline]
    fn node(&self, leaf: usize) -> Option<NodeRef> {
        if !leaf == 0 {
            None
        } else {
            Some(NodeRef {
                leaf,
                generation: self.slot[leaf].generation,
            })
        }
    }

    // Test support: check the red-black invariants and the value order
    #[cfg(test)]
    pub(crate) fn check(&self) {
        self.tree.check();

        let live = self.slot.iter().filter(|s| s.value.is_some()).count();
        assert_eq!(live, self.tree.count());

        let mut leaf = self.tree.first();
        while !leaf != 0 {
            let next = self.tree.next(leaf);
            if !next != 0 {
                assert_eq!(
                    (self.compare)(self.value_at(leaf), self.value_at(next)),
                    Ordering::Less
                );
            }
            leaf = next;
        }
    }
}

impl<T> Default for RBTree<T>
where
    T: Ord,
{
    fn default() -> Self {
        RBTree::new(T::cmp)
    }
}

impl<T, F> fmt::Debug for RBTree<T, F>
where
    T: fmt::Debug,
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

impl<'a, T, F> IntoIterator for &'a RBTree<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;
    type IntoIter = InOrder<'a, T, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

impl<T> FromIterator<T> for RBTree<T>
where
    T: Ord,
{
    /// Collect values into a tree. Values equal to one already collected are dropped.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut tree = Self::with_capacity(iter.size_hint().0, T::cmp);
        for value in iter {
            let _ = tree.insert(value);
        }
        tree
    }
}

// The value at a linked leaf. A linked leaf without a value means the tree is corrupt.
#[inline]
fn value_at<T>(slot: &[Slot<T>], leaf: usize) -> &T {
    match &slot[leaf].value {
        Some(value) => value,
        None => unreachable!("leaf {leaf} is linked into the tree but holds no value"),
    }
}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
// Insert and check the invariants after every step, returning the handles
fn build(values: &[u32]) -> (RBTree<u32>, Vec<NodeRef>) {
    let mut tree = RBTree::default();
    let mut nodes = Vec::new();
    for &v in values {
        let node = tree.insert(v).unwrap();
        debug_assert_eq!(tree.value(node), Some(&v));
        tree.check();
        nodes.push(node);
    }
    (tree, nodes)
}

#[test]
// Inserting in ascending, descending and shuffled order
fn test_tree_0() {
    use alloc::vec;
    use rand::prelude::*;

    let ascending: Vec<u32> = (1..=10).collect();
    let descending: Vec<u32> = (1..=10).rev().collect();
    let mut shuffled = ascending.clone();
    shuffled.shuffle(&mut SmallRng::seed_from_u64(1234567890));

    for values in [ascending, descending, shuffled] {
        let (tree, _) = build(&values);
        debug_assert_eq!(tree.count(), 10);

        let v: Vec<u32> = tree.in_order().copied().collect();
        debug_assert_eq!(v, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }
}

#[test]
// Deleting in ascending, descending and shuffled order empties the tree
fn test_tree_1() {
    use rand::prelude::*;

    let ascending: Vec<u32> = (1..=10).collect();
    let descending: Vec<u32> = (1..=10).rev().collect();
    let mut shuffled = ascending.clone();
    shuffled.shuffle(&mut SmallRng::seed_from_u64(9876543210));

    for values in [ascending, descending, shuffled] {
        let (mut tree, _) = build(&values);
        for v in &values {
            debug_assert!(tree.delete(v), "failed to delete {v}");
            debug_assert!(!tree.has(v));
            tree.check();
        }

        debug_assert!(tree.is_empty());
        debug_assert_eq!(tree.first(), None);
        debug_assert_eq!(tree.structure().root(), !0);
    }
}

#[test]
// Insert half, delete it, then insert and delete the other half
fn test_tree_2() {
    use rand::prelude::*;

    let mut values: Vec<u32> = (1..=10).collect();
    values.shuffle(&mut SmallRng::seed_from_u64(5678901234));
    let (front, back) = values.split_at(values.len() / 2);

    let mut tree = RBTree::default();
    for half in [front, back] {
        for &v in half {
            tree.insert(v).unwrap();
            tree.check();
        }
        for v in half {
            debug_assert!(tree.delete(v));
            tree.check();
        }
    }

    debug_assert!(tree.is_empty());
    debug_assert!(!tree.delete(&1));
}

#[test]
// A duplicate insert fails and leaves the tree as it was
fn test_tree_3() {
    let (mut tree, _) = build(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    let before: Vec<u32> = tree.pre_order().copied().collect();

    debug_assert_eq!(tree.insert(7), Err(TreeError::DuplicateKey));
    debug_assert_eq!(tree.insert(1), Err(TreeError::DuplicateKey));

    let after: Vec<u32> = tree.pre_order().copied().collect();
    debug_assert_eq!(before, after);
    debug_assert_eq!(tree.count(), 10);
    debug_assert_eq!(tree.structure().allocated_count(), 10);
    tree.check();
}

#[test]
// Walking predecessors and successors from the middle of the tree
fn test_tree_4() {
    let (tree, _) = build(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    let five = tree.search(&5).unwrap();

    let mut current = five;
    for want in [4, 3, 2, 1] {
        current = tree.predecessor(current).unwrap();
        debug_assert_eq!(tree.value(current), Some(&want));
    }
    debug_assert_eq!(tree.predecessor(current), None);

    let mut current = five;
    for want in [6, 7, 8, 9, 10] {
        current = tree.successor(current).unwrap();
        debug_assert_eq!(tree.value(current), Some(&want));
    }
    debug_assert_eq!(tree.successor(current), None);

    // Edges
    debug_assert_eq!(tree.predecessor(tree.search(&1).unwrap()), None);
    debug_assert_eq!(tree.successor(tree.search(&10).unwrap()), None);
    debug_assert_eq!(tree.first(), tree.search(&1));
    debug_assert_eq!(tree.last(), tree.search(&10));

    // Wiggle
    let four = tree.predecessor(five).unwrap();
    debug_assert_eq!(tree.successor(four), Some(five));
    let six = tree.successor(five).unwrap();
    debug_assert_eq!(tree.predecessor(six), Some(five));
}

#[test]
// Handles follow node identity through rebalancing and deletion
fn test_tree_5() {
    let (mut tree, nodes) = build(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

    // 4 is the root with two children, its successor 5 takes its place
    let four = nodes[3];
    let five = nodes[4];
    debug_assert_eq!(tree.value(four), Some(&4));
    debug_assert!(tree.delete_node(four));
    tree.check();

    debug_assert_eq!(tree.value(four), None);
    debug_assert!(!tree.delete_node(four));
    debug_assert_eq!(tree.successor(four), None);
    debug_assert_eq!(tree.predecessor(four), None);

    debug_assert_eq!(tree.value(five), Some(&5));
    debug_assert_eq!(tree.predecessor(five), Some(nodes[2]));
    debug_assert_eq!(tree.search(&5), Some(five));

    // The recycled slot does not revive the stale handle
    let eleven = tree.insert(11).unwrap();
    debug_assert_ne!(eleven, four);
    debug_assert_eq!(tree.value(four), None);
    debug_assert_eq!(tree.value(eleven), Some(&11));

    // Every other handle survived
    for (n, &node) in nodes.iter().enumerate() {
        if n != 3 {
            debug_assert_eq!(tree.value(node), Some(&(n as u32 + 1)));
        }
    }
    tree.check();
}

#[test]
// First, last, pop and clear
fn test_tree_6() {
    use alloc::vec;

    let (mut tree, nodes) = build(&[5, 1, 9, 3, 7]);

    debug_assert_eq!(tree.first().and_then(|n| tree.value(n)), Some(&1));
    debug_assert_eq!(tree.last().and_then(|n| tree.value(n)), Some(&9));

    debug_assert_eq!(tree.pop_first(), Some(1));
    debug_assert_eq!(tree.pop_last(), Some(9));
    tree.check();
    debug_assert_eq!(tree.value(nodes[1]), None);

    let v: Vec<u32> = tree.in_order().copied().collect();
    debug_assert_eq!(v, vec![3, 5, 7]);

    tree.clear();
    debug_assert!(tree.is_empty());
    debug_assert_eq!(tree.pop_first(), None);
    debug_assert_eq!(tree.pop_last(), None);
    for node in nodes {
        debug_assert_eq!(tree.value(node), None);
    }

    tree.reserve(100);
    tree.insert(2).unwrap();
    tree.check();
    debug_assert_eq!(tree.count(), 1);
    debug_assert!(tree.slot.capacity() >= 100);
}

#[test]
// A custom comparison function orders the tree
fn test_tree_7() {
    use alloc::{string::String, vec};

    let mut tree = RBTree::new(|a: &String, b: &String| {
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    });
    for word in ["pear", "fig", "banana", "kiwi", "apple"] {
        tree.insert(String::from(word)).unwrap();
    }
    tree.check();

    let v: Vec<&str> = tree.in_order().map(|s| s.as_str()).collect();
    debug_assert_eq!(v, vec!["fig", "kiwi", "pear", "apple", "banana"]);

    // Lookup by a borrowed key
    let node = tree
        .search_by(|s| 4.cmp(&s.len()).then_with(|| "pear".cmp(s.as_str())))
        .unwrap();
    debug_assert_eq!(tree.value(node).map(|s| s.as_str()), Some("pear"));
    debug_assert_eq!(tree.search_by(|s| 3.cmp(&s.len()).then("zzz".cmp(s.as_str()))), None);

    let mut reverse = RBTree::new(|a: &i32, b: &i32| b.cmp(a));
    for v in [3, -1, 4, 1, -5, 9, 2, 6] {
        reverse.insert(v).unwrap();
    }
    let v: Vec<i32> = reverse.in_order().copied().collect();
    debug_assert_eq!(v, vec![9, 6, 4, 3, 2, 1, -1, -5]);
}

#[test]
// Search finds exactly the values inserted and not yet deleted
fn test_tree_8() {
    use rand::prelude::*;

    const COUNT: usize = 5000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut values: Vec<u64> = (0..COUNT as u64).map(|v| v * 2).collect();
    values.shuffle(&mut rng);

    let mut tree = RBTree::with_capacity(COUNT, u64::cmp);
    for &v in &values {
        tree.insert(v).unwrap();
    }
    tree.check();

    let (gone, kept) = values.split_at(COUNT / 2);
    for v in gone {
        debug_assert!(tree.delete(v));
    }
    tree.check();
    debug_assert_eq!(tree.count(), COUNT - COUNT / 2);

    for v in kept {
        debug_assert!(tree.has(v));
    }
    for v in gone {
        debug_assert!(!tree.has(v));
    }
    for v in 0..COUNT as u64 {
        debug_assert!(!tree.has(&(v * 2 + 1)));
    }
}

#[test]
// Every permutation order gives the same sorted sequence
fn test_tree_9() {
    use rand::prelude::*;

    let mut rng = SmallRng::seed_from_u64(5678901234);
    let sorted: Vec<u32> = (0..64).collect();

    for _ in 0..20 {
        let mut values = sorted.clone();
        values.shuffle(&mut rng);

        let tree: RBTree<u32> = values.iter().copied().collect();
        tree.check();

        let mut v = Vec::new();
        for &value in &tree {
            v.push(value);
        }
        debug_assert_eq!(v, sorted);
    }
}

#[test]
// A stress test with inserting and deleting random keys
fn test_tree_10() {
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(5678901234);

    let mut tree = RBTree::default();
    let mut inserted = 0;
    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        if tree.insert(key).is_ok() {
            inserted += 1;
        }
    }

    debug_assert_eq!(tree.count(), inserted);
    tree.check();

    let mut rng = SmallRng::seed_from_u64(5678901234);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        tree.delete(&key);
    }

    debug_assert_eq!(tree.count(), 0);
    tree.check();
}

#[test]
// Debug output lists the values in order
fn test_tree_11() {
    let tree: RBTree<i32> = [3, 1, 2].into_iter().collect();
    debug_assert_eq!(alloc::format!("{tree:?}"), "{1, 2, 3}");
}
