//! Traversals over the values of an `RBTree`
#![warn(missing_docs)]

extern crate alloc;

use alloc::{collections::VecDeque, vec::Vec};
use core::{cmp::Ordering, iter::FusedIterator};

use crate::tree::RBTree;

//-----------------------------------------------------------------------------------------------//

/// The order in which a traversal visits the values of a tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// Ascending order: left subtree, node, right subtree
    InOrder,
    /// Node, then left subtree, then right subtree
    PreOrder,
    /// Left subtree, then right subtree, then node
    PostOrder,
    /// Breadth first: top to bottom, left to right
    LevelOrder,
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over an `RBTree` in any of the four traversal orders
///
/// Returned by `RBTree::iter`. Dropping the iterator early ends the traversal.
pub enum Traverse<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// See `InOrder`
    InOrder(InOrder<'a, T, F>),
    /// See `PreOrder`
    PreOrder(PreOrder<'a, T, F>),
    /// See `PostOrder`
    PostOrder(PostOrder<'a, T, F>),
    /// See `LevelOrder`
    LevelOrder(LevelOrder<'a, T, F>),
}

impl<'a, T, F> Traverse<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub(crate) fn new(rbtree: &'a RBTree<T, F>, traversal: Traversal) -> Self {
        match traversal {
            Traversal::InOrder => Traverse::InOrder(InOrder::new(rbtree)),
            Traversal::PreOrder => Traverse::PreOrder(PreOrder::new(rbtree)),
            Traversal::PostOrder => Traverse::PostOrder(PostOrder::new(rbtree)),
            Traversal::LevelOrder => Traverse::LevelOrder(LevelOrder::new(rbtree)),
        }
    }
}

impl<'a, T, F> Iterator for Traverse<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match self {
            Traverse::InOrder(iter) => iter.next(),
            Traverse::PreOrder(iter) => iter.next(),
            Traverse::PostOrder(iter) => iter.next(),
            Traverse::LevelOrder(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Traverse::InOrder(iter) => iter.size_hint(),
            Traverse::PreOrder(iter) => iter.size_hint(),
            Traverse::PostOrder(iter) => iter.size_hint(),
            Traverse::LevelOrder(iter) => iter.size_hint(),
        }
    }
}

impl<T, F> FusedIterator for Traverse<'_, T, F> where F: Fn(&T, &T) -> Ordering {}

//-----------------------------------------------------------------------------------------------//

/// In-order iterator over an `RBTree`, yielding values in ascending order
pub struct InOrder<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    rbtree: &'a RBTree<T, F>,
    stack: Vec<usize>,
    leaf: usize,
    count: usize,
}

impl<'a, T, F> InOrder<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub(crate) fn new(rbtree: &'a RBTree<T, F>) -> Self {
        let tree = rbtree.structure();
        InOrder {
            rbtree,
            stack: Vec::new(),
            leaf: tree.root(),
            count: tree.count(),
        }
    }
}

impl<'a, T, F> Iterator for InOrder<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let tree = self.rbtree.structure();

        // Descend to the left-most unvisited leaf
        while !self.leaf != 0 {
            self.stack.push(self.leaf);
            self.leaf = tree.left(self.leaf);
        }

        let leaf = self.stack.pop()?;
        self.leaf = tree.right(leaf);
        self.count -= 1;

        Some(self.rbtree.value_at(leaf))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl<T, F> FusedIterator for InOrder<'_, T, F> where F: Fn(&T, &T) -> Ordering {}

//-----------------------------------------------------------------------------------------------//

/// Pre-order iterator over an `RBTree`, yielding each value before those below it
pub struct PreOrder<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    rbtree: &'a RBTree<T, F>,
    stack: Vec<usize>,
    count: usize,
}

impl<'a, T, F> PreOrder<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub(crate) fn new(rbtree: &'a RBTree<T, F>) -> Self {
        let tree = rbtree.structure();
        let mut stack = Vec::new();
        if !tree.root() != 0 {
            stack.push(tree.root());
        }

        PreOrder {
            rbtree,
            stack,
            count: tree.count(),
        }
    }
}

impl<'a, T, F> Iterator for PreOrder<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let tree = self.rbtree.structure();
        let leaf = self.stack.pop()?;

        // Right first, so the left subtree is visited first
        let right = tree.right(leaf);
        if !right != 0 {
            self.stack.push(right);
        }
        let left = tree.left(leaf);
        if !left != 0 {
            self.stack.push(left);
        }

        self.count -= 1;
        Some(self.rbtree.value_at(leaf))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl<T, F> FusedIterator for PreOrder<'_, T, F> where F: Fn(&T, &T) -> Ordering {}

//-----------------------------------------------------------------------------------------------//

/// Post-order iterator over an `RBTree`, yielding each value after those below it
pub struct PostOrder<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    rbtree: &'a RBTree<T, F>,
    stack: Vec<usize>,
    leaf: usize,
    visited: usize,
    count: usize,
}

impl<'a, T, F> PostOrder<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub(crate) fn new(rbtree: &'a RBTree<T, F>) -> Self {
        let tree = rbtree.structure();
        PostOrder {
            rbtree,
            stack: Vec::new(),
            leaf: tree.root(),
            visited: !0,
            count: tree.count(),
        }
    }
}

impl<'a, T, F> Iterator for PostOrder<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let tree = self.rbtree.structure();

        loop {
            if !self.leaf != 0 {
                self.stack.push(self.leaf);
                self.leaf = tree.left(self.leaf);
                continue;
            }

            let top = *self.stack.last()?;
            let right = tree.right(top);

            // Descend right unless we have just come back from there
            if !right != 0 && right != self.visited {
                self.leaf = right;
            } else {
                self.stack.pop();
                self.visited = top;
                self.count -= 1;
                return Some(self.rbtree.value_at(top));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl<T, F> FusedIterator for PostOrder<'_, T, F> where F: Fn(&T, &T) -> Ordering {}

//-----------------------------------------------------------------------------------------------//

/// Level-order iterator over an `RBTree`, yielding values breadth first
pub struct LevelOrder<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    rbtree: &'a RBTree<T, F>,
    queue: VecDeque<usize>,
    count: usize,
}

impl<'a, T, F> LevelOrder<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub(crate) fn new(rbtree: &'a RBTree<T, F>) -> Self {
        let tree = rbtree.structure();
        let mut queue = VecDeque::new();
        if !tree.root() != 0 {
            queue.push_back(tree.root());
        }

        LevelOrder {
            rbtree,
            queue,
            count: tree.count(),
        }
    }
}

impl<'a, T, F> Iterator for LevelOrder<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let tree = self.rbtree.structure();
        let leaf = self.queue.pop_front()?;

        let left = tree.left(leaf);
        if !left != 0 {
            self.queue.push_back(left);
        }
        let right = tree.right(leaf);
        if !right != 0 {
            self.queue.push_back(right);
        }

        self.count -= 1;
        Some(self.rbtree.value_at(leaf))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl<T, F> FusedIterator for LevelOrder<'_, T, F> where F: Fn(&T, &T) -> Ordering {}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
fn one_to_ten() -> RBTree<u32> {
    let mut tree = RBTree::default();
    for v in 1..=10 {
        tree.insert(v).unwrap();
    }
    tree
}

#[test]
// The four orders over 1..=10 inserted in ascending order
fn test_iter_0() {
    use alloc::vec;

    let tree = one_to_ten();

    let v: Vec<u32> = tree.iter(Traversal::InOrder).copied().collect();
    debug_assert_eq!(v, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

    let v: Vec<u32> = tree.iter(Traversal::PreOrder).copied().collect();
    debug_assert_eq!(v, vec![4, 2, 1, 3, 6, 5, 8, 7, 9, 10]);

    let v: Vec<u32> = tree.iter(Traversal::PostOrder).copied().collect();
    debug_assert_eq!(v, vec![1, 3, 2, 5, 7, 10, 9, 8, 6, 4]);

    let v: Vec<u32> = tree.iter(Traversal::LevelOrder).copied().collect();
    debug_assert_eq!(v, vec![4, 2, 6, 1, 3, 5, 8, 7, 9, 10]);
}

#[test]
// Traversals stop early and restart from the beginning
fn test_iter_1() {
    use alloc::vec;

    let tree = one_to_ten();

    for traversal in [
        Traversal::InOrder,
        Traversal::PreOrder,
        Traversal::PostOrder,
        Traversal::LevelOrder,
    ] {
        let mut iter = tree.iter(traversal);
        debug_assert_eq!(iter.size_hint(), (10, Some(10)));

        let head: Vec<u32> = iter.by_ref().take(3).copied().collect();
        debug_assert_eq!(head.len(), 3);
        debug_assert_eq!(iter.size_hint(), (7, Some(7)));
        drop(iter);

        let again: Vec<u32> = tree.iter(traversal).take(3).copied().collect();
        debug_assert_eq!(head, again);

        let mut iter = tree.iter(traversal);
        debug_assert_eq!(iter.by_ref().count(), 10);
        debug_assert_eq!(iter.next(), None);
        debug_assert_eq!(iter.next(), None);
    }

    let v: Vec<u32> = tree.level_order().take_while(|&&v| v != 3).copied().collect();
    debug_assert_eq!(v, vec![4, 2, 6, 1]);
}

#[test]
// An empty tree yields nothing in every order
fn test_iter_2() {
    let tree: RBTree<u32> = RBTree::default();

    debug_assert_eq!(tree.in_order().next(), None);
    debug_assert_eq!(tree.pre_order().next(), None);
    debug_assert_eq!(tree.post_order().next(), None);
    debug_assert_eq!(tree.level_order().next(), None);
    debug_assert_eq!(tree.iter(Traversal::InOrder).size_hint(), (0, Some(0)));
}

#[test]
// Every order visits every value once, after arbitrary inserts and deletes
fn test_iter_3() {
    use rand::prelude::*;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut tree = RBTree::default();
    for _ in 0..500 {
        let _ = tree.insert(rng.random_range(0..1000u32));
    }
    for _ in 0..250 {
        tree.delete(&rng.random_range(0..1000u32));
    }
    tree.check();

    let sorted: Vec<u32> = tree.in_order().copied().collect();
    debug_assert!(sorted.windows(2).all(|w| w[0] < w[1]));
    debug_assert_eq!(sorted.len(), tree.count());

    for traversal in [Traversal::PreOrder, Traversal::PostOrder, Traversal::LevelOrder] {
        let mut v: Vec<u32> = tree.iter(traversal).copied().collect();
        v.sort_unstable();
        debug_assert_eq!(v, sorted);
    }

    // Parents come before children in pre-order and after them in post-order
    let root = tree.structure().root();
    let top = *tree.value_at(root);
    debug_assert_eq!(tree.pre_order().next(), Some(&top));
    debug_assert_eq!(tree.post_order().last(), Some(&top));
    debug_assert_eq!(tree.level_order().next(), Some(&top));
}
