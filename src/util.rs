//! Utility types to support self balancing binary red-black trees

#![warn(missing_docs)]

extern crate alloc;
use alloc::vec::Vec;

use core::{cmp::Ordering, fmt::Display};

//-----------------------------------------------------------------------------------------------//

/// The color of a leaf in a red-black tree
///
/// An absent leaf (`usize::MAX`) is always reported as `Black`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// A red leaf. Red leaves never have red children.
    Red,
    /// A black leaf. Every path from a leaf to an absent child crosses the same number of these.
    Black,
}

// A leaf in a red-black tree
#[derive(Clone)]
struct Leaf {
    parent: usize,
    left: usize,
    right: usize,
    color: Color,
}

//-----------------------------------------------------------------------------------------------//

/// A red-black tree of integer leaves
///
/// The tree only stores structure. Keys live outside the tree, typically in a vector indexed by
/// leaf, and are consulted through a `probe` closure that compares the sought key against the key
/// stored at a given leaf. The value `usize::MAX` (`!0`) is used throughout for "no leaf".
#[derive(Clone)]
pub struct Tree {
    leaf: Vec<Leaf>,
    root: usize,
    recycle: usize,
    count: usize,
}

impl Tree {
    /// Construct an empty tree
    pub fn new() -> Tree {
        Tree {
            leaf: Vec::new(),
            root: !0,
            recycle: !0,
            count: 0,
        }
    }

    /// Construct an empty tree, pre-allocating a given capacity
    pub fn with_capacity(capacity: usize) -> Tree {
        Tree {
            leaf: Vec::with_capacity(capacity),
            root: !0,
            recycle: !0,
            count: 0,
        }
    }

    /// Get the number of leaves in the tree
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Get the number of recycled leaves in the tree
    #[inline]
    pub fn recycle_count(&self) -> usize {
        self.leaf.len() - self.count
    }

    /// Get the current allocated size of the tree. This is the current `count` plus the
    /// `recycle_count`. Note that this is not necessarily the same as the allocated capacity.
    #[inline]
    pub fn allocated_count(&self) -> usize {
        self.leaf.len()
    }

    /// Remove all leaves from the tree
    pub fn clear(&mut self) {
        self.leaf.truncate(0);
        self.root = !0;
        self.recycle = !0;
        self.count = 0;
    }

    /// Check if the tree has no leaves
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Reserves capacity for at least `additional` more leaves
    ///
    /// Room that has been allocated then 'recycled' is subtracted from the `additional` requested.
    /// This function returns the total amount of additional element storage that was required
    /// (if any), so a caller can grow its own key storage by the same amount.
    pub fn reserve(&mut self, additional: usize) -> usize {
        let recycle_count = self.recycle_count();
        if additional > recycle_count {
            let required = additional - recycle_count;
            self.leaf.reserve(required);
            required
        } else {
            0
        }
    }

    /// Get the root leaf, or `usize::MAX` if the tree is empty
    #[inline]
    pub fn root(&self) -> usize {
        self.root
    }

    /// Get the parent of a leaf, or `usize::MAX` for the root
    #[inline]
    pub fn parent(&self, leaf: usize) -> usize {
        self.leaf[leaf].parent
    }

    /// Get the left child of a leaf, or `usize::MAX` if there is none
    #[inline]
    pub fn left(&self, leaf: usize) -> usize {
        self.leaf[leaf].left
    }

    /// Get the right child of a leaf, or `usize::MAX` if there is none
    #[inline]
    pub fn right(&self, leaf: usize) -> usize {
        self.leaf[leaf].right
    }

    /// Get the color of a leaf. `usize::MAX` is reported as `Black`.
    #[inline]
    pub fn color(&self, leaf: usize) -> Color {
        color(&self.leaf, leaf)
    }

    /// Get a leaf by probing
    ///
    /// `probe(leaf)` must return the ordering of the sought key relative to the key stored at
    /// `leaf`. If no leaf compares `Equal`, then `usize::MAX` is returned. If the keys are not
    /// sorted properly according to the binary tree, then the results are undefined.
    pub fn get<P>(&self, probe: P) -> usize
    where
        P: FnMut(usize) -> Ordering,
    {
        get(&self.leaf, self.root, probe)
    }

    /// Insert a leaf by probing
    ///
    /// On success the new leaf is returned as `Ok`. This may be a 'recycled' leaf that has
    /// previously been removed, or the next unused leaf in the ascending sequence, which is equal
    /// to `allocated_count()` before the call. The tree is rebalanced before returning.
    ///
    /// If a leaf compares `Equal`, nothing is changed and that leaf is returned as `Err`.
    pub fn insert<P>(&mut self, probe: P) -> Result<usize, usize>
    where
        P: FnMut(usize) -> Ordering,
    {
        let leaf = match locate(&self.leaf, self.root, probe) {
            Location::Found(leaf) => return Err(leaf),
            Location::Root => {
                // A lone black root satisfies every invariant, no fixup needed
                let leaf = self.alloc(!0, Color::Black);
                self.root = leaf;
                return Ok(leaf);
            }
            Location::Left(parent) => {
                let leaf = self.alloc(parent, Color::Red);
                self.leaf[parent].left = leaf;
                leaf
            }
            Location::Right(parent) => {
                let leaf = self.alloc(parent, Color::Red);
                self.leaf[parent].right = leaf;
                leaf
            }
        };

        self.insert_fixup(leaf);
        Ok(leaf)
    }

    /// Remove a leaf
    ///
    /// The leaf is unlinked, the tree rebalanced, and the leaf added to the 'recycle bin' for
    /// possible future reallocation. When the leaf has two children its in-order successor takes
    /// over its position and color; the successor keeps its own leaf number, so the positions of
    /// all other leaves in any external key storage stay valid.
    pub fn remove(&mut self, z: usize) {
        debug_assert!(!z != 0);

        let zl = self.leaf[z].left;
        let zr = self.leaf[z].right;

        // The leaf that moves into the gap, and its parent after the move. The leaf may be absent,
        // so its parent is tracked separately.
        let x;
        let x_parent;
        let removed;

        if !zl == 0 {
            removed = self.leaf[z].color;
            x = zr;
            x_parent = self.leaf[z].parent;
            self.transplant(z, zr);
        } else if !zr == 0 {
            removed = self.leaf[z].color;
            x = zl;
            x_parent = self.leaf[z].parent;
            self.transplant(z, zl);
        } else {
            let y = leftmost(&self.leaf, zr);
            removed = self.leaf[y].color;
            x = self.leaf[y].right;

            if y == zr {
                x_parent = y;
            } else {
                x_parent = self.leaf[y].parent;
                self.transplant(y, x);
                self.leaf[y].right = zr;
                self.leaf[zr].parent = y;
            }

            self.transplant(z, y);
            self.leaf[y].left = zl;
            self.leaf[zl].parent = y;
            self.leaf[y].color = self.leaf[z].color;
        }

        if removed == Color::Black {
            self.delete_fixup(x, x_parent);
        }

        self.free(z);
    }

    /// Get the first leaf in the tree
    #[inline]
    pub fn first(&self) -> usize {
        first(&self.leaf, self.root)
    }

    /// Get the last leaf in the tree
    #[inline]
    pub fn last(&self) -> usize {
        last(&self.leaf, self.root)
    }

    /// Get the previous leaf in the tree
    #[inline]
    pub fn prev(&self, leaf: usize) -> usize {
        prev(&self.leaf, leaf)
    }

    /// Get the next leaf in the tree
    #[inline]
    pub fn next(&self, leaf: usize) -> usize {
        next(&self.leaf, leaf)
    }

    // Allocate and initialise a new leaf
    fn alloc(&mut self, parent: usize, color: Color) -> usize {
        // Increase the leaf count
        self.count += 1;

        // Recycle an old leaf
        let leaf = self.recycle;
        if !leaf != 0 {
            let l = &mut self.leaf[leaf];
            self.recycle = l.parent;
            l.parent = parent;
            l.left = !0;
            l.right = !0;
            l.color = color;

            return leaf;
        }

        // Inititialise a new one
        let leaf = self.leaf.len();
        self.leaf.push(Leaf {
            parent,
            left: !0,
            right: !0,
            color,
        });

        leaf
    }

    // Free a leaf and add it to the recycle queue
    fn free(&mut self, leaf: usize) {
        self.count -= 1;

        let l = &mut self.leaf[leaf];
        l.parent = self.recycle;
        l.left = !0;
        l.right = !0;
        self.recycle = leaf;
    }

    // Replace the subtree rooted at `u` with the subtree rooted at `v` (which may be absent)
    fn transplant(&mut self, u: usize, v: usize) {
        let p = self.leaf[u].parent;
        if !p == 0 {
            self.root = v;
        } else if self.leaf[p].left == u {
            self.leaf[p].left = v;
        } else {
            debug_assert_eq!(self.leaf[p].right, u);
            self.leaf[p].right = v;
        }

        if !v != 0 {
            self.leaf[v].parent = p;
        }
    }

    // Rotate `x` down to the left, lifting its right child into its place
    fn rotate_left(&mut self, x: usize) {
        let y = self.leaf[x].right;
        if !y == 0 {
            panic!("red-black invariant violated: rotate left at leaf {x} with no right child");
        }
        log::trace!("rotate left at leaf {x}");

        let b = self.leaf[y].left;
        self.leaf[x].right = b;
        if !b != 0 {
            self.leaf[b].parent = x;
        }

        let p = self.leaf[x].parent;
        self.leaf[y].parent = p;
        if !p == 0 {
            self.root = y;
        } else if self.leaf[p].left == x {
            self.leaf[p].left = y;
        } else {
            self.leaf[p].right = y;
        }

        self.leaf[y].left = x;
        self.leaf[x].parent = y;
    }

    // Rotate `x` down to the right, lifting its left child into its place
    fn rotate_right(&mut self, x: usize) {
        let y = self.leaf[x].left;
        if !y == 0 {
            panic!("red-black invariant violated: rotate right at leaf {x} with no left child");
        }
        log::trace!("rotate right at leaf {x}");

        let b = self.leaf[y].right;
        self.leaf[x].left = b;
        if !b != 0 {
            self.leaf[b].parent = x;
        }

        let p = self.leaf[x].parent;
        self.leaf[y].parent = p;
        if !p == 0 {
            self.root = y;
        } else if self.leaf[p].right == x {
            self.leaf[p].right = y;
        } else {
            self.leaf[p].left = y;
        }

        self.leaf[y].right = x;
        self.leaf[x].parent = y;
    }

    // Restore the red-black properties after attaching the red leaf `z`
    fn insert_fixup(&mut self, mut z: usize) {
        loop {
            let mut p = self.leaf[z].parent;
            if color(&self.leaf, p) == Color::Black {
                break;
            }

            // A red parent is never the root, so the grandparent exists
            let g = self.leaf[p].parent;
            debug_assert!(!g != 0);

            if self.leaf[g].left == p {
                let u = self.leaf[g].right;
                if color(&self.leaf, u) == Color::Red {
                    self.leaf[p].color = Color::Black;
                    self.leaf[u].color = Color::Black;
                    self.leaf[g].color = Color::Red;
                    z = g;
                    continue;
                }

                // Triangle, straighten into a line
                if self.leaf[p].right == z {
                    self.rotate_left(p);
                    z = p;
                    p = self.leaf[z].parent;
                }

                // Line
                self.leaf[p].color = Color::Black;
                self.leaf[g].color = Color::Red;
                self.rotate_right(g);
            } else {
                let u = self.leaf[g].left;
                if color(&self.leaf, u) == Color::Red {
                    self.leaf[p].color = Color::Black;
                    self.leaf[u].color = Color::Black;
                    self.leaf[g].color = Color::Red;
                    z = g;
                    continue;
                }

                if self.leaf[p].left == z {
                    self.rotate_right(p);
                    z = p;
                    p = self.leaf[z].parent;
                }

                self.leaf[p].color = Color::Black;
                self.leaf[g].color = Color::Red;
                self.rotate_left(g);
            }
        }

        let root = self.root;
        self.leaf[root].color = Color::Black;
    }

    // Restore black heights after a black leaf was removed from above `x`
    //
    // `x` may be absent, in which case `parent` says where it hangs.
    fn delete_fixup(&mut self, mut x: usize, mut parent: usize) {
        while x != self.root && color(&self.leaf, x) == Color::Black {
            debug_assert!(!parent != 0);

            if self.leaf[parent].left == x {
                let mut w = self.leaf[parent].right;

                // Case 1: red sibling, rotate it above the parent
                if color(&self.leaf, w) == Color::Red {
                    self.leaf[w].color = Color::Black;
                    self.leaf[parent].color = Color::Red;
                    self.rotate_left(parent);
                    w = self.leaf[parent].right;
                }

                // The black deficit on `x`'s side means the sibling cannot be absent
                debug_assert!(!w != 0);

                let wl = self.leaf[w].left;
                let wr = self.leaf[w].right;
                if color(&self.leaf, wl) == Color::Black && color(&self.leaf, wr) == Color::Black {
                    // Case 2: push the deficit upwards
                    self.leaf[w].color = Color::Red;
                    x = parent;
                    parent = self.leaf[x].parent;
                } else {
                    // Case 3: near child red, far child black
                    if color(&self.leaf, wr) == Color::Black {
                        self.leaf[wl].color = Color::Black;
                        self.leaf[w].color = Color::Red;
                        self.rotate_right(w);
                        w = self.leaf[parent].right;
                    }

                    // Case 4: far child red
                    self.leaf[w].color = self.leaf[parent].color;
                    self.leaf[parent].color = Color::Black;
                    let wr = self.leaf[w].right;
                    self.leaf[wr].color = Color::Black;
                    self.rotate_left(parent);
                    x = self.root;
                    parent = !0;
                }
            } else {
                let mut w = self.leaf[parent].left;

                if color(&self.leaf, w) == Color::Red {
                    self.leaf[w].color = Color::Black;
                    self.leaf[parent].color = Color::Red;
                    self.rotate_right(parent);
                    w = self.leaf[parent].left;
                }

                debug_assert!(!w != 0);

                let wl = self.leaf[w].left;
                let wr = self.leaf[w].right;
                if color(&self.leaf, wl) == Color::Black && color(&self.leaf, wr) == Color::Black {
                    self.leaf[w].color = Color::Red;
                    x = parent;
                    parent = self.leaf[x].parent;
                } else {
                    if color(&self.leaf, wl) == Color::Black {
                        self.leaf[wr].color = Color::Black;
                        self.leaf[w].color = Color::Red;
                        self.rotate_left(w);
                        w = self.leaf[parent].left;
                    }

                    self.leaf[w].color = self.leaf[parent].color;
                    self.leaf[parent].color = Color::Black;
                    let wl = self.leaf[w].left;
                    self.leaf[wl].color = Color::Black;
                    self.rotate_right(parent);
                    x = self.root;
                    parent = !0;
                }
            }
        }

        if !x != 0 {
            self.leaf[x].color = Color::Black;
        }
    }

    // Test support: check links, colors, black heights and counts, returning the black height
    #[cfg(test)]
    pub(crate) fn check(&self) -> usize {
        check_count(&self.leaf, self.root, self.count);
        check_tree(&self.leaf, self.root)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[ ")?;
        let mut leaf = self.first();
        while !leaf != 0 {
            match self.leaf[leaf].color {
                Color::Red => write!(f, "{leaf}r ")?,
                Color::Black => write!(f, "{leaf}b ")?,
            }
            leaf = self.next(leaf);
        }
        write!(f, "]")?;
        Ok(())
    }
}

//-----------------------------------------------------------------------------------------------//

// IMPLEMENTATION NOTE
//
// The functions below are low level. They are not 'unsafe' in the Rust sense, but they implement
// very low level operations. Use with caution.

enum Location {
    Found(usize),
    Root,
    Left(usize),
    Right(usize),
}

// Color of a leaf, where the absent leaf is black
#[inline]
fn color(leaf: &[Leaf], x: usize) -> Color {
    if !x == 0 {
        Color::Black
    } else {
        leaf[x].color
    }
}

// Get a leaf in a tree
fn get<P>(leaf: &[Leaf], mut x: usize, mut probe: P) -> usize
where
    P: FnMut(usize) -> Ordering,
{
    // `x` should be a root
    debug_assert!(!x == 0 || leaf[x].parent == !0);

    loop {
        if !x == 0 {
            return !0;
        }

        match probe(x) {
            Ordering::Equal => return x,
            Ordering::Less => x = leaf[x].left,
            Ordering::Greater => x = leaf[x].right,
        }
    }
}

// Locate a leaf in a tree, or if not found identify where to insert it
fn locate<P>(leaf: &[Leaf], mut x: usize, mut probe: P) -> Location
where
    P: FnMut(usize) -> Ordering,
{
    // `x` should be a root
    debug_assert!(!x == 0 || leaf[x].parent == !0);

    // First leaf is a special case
    if !x == 0 {
        return Location::Root;
    }

    loop {
        match probe(x) {
            Ordering::Equal => return Location::Found(x),
            Ordering::Less => {
                let y = leaf[x].left;
                if !y == 0 {
                    return Location::Left(x);
                }
                x = y;
            }
            Ordering::Greater => {
                let y = leaf[x].right;
                if !y == 0 {
                    return Location::Right(x);
                }
                x = y;
            }
        }
    }
}

// Get the left-most leaf below `x` (inclusive)
fn leftmost(leaf: &[Leaf], mut x: usize) -> usize {
    loop {
        let y = leaf[x].left;
        if !y == 0 {
            return x;
        }
        x = y;
    }
}

// Get the right-most leaf below `x` (inclusive)
fn rightmost(leaf: &[Leaf], mut x: usize) -> usize {
    loop {
        let y = leaf[x].right;
        if !y == 0 {
            return x;
        }
        x = y;
    }
}

// Get the first leaf (the left-most)
fn first(leaf: &[Leaf], x: usize) -> usize {
    // `x` should be a root
    debug_assert!(!x == 0 || leaf[x].parent == !0);

    if !x == 0 {
        return !0;
    }
    leftmost(leaf, x)
}

// Get the last leaf (the right-most)
fn last(leaf: &[Leaf], x: usize) -> usize {
    // `x` should be a root
    debug_assert!(!x == 0 || leaf[x].parent == !0);

    if !x == 0 {
        return !0;
    }
    rightmost(leaf, x)
}

// Get the logical predecessor to a leaf
fn prev(leaf: &[Leaf], mut x: usize) -> usize {
    let y = leaf[x].left;
    if !y != 0 {
        return rightmost(leaf, y);
    }

    loop {
        let y = leaf[x].parent;
        if !y == 0 {
            return !0;
        }
        if leaf[y].right == x {
            return y;
        }
        debug_assert_eq!(leaf[y].left, x);
        x = y;
    }
}

// Get the logical successor to a leaf
fn next(leaf: &[Leaf], mut x: usize) -> usize {
    let y = leaf[x].right;
    if !y != 0 {
        return leftmost(leaf, y);
    }

    loop {
        let y = leaf[x].parent;
        if !y == 0 {
            return !0;
        }
        if leaf[y].left == x {
            return y;
        }
        debug_assert_eq!(leaf[y].right, x);
        x = y;
    }
}

//-----------------------------------------------------------------------------------------------//

// TEST : Check the tree structure, returning the black height of the root
#[cfg(test)]
fn check_tree(leaf: &[Leaf], root: usize) -> usize {
    assert_eq!(color(leaf, root), Color::Black, "root must be black");
    assert!(!root == 0 || leaf[root].parent == !0);

    check_subtree(leaf, root)
}

// TEST : Check links and colors below `x`, returning its black height
#[cfg(test)]
fn check_subtree(leaf: &[Leaf], x: usize) -> usize {
    if !x == 0 {
        return 1;
    }

    let y = leaf[x].left;
    let z = leaf[x].right;

    for c in [y, z] {
        if !c != 0 {
            assert_eq!(x, leaf[c].parent, "child {c} does not point back to {x}");
            if leaf[x].color == Color::Red {
                assert_eq!(leaf[c].color, Color::Black, "red leaf {x} has red child {c}");
            }
        }
    }

    let hl = check_subtree(leaf, y);
    let hr = check_subtree(leaf, z);
    assert_eq!(hl, hr, "black height differs below leaf {x}");

    match leaf[x].color {
        Color::Black => hl + 1,
        Color::Red => hl,
    }
}

// TEST : Check the leaf counts, walking both directions
#[cfg(test)]
fn check_count(leaf: &[Leaf], root: usize, count: usize) {
    let mut x = first(leaf, root);
    let mut count_f = 0;
    while !x != 0 {
        count_f += 1;
        x = next(leaf, x);
    }

    x = last(leaf, root);
    let mut count_b = 0;
    while !x != 0 {
        count_b += 1;
        x = prev(leaf, x);
    }

    assert_eq!(count_f, count_b);
    assert_eq!(count_f, count);
}

//-----------------------------------------------------------------------------------------------//

#[test]
// Leaves inserted in ascending order stay balanced and in sequence
fn test_util_0() {
    let mut keys: Vec<u32> = Vec::new();
    let mut tree = Tree::new();

    for key in 0..100u32 {
        let leaf = tree.insert(|l| key.cmp(&keys[l])).unwrap();
        debug_assert_eq!(leaf, keys.len());
        keys.push(key);
        tree.check();
    }

    let mut leaf = tree.first();
    let mut expect = 0;
    while !leaf != 0 {
        debug_assert_eq!(keys[leaf], expect);
        expect += 1;
        leaf = tree.next(leaf);
    }
    debug_assert_eq!(expect, 100);

    // 100 keys need a height of at most 2 * log2(101)
    debug_assert!(tree.check() <= 8);
}

#[test]
// Duplicate probes are rejected without changing the tree
fn test_util_1() {
    let keys = [10u32, 5, 15];
    let mut tree = Tree::new();
    for key in keys {
        tree.insert(|l| key.cmp(&keys[l])).unwrap();
    }

    debug_assert_eq!(tree.insert(|l| 5u32.cmp(&keys[l])), Err(1));
    debug_assert_eq!(tree.count(), 3);
    debug_assert_eq!(tree.allocated_count(), 3);
    tree.check();

    debug_assert_eq!(alloc::format!("{tree}"), "[ 1r 0b 2r ]");
}

#[test]
// Removed leaves are recycled before new ones are allocated
fn test_util_2() {
    let mut keys: Vec<u32> = Vec::new();
    let mut tree = Tree::new();
    for key in 0..8u32 {
        tree.insert(|l| key.cmp(&keys[l])).unwrap();
        keys.push(key);
    }

    let leaf = tree.get(|l| 3u32.cmp(&keys[l]));
    debug_assert_eq!(leaf, 3);
    tree.remove(leaf);
    tree.check();
    debug_assert_eq!(tree.recycle_count(), 1);
    debug_assert_eq!(tree.get(|l| 3u32.cmp(&keys[l])), !0);

    keys[3] = 100;
    let leaf = tree.insert(|l| 100u32.cmp(&keys[l])).unwrap();
    debug_assert_eq!(leaf, 3);
    debug_assert_eq!(tree.recycle_count(), 0);
    debug_assert_eq!(tree.last(), 3);
    tree.check();
}

#[test]
// Removing a leaf with two children keeps the successor's leaf number
fn test_util_3() {
    let keys = [4u32, 2, 6, 1, 3, 5, 7];
    let mut tree = Tree::new();
    for key in keys {
        tree.insert(|l| key.cmp(&keys[l])).unwrap();
    }

    // Remove 4 (the root, leaf 0); its successor 5 lives in leaf 5
    let root = tree.root();
    debug_assert_eq!(root, 0);
    tree.remove(root);
    tree.check();

    debug_assert_eq!(tree.root(), 5);
    debug_assert_eq!(keys[tree.root()], 5);
    debug_assert_eq!(tree.prev(5), 4);
    debug_assert_eq!(tree.next(5), 2);
}

#[test]
#[should_panic(expected = "red-black invariant violated")]
// Rotating around a missing child is a fatal error
fn test_util_4() {
    let keys = [1u32];
    let mut tree = Tree::new();
    tree.insert(|l| 1u32.cmp(&keys[l])).unwrap();
    tree.rotate_left(0);
}

#[test]
// A shuffled stress test of inserts and removals
fn test_util_5() {
    use rand::prelude::*;

    const COUNT: usize = 2000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut order: Vec<usize> = (0..COUNT).collect();
    order.shuffle(&mut rng);

    let mut keys: Vec<usize> = Vec::new();
    let mut tree = Tree::new();
    for &key in &order {
        let leaf = tree.insert(|l| key.cmp(&keys[l])).unwrap();
        debug_assert_eq!(leaf, keys.len());
        keys.push(key);
    }
    tree.check();

    order.shuffle(&mut rng);
    for (n, &key) in order.iter().enumerate() {
        let leaf = tree.get(|l| key.cmp(&keys[l]));
        debug_assert_ne!(leaf, !0);
        tree.remove(leaf);
        if n % 97 == 0 {
            tree.check();
        }
    }

    tree.check();
    debug_assert!(tree.is_empty());
    debug_assert_eq!(tree.root(), !0);
    debug_assert_eq!(tree.recycle_count(), COUNT);
}
