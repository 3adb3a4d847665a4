//! Graphviz rendering of an `RBTree`, for diagnostics

extern crate alloc;

use alloc::vec::Vec;
use compact_str::CompactString;
use core::{
    cmp::Ordering,
    fmt::{self, Display, Write},
};

use crate::{tree::RBTree, util::Color};

/// A `Display` adapter that renders a tree as a Graphviz `digraph`.
///
/// Each value becomes a circle labelled with the value and colored with the node's color, with an
/// edge from every parent to each of its children. The output reflects the tree at the time it is
/// formatted and is not meant to be parsed back.
pub struct Dot<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    rbtree: &'a RBTree<T, F>,
}

impl<'a, T, F> Dot<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub(crate) fn new(rbtree: &'a RBTree<T, F>) -> Self {
        Dot { rbtree }
    }
}

impl<T, F> Display for Dot<'_, T, F>
where
    T: Display,
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.rbtree.structure();

        writeln!(f, "digraph RBTree {{")?;
        writeln!(f, "  node [shape = circle];")?;

        let mut label = CompactString::default();
        let mut stack = Vec::new();
        if !tree.root() != 0 {
            stack.push(tree.root());
        }

        while let Some(leaf) = stack.pop() {
            // Render the value first so quotes can be escaped
            label.clear();
            write!(label, "{}", self.rbtree.value_at(leaf))?;

            write!(f, "  \"n{leaf}\" [label = \"")?;
            for c in label.chars() {
                if c == '"' || c == '\\' {
                    f.write_char('\\')?;
                }
                f.write_char(c)?;
            }
            let color = match tree.color(leaf) {
                Color::Red => "red",
                Color::Black => "black",
            };
            writeln!(f, "\", color={color}];")?;

            let left = tree.left(leaf);
            let right = tree.right(leaf);
            for child in [left, right] {
                if !child != 0 {
                    writeln!(f, "  \"n{leaf}\" -> \"n{child}\";")?;
                }
            }

            if !right != 0 {
                stack.push(right);
            }
            if !left != 0 {
                stack.push(left);
            }
        }

        writeln!(f, "}}")
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
// A small tree renders nodes, colors and edges
fn test_dot_0() {
    use alloc::string::ToString;

    let mut tree = RBTree::default();
    for v in [1, 2, 3] {
        tree.insert(v).unwrap();
    }

    debug_assert_eq!(
        tree.dot().to_string(),
        "digraph RBTree {\n\
         \x20 node [shape = circle];\n\
         \x20 \"n1\" [label = \"2\", color=black];\n\
         \x20 \"n1\" -> \"n0\";\n\
         \x20 \"n1\" -> \"n2\";\n\
         \x20 \"n0\" [label = \"1\", color=red];\n\
         \x20 \"n2\" [label = \"3\", color=red];\n\
         }\n"
    );
}

#[test]
// Empty trees render an empty graph, and labels are escaped
fn test_dot_1() {
    use alloc::string::{String, ToString};

    let mut tree: RBTree<String> = RBTree::default();
    debug_assert_eq!(
        tree.dot().to_string(),
        "digraph RBTree {\n  node [shape = circle];\n}\n"
    );

    tree.insert(String::from("say \"hi\"")).unwrap();
    let dot = tree.dot().to_string();
    debug_assert!(dot.contains("[label = \"say \\\"hi\\\"\", color=black];"));
}
