//! Newick format serialization of [Tree]s.

use crate::model::{Tree, Vertex, VertexIndex};
use crate::newick::defs::BUFFER_CHARS;
use crate::parser::utils::escape_label;
use std::io::{self, Write};
use tracing::warn;

/// Writes the given trees in Newick format, one tree per line.
///
/// Each tree is written as a complete Newick string followed by a newline.
/// The writer is flushed at the end.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_newick<W: Write>(writer: &mut W, trees: &[Tree]) -> io::Result<()> {
    for tree in trees {
        writer.write_all(to_newick(tree).as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Returns the Newick representation of a tree with closing semicolon.
///
/// Per vertex, the label slot holds the (escaped) name, or the confidence
/// if there is no name. A confidence next to a name is written in the
/// double-colon position `name:confidence:branch_length`, which needs a
/// branch length; without one the confidence is dropped with a warning.
///
/// # Example
/// ```
/// use newick_relabel::newick::{parse_str, to_newick};
///
/// let tree = parse_str("('Homo sapiens':0.1,Pan:0.2)95;").unwrap();
/// assert_eq!(to_newick(&tree), "('Homo sapiens':0.1,Pan:0.2)95;");
/// ```
pub fn to_newick(tree: &Tree) -> String {
    let mut newick = String::with_capacity(estimate_newick_len(tree));
    if tree.is_root_set() {
        build_newick(tree, &mut newick, tree.root_index());
    }
    newick.push(';');
    newick
}

/// Pending work while building a Newick string.
enum Frame {
    /// Write the subtree of this vertex
    Enter(VertexIndex),
    /// Write `,` between two siblings
    Separator,
    /// Close the children of this vertex and write its label
    Exit(VertexIndex),
}

// Builds the Newick string with an explicit stack of frames
fn build_newick(tree: &Tree, newick: &mut String, root: VertexIndex) {
    let mut stack = vec![Frame::Enter(root)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(index) => {
                let vertex = &tree[index];
                if vertex.is_leaf() {
                    push_label_and_lengths(newick, vertex);
                    continue;
                }
                newick.push('(');
                stack.push(Frame::Exit(index));
                // Reverse, so that the first child is popped next
                for (i, &child) in vertex.children().iter().enumerate().rev() {
                    stack.push(Frame::Enter(child));
                    if i > 0 {
                        stack.push(Frame::Separator);
                    }
                }
            }
            Frame::Separator => newick.push(','),
            Frame::Exit(index) => {
                newick.push(')');
                push_label_and_lengths(newick, &tree[index]);
            }
        }
    }
}

fn push_label_and_lengths(newick: &mut String, vertex: &Vertex) {
    match (vertex.name(), vertex.confidence()) {
        (Some(name), Some(confidence)) => {
            newick.push_str(&escape_label(name));
            if vertex.branch_length().is_some() {
                newick.push(':');
                newick.push_str(&confidence.to_string());
            } else {
                warn!(
                    name,
                    confidence, "confidence next to a name without branch length is not written"
                );
            }
        }
        (Some(name), None) => newick.push_str(&escape_label(name)),
        (None, Some(confidence)) => newick.push_str(&confidence.to_string()),
        (None, None) => {}
    }

    if let Some(branch_length) = vertex.branch_length() {
        newick.push(':');
        newick.push_str(&branch_length.to_string());
    }
}

/// Estimates the length of a Newick string for a given tree,
/// to pre-allocate string capacity.
pub(crate) fn estimate_newick_len(tree: &Tree) -> usize {
    // Per vertex: separator or parentheses ~= 2 chars
    const STRUCTURE_CHARS: usize = 2;
    // Branch lengths: ~10 chars each (e.g., ":0.0095299")
    const BRANCH_LENGTH_CHARS: usize = 10;

    tree.pre_order()
        .map(|v| {
            let label_len = v.name().map_or(0, |name| name.len() + 2);
            let branch_len = if v.branch_length().is_some() { BRANCH_LENGTH_CHARS } else { 0 };
            STRUCTURE_CHARS + label_len + branch_len
        })
        .sum::<usize>()
        + BUFFER_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BranchLength;

    #[test]
    fn test_name_and_confidence_with_branch_length_use_double_colon() {
        let mut tree = Tree::new();
        let a = tree.add_leaf(None);
        tree[a].set_name("A");
        let b = tree.add_leaf(None);
        tree[b].set_name("B");
        let ab = tree.add_internal(vec![a, b], Some(BranchLength::new(0.3)));
        tree[ab].set_name("X");
        tree[ab].set_confidence(0.9);
        let c = tree.add_leaf(None);
        tree[c].set_name("C");
        let root = tree.add_internal(vec![ab, c], None);
        tree.set_root(root);

        assert_eq!(to_newick(&tree), "((A,B)X:0.9:0.3,C);");
    }

    #[test]
    fn test_write_newick_one_tree_per_line() {
        let trees = vec![
            crate::newick::parse_str("(A,B);").unwrap(),
            crate::newick::parse_str("(C,(D,E));").unwrap(),
        ];
        let mut out = Vec::new();
        write_newick(&mut out, &trees).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(A,B);\n(C,(D,E));\n");
    }

    #[test]
    fn test_estimate_is_at_least_output_length_for_plain_tree() {
        let tree = crate::newick::parse_str("((A:1,B:2):3,C:4);").unwrap();
        assert!(estimate_newick_len(&tree) >= to_newick(&tree).len());
    }
}
