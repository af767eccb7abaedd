//! Provides the arena-based tree representation.
//!
//! * [Tree] - Tree structure using the arena pattern
//! * [VertexIndex] - Type used to index vertices in a tree
//! * [PreOrderIter] - Depth-first iterator over vertices

use crate::model::vertex::{BranchLength, Vertex};
use std::ops::{Index, IndexMut};

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. This avoids reference juggling when vertices are mutated
/// during a traversal.
///
/// # Structure
/// - All vertices are stored in the arena, the index of the root is kept.
/// - No assumption on order of indices is maintained,
///   though the parser adds vertices bottom-up.
/// - Vertices may have any number of children (polytomies are fine).
///
/// # Construction
/// Add vertices bottom-up with [`add_leaf`](Self::add_leaf) and
/// [`add_internal`](Self::add_internal), then mark the root with
/// [`set_root`](Self::set_root). Test validity with [`Tree::is_valid()`].
#[derive(Debug, Clone, Default)]
pub struct Tree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: Option<VertexIndex>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        Tree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: None,
        }
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `branch_length` - Length of incoming branch
    pub fn add_leaf(&mut self, branch_length: Option<BranchLength>) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new(index, Vec::new(), branch_length));
        index
    }

    /// Adds an internal vertex to the tree, assigning a unique index, which gets returned.
    ///
    /// The parent of each child is set to the new vertex.
    ///
    /// # Arguments
    /// * `children` - Child indices, in input order
    /// * `branch_length` - Length of incoming branch
    ///
    /// # Panics
    /// Panics if any child index is out of bounds.
    pub fn add_internal(
        &mut self,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self[child].set_parent(index);
        }
        self.vertices.push(Vertex::new(index, children, branch_length));
        index
    }

    /// Marks the vertex at `index` as root of this tree.
    pub fn set_root(&mut self, index: VertexIndex) {
        self.root_index = Some(index);
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index.is_some()
    }

    /// Returns the index of the root, or an out-of-bounds index if it
    /// hasn't been set yet.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index.unwrap_or(NO_ROOT_SET_INDEX)
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index()]
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns a mutable reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex_mut(&mut self, index: VertexIndex) -> &mut Vertex {
        &mut self[index]
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of non-leaf vertices in this tree (root included).
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|v| !v.is_leaf()).count()
    }

    /// Returns an iterator over all vertices in pre-order,
    /// children visited in input order.
    ///
    /// Yields nothing if the root is not set.
    pub fn pre_order(&self) -> PreOrderIter<'_> {
        PreOrderIter {
            tree: self,
            stack: self.root_index.into_iter().collect(),
        }
    }

    /// Returns the names of all leaves in pre-order.
    pub fn leaf_names(&self) -> Vec<Option<&str>> {
        self.pre_order()
            .filter(|v| v.is_leaf())
            .map(|v| v.name())
            .collect()
    }

    /// Returns `true` if any vertex still carries a confidence value.
    pub fn has_confidences(&self) -> bool {
        self.vertices.iter().any(|v| v.confidence().is_some())
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is set, valid, and the root has no parent
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - Every vertex is reachable from the root exactly once
    pub fn is_valid(&self) -> bool {
        let Some(root_index) = self.root_index else {
            return false;
        };
        if root_index >= self.vertices.len() || self.vertices[root_index].parent().is_some() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }
            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return false;
                }
            }
        }

        let mut seen = vec![false; self.vertices.len()];
        for vertex in self.pre_order() {
            if seen[vertex.index()] {
                return false;
            }
            seen[vertex.index()] = true;
        }

        seen.into_iter().all(|s| s)
    }
}

impl Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl IndexMut<VertexIndex> for Tree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// =#========================================================================#=
// PRE-ORDER ITERATOR
// =#========================================================================#=
/// Depth-first pre-order iterator over the vertices of a [Tree].
///
/// Uses an explicit stack, so arbitrarily deep trees do not exhaust the call stack.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<VertexIndex>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];
        // Reverse, so that the first child is popped next
        self.stack.extend(vertex.children().iter().rev());
        Some(vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_small_tree() -> Tree {
        // ((A,B),C);
        let mut tree = Tree::with_capacity(5);
        let a = tree.add_leaf(Some(BranchLength::new(1.0)));
        tree[a].set_name("A");
        let b = tree.add_leaf(None);
        tree[b].set_name("B");
        let ab = tree.add_internal(vec![a, b], Some(BranchLength::new(0.5)));
        let c = tree.add_leaf(None);
        tree[c].set_name("C");
        let root = tree.add_internal(vec![ab, c], None);
        tree.set_root(root);
        tree
    }

    #[test]
    fn test_counts_and_parents() {
        let tree = build_small_tree();
        assert_eq!(tree.num_vertices(), 5);
        assert_eq!(tree.num_leaves(), 3);
        assert_eq!(tree.num_internal(), 2);
        assert_eq!(tree[0].parent(), Some(2));
        assert_eq!(tree.root().parent(), None);
        assert!(tree.is_valid());
    }

    #[test]
    fn test_pre_order_follows_input_order() {
        let tree = build_small_tree();
        let order: Vec<VertexIndex> = tree.pre_order().map(|v| v.index()).collect();
        assert_eq!(order, vec![4, 2, 0, 1, 3]);
        assert_eq!(tree.leaf_names(), vec![Some("A"), Some("B"), Some("C")]);
    }

    #[test]
    fn test_tree_without_root_is_invalid() {
        let mut tree = Tree::new();
        tree.add_leaf(None);
        assert!(!tree.is_valid());
        assert_eq!(tree.pre_order().count(), 0);
    }
}
