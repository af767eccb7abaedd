//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;
use std::fmt;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (clade) in a phylogenetic tree.
///
/// A vertex is a leaf if it has no children. Any vertex, leaf or not, may
/// carry a `name` and/or a numeric `confidence` (branch support), and any
/// non-root vertex may carry a [BranchLength].
///
/// # Invariants
/// - `index` is the position of the vertex in the tree arena
/// - `children` are kept in the order they appear in the Newick string
/// - `parent` is `None` for the root and during construction only
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: VertexIndex,
    /// Index of the parent vertex
    parent: Option<VertexIndex>,
    /// Indices of the child vertices, in input order
    children: Vec<VertexIndex>,
    /// Textual label of the vertex
    name: Option<String>,
    /// Branch support value
    confidence: Option<f64>,
    /// Distance to parent vertex
    branch_length: Option<BranchLength>,
}

impl Vertex {
    /// Creates a new vertex without parent, name or confidence.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Child indices, empty for a leaf
    /// * `branch_length` - Distance to parent vertex
    pub fn new(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex {
            index,
            parent: None,
            children,
            name: None,
            confidence: None,
            branch_length,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    /// Sets the parent of this vertex.
    pub(crate) fn set_parent(&mut self, parent: VertexIndex) {
        self.parent = Some(parent);
    }

    /// Returns the children of this vertex in input order.
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns `true` if this vertex has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` if the vertex has a name with at least one character.
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.is_empty())
    }

    /// Sets the name of this vertex.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Returns the confidence (branch support), if set.
    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    /// Sets the confidence of this vertex.
    pub fn set_confidence(&mut self, confidence: f64) {
        self.confidence = Some(confidence);
    }

    /// Removes and returns the confidence of this vertex.
    pub fn take_confidence(&mut self) -> Option<f64> {
        self.confidence.take()
    }

    /// Returns the branch length, if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced finite.
///
/// Negative values are allowed, since distance methods such as
/// neighbour joining produce them and the relabeling must not touch them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is not finite.
    pub fn new(length: f64) -> Self {
        assert!(length.is_finite(), "Branch length must be finite, got {}", length);
        BranchLength(length)
    }

    /// Creates a new branch length, or `None` if `length` is not finite.
    pub fn try_new(length: f64) -> Option<Self> {
        length.is_finite().then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
