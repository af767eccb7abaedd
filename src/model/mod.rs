//! Data model for phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Vertex] values referenced by [VertexIndex]. Every vertex has the same
//! shape: an optional name, an optional confidence, an optional
//! [BranchLength] and an ordered list of children.
//!
//! Trees are typically constructed by the
//! [NewickParser](crate::newick::NewickParser) and mutated in place by the
//! [RelabelEngine](crate::relabel::RelabelEngine).

pub mod tree;
pub mod vertex;

pub use tree::{PreOrderIter, Tree, VertexIndex};
pub use vertex::{BranchLength, Vertex};
