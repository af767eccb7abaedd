//! The relabeling traversal.
//!
//! Every vertex is visited once in pre-order and handled as follows:
//! 1. A vertex with a name gets it looked up in the [MappingTable]. On a hit
//!    the name is replaced and the code's count goes up, on a miss the name
//!    is kept and the code is registered with count 0. A confidence next to
//!    the name is an anomaly: it is logged and discarded.
//! 2. A vertex with only a confidence gets the confidence moved into the name
//!    slot as decimal string. Tree viewers such as TreeGraph cannot read
//!    support values written behind a colon, so they have to travel as labels.
//!    No lookup is done for these synthetic names.
//! 3. A vertex with neither is left alone.
//!
//! After a traversal no vertex of the tree carries a confidence.

use crate::model::{Tree, Vertex};
use crate::relabel::mapping::MappingTable;
use crate::relabel::stats::UsageStats;
use tracing::{debug, trace, warn};

/// Counters of what a [RelabelEngine] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelabelSummary {
    /// Number of trees traversed
    pub trees: usize,
    /// Number of vertices visited
    pub vertices_visited: usize,
    /// Names replaced from the mapping table
    pub names_mapped: usize,
    /// Names kept because they have no mapping
    pub names_unmapped: usize,
    /// Confidences moved into the name slot
    pub confidences_moved: usize,
    /// Vertices that had both a name and a confidence
    pub anomalies: usize,
}

// =#========================================================================#=
// RELABEL ENGINE
// =#========================================================================#=
/// Rewrites vertex labels of trees using a [MappingTable] and accumulates
/// [UsageStats] across all trees of a run.
///
/// # Example
/// ```
/// use newick_relabel::newick::{parse_str, to_newick};
/// use newick_relabel::relabel::{MappingTable, RelabelEngine};
///
/// let table = MappingTable::load("A,Alpha\nB,Beta\n".as_bytes()).unwrap();
/// let mut tree = parse_str("(A:0.1,B:0.2)C;").unwrap();
///
/// let mut engine = RelabelEngine::new(&table);
/// engine.relabel_tree(&mut tree);
///
/// assert_eq!(to_newick(&tree), "(Alpha:0.1,Beta:0.2)C;");
/// assert_eq!(engine.stats().count("A"), Some(1));
/// assert_eq!(engine.stats().count("C"), Some(0));
/// ```
#[derive(Debug)]
pub struct RelabelEngine<'a> {
    table: &'a MappingTable,
    stats: UsageStats,
    summary: RelabelSummary,
}

impl<'a> RelabelEngine<'a> {
    /// Creates an engine with empty stats, so only names found in the
    /// trees are registered.
    pub fn new(table: &'a MappingTable) -> Self {
        Self::with_stats(table, UsageStats::new())
    }

    /// Creates an engine that accumulates into the given stats,
    /// e.g. [`UsageStats::seeded`].
    pub fn with_stats(table: &'a MappingTable, stats: UsageStats) -> Self {
        RelabelEngine {
            table,
            stats,
            summary: RelabelSummary::default(),
        }
    }

    /// Relabels all trees in order.
    pub fn relabel_trees(&mut self, trees: &mut [Tree]) {
        for tree in trees.iter_mut() {
            self.relabel_tree(tree);
        }
    }

    /// Relabels every vertex of `tree` in pre-order.
    ///
    /// Uses an explicit stack, so deep (caterpillar) trees are fine.
    /// Does nothing for a tree without root.
    pub fn relabel_tree(&mut self, tree: &mut Tree) {
        self.summary.trees += 1;
        if !tree.is_root_set() {
            return;
        }

        let visited_before = self.summary.vertices_visited;
        let mut stack = vec![tree.root_index()];
        while let Some(index) = stack.pop() {
            self.relabel_vertex(tree.vertex_mut(index));
            // Reverse, so that the first child is handled next
            stack.extend(tree[index].children().iter().rev());
        }

        debug!(
            tree = self.summary.trees,
            vertices = self.summary.vertices_visited - visited_before,
            "tree relabeled"
        );
    }

    fn relabel_vertex(&mut self, vertex: &mut Vertex) {
        self.summary.vertices_visited += 1;

        let name = vertex.name().filter(|name| !name.is_empty()).map(str::to_owned);
        if let Some(original) = name {
            if let Some(confidence) = vertex.take_confidence() {
                warn!(
                    name = %original,
                    confidence,
                    "vertex has a name and a confidence, confidence discarded"
                );
                self.summary.anomalies += 1;
            }

            match self.table.lookup(&original) {
                Some(mapped) => {
                    trace!(code = %original, name = mapped, "relabeled");
                    vertex.set_name(mapped);
                    self.stats.record_hit(&original);
                    self.summary.names_mapped += 1;
                }
                None => {
                    self.stats.record_miss(&original);
                    self.summary.names_unmapped += 1;
                }
            }
        } else if let Some(confidence) = vertex.take_confidence() {
            vertex.set_name(format_confidence(confidence));
            self.summary.confidences_moved += 1;
        }
    }

    /// Returns the usage stats accumulated so far.
    pub fn stats(&self) -> &UsageStats {
        &self.stats
    }

    /// Returns the counters accumulated so far.
    pub fn summary(&self) -> &RelabelSummary {
        &self.summary
    }

    /// Consumes the engine and returns the accumulated stats.
    pub fn into_stats(self) -> UsageStats {
        self.stats
    }

    /// Consumes the engine and returns stats and counters.
    pub fn into_parts(self) -> (UsageStats, RelabelSummary) {
        (self.stats, self.summary)
    }
}

/// Formats a confidence as canonical decimal string, the shortest
/// representation that parses back to the same value (`0.95`, `100`).
///
/// The source text of the label is not kept: `100.0` becomes `100` and
/// `1e-7` becomes `0.0000001`. Exponent notation is never written.
pub fn format_confidence(confidence: f64) -> String {
    confidence.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(0.95), "0.95");
        assert_eq!(format_confidence(100.0), "100");
        assert_eq!(format_confidence(1e-7), "0.0000001");
    }
}
