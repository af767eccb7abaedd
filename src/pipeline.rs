//! Drives a full relabeling run.
//!
//! load mapping → parse trees → relabel every tree → report usage → write trees
//!
//! All input is consumed before anything is written: if the mapping or the
//! tree file cannot be read or parsed, the output stays untouched.

use crate::error::{RelabelError, RelabelResult};
use crate::model::Tree;
use crate::newick::{NewickParser, write_newick};
use crate::parser::ByteParser;
use crate::relabel::{
    MappingTable, RelabelEngine, RelabelSummary, ReportSummary, UsageStats, report,
};
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

// =#========================================================================#=
// OPTIONS
// =#========================================================================#=
/// Configuration of a relabeling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelabelOptions {
    /// Read unquoted numeric labels of internal vertices as confidences
    pub confidence_labels: bool,
    /// Also report mapping codes that never occur in any tree as unused;
    /// otherwise only observed names without mapping are
    pub report_unused_table_codes: bool,
}

impl Default for RelabelOptions {
    fn default() -> Self {
        RelabelOptions {
            confidence_labels: true,
            report_unused_table_codes: true,
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub mapping_entries: usize,
    pub trees: usize,
    pub relabel: RelabelSummary,
    pub report: ReportSummary,
}

// =#========================================================================#=
// RUN
// =#========================================================================#=
/// Relabels all trees of the Newick file at `trees_path` with the mapping
/// file at `mapping_path`.
///
/// Relabeled trees are written to `out`, one per line. Unused codes are
/// written to `diagnostics`, everything else advisory goes to the log.
///
/// # Errors
/// Returns a [RelabelError] if a file cannot be read, the trees cannot be
/// parsed, or writing fails.
#[instrument(skip_all, fields(trees = %trees_path.display(), mapping = %mapping_path.display()))]
pub fn run<W: Write, D: Write>(
    trees_path: &Path,
    mapping_path: &Path,
    out: &mut W,
    diagnostics: &mut D,
    options: &RelabelOptions,
) -> RelabelResult<RunSummary> {
    let table = MappingTable::from_file(mapping_path)?;

    let trees = ByteParser::from_file(trees_path)
        .and_then(|byte_parser| {
            NewickParser::new()
                .with_confidence_labels(options.confidence_labels)
                .parse_all(byte_parser)
        })
        .map_err(|source| RelabelError::Parsing {
            path: trees_path.to_path_buf(),
            source,
        })?;

    run_loaded(&table, trees, out, diagnostics, options)
}

/// Relabels already loaded trees, reports usage and writes the trees.
///
/// # Errors
/// Returns a [RelabelError] if writing diagnostics or trees fails.
pub fn run_loaded<W: Write, D: Write>(
    table: &MappingTable,
    mut trees: Vec<Tree>,
    out: &mut W,
    diagnostics: &mut D,
    options: &RelabelOptions,
) -> RelabelResult<RunSummary> {
    let (stats, relabel_summary) = relabel_all(table, &mut trees, options);

    let report_summary = report(&stats, diagnostics).map_err(RelabelError::Diagnostics)?;

    // Serialize completely first, so `out` gets all trees or nothing
    let mut buffer = Vec::new();
    write_newick(&mut buffer, &trees).map_err(RelabelError::Output)?;
    out.write_all(&buffer).map_err(RelabelError::Output)?;
    out.flush().map_err(RelabelError::Output)?;

    let summary = RunSummary {
        mapping_entries: table.len(),
        trees: trees.len(),
        relabel: relabel_summary,
        report: report_summary,
    };
    info!(
        trees = summary.trees,
        mapped = summary.relabel.names_mapped,
        unmapped = summary.relabel.names_unmapped,
        confidences_moved = summary.relabel.confidences_moved,
        anomalies = summary.relabel.anomalies,
        "relabeling done"
    );
    Ok(summary)
}

/// Relabels all trees with a fresh [UsageStats] accumulator.
pub fn relabel_all(
    table: &MappingTable,
    trees: &mut [Tree],
    options: &RelabelOptions,
) -> (UsageStats, RelabelSummary) {
    let stats = if options.report_unused_table_codes {
        UsageStats::seeded(table)
    } else {
        UsageStats::new()
    };

    let mut engine = RelabelEngine::with_stats(table, stats);
    engine.relabel_trees(trees);
    engine.into_parts()
}
