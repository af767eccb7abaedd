//! End-of-run diagnostics over the [UsageStats] of a relabeling run.
//!
//! Output is grouped by class, in this order:
//! 1. Collisions (count > 1) are logged as warnings
//! 2. Single-use codes (count 1) are logged at debug level
//! 3. Unused codes (count 0) are written as `<code>,` lines to the
//!    diagnostics writer, ready to be pasted into a mapping file and completed

use crate::relabel::stats::UsageStats;
use std::io::{self, Write};
use tracing::{debug, info, warn};

/// Number of codes reported per class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub collisions: usize,
    pub single_use: usize,
    pub unused: usize,
}

/// Reports the classified usage of all codes in `stats`.
///
/// # Errors
/// Returns an I/O error if writing to `diagnostics` fails.
///
/// # Example
/// ```
/// use newick_relabel::relabel::{report, UsageStats};
///
/// let mut stats = UsageStats::new();
/// stats.record_hit("A");
/// stats.record_miss("X7");
///
/// let mut diagnostics = Vec::new();
/// let summary = report(&stats, &mut diagnostics).unwrap();
/// assert_eq!(String::from_utf8(diagnostics).unwrap(), "X7,\n");
/// assert_eq!(summary.single_use, 1);
/// ```
pub fn report<W: Write>(stats: &UsageStats, diagnostics: &mut W) -> io::Result<ReportSummary> {
    let mut summary = ReportSummary::default();

    for (code, count) in stats.collisions() {
        warn!(code, count, "mapped string {code:?} used {count} times");
        summary.collisions += 1;
    }

    for code in stats.single_use() {
        debug!(code, "mapped string {code:?} used once");
        summary.single_use += 1;
    }

    for code in stats.unused() {
        writeln!(diagnostics, "{code},")?;
        summary.unused += 1;
    }
    diagnostics.flush()?;

    info!(
        collisions = summary.collisions,
        single_use = summary.single_use,
        unused = summary.unused,
        "usage report done"
    );
    Ok(summary)
}
