//! Per-code usage counts collected during a relabeling run.

use crate::relabel::mapping::MappingTable;
use indexmap::IndexMap;

// =#========================================================================#=
// USAGE CLASS
// =#========================================================================#=
/// Classification of a code by how often it was relabeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageClass {
    /// Count 0: never relabeled, either an observed name without
    /// mapping or (if seeded) a table code never observed
    Unused,
    /// Count 1: relabeled exactly once
    SingleUse,
    /// Count > 1: the same mapped name appears several times
    Collision(usize),
}

impl UsageClass {
    /// Classifies a hit count.
    pub fn of(count: usize) -> Self {
        match count {
            0 => UsageClass::Unused,
            1 => UsageClass::SingleUse,
            n => UsageClass::Collision(n),
        }
    }
}

// =#========================================================================#=
// USAGE STATS
// =#========================================================================#=
/// Code → hit count, scoped to one run over all input trees.
///
/// A code with count 0 was seen (or seeded) but never relabeled, which is
/// different from a code that is absent altogether. Codes keep the order in
/// which they were first registered, so reports are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageStats {
    counts: IndexMap<String, usize>,
}

impl UsageStats {
    /// Creates empty stats; only observed names will be registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates stats with every code of `table` registered at 0, so that
    /// codes never found in any tree are reported as unused.
    pub fn seeded(table: &MappingTable) -> Self {
        UsageStats {
            counts: table.codes().map(|code| (code.to_string(), 0)).collect(),
        }
    }

    /// Records that `code` was found and relabeled.
    pub fn record_hit(&mut self, code: &str) {
        *self.counts.entry(code.to_string()).or_insert(0) += 1;
    }

    /// Records that `code` was found but has no mapping.
    pub fn record_miss(&mut self, code: &str) {
        self.counts.entry(code.to_string()).or_insert(0);
    }

    /// Returns the hit count of `code`, or `None` if it was never registered.
    pub fn count(&self, code: &str) -> Option<usize> {
        self.counts.get(code).copied()
    }

    /// Returns the classification of `code`, or `None` if it was never registered.
    pub fn classify(&self, code: &str) -> Option<UsageClass> {
        self.count(code).map(UsageClass::of)
    }

    /// Returns the number of registered codes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no code is registered.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns all `(code, count)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(code, &count)| (code.as_str(), count))
    }

    /// Returns `(code, count)` of all codes used more than once.
    pub fn collisions(&self) -> impl Iterator<Item = (&str, usize)> {
        self.iter().filter(|&(_, count)| count > 1)
    }

    /// Returns all codes used exactly once.
    pub fn single_use(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|&(_, count)| count == 1).map(|(code, _)| code)
    }

    /// Returns all codes never relabeled.
    pub fn unused(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|&(_, count)| count == 0).map(|(code, _)| code)
    }
}
