//! Relabeling of tree vertices from a code → name mapping.
//!
//! * [MappingTable] - loads and validates the mapping file
//! * [RelabelEngine] - rewrites vertex names and moves confidences into names
//! * [UsageStats] - how often each code was relabeled during a run
//! * [report] - classifies the usage at the end of a run
//!
//! Data flows one way: the table is consulted per vertex, the engine owns
//! and fills the stats, and the report consumes them once.

pub mod engine;
pub mod mapping;
pub mod report;
pub mod stats;

pub use engine::{RelabelEngine, RelabelSummary, format_confidence};
pub use mapping::{LoadStats, MappingError, MappingTable};
pub use report::{ReportSummary, report};
pub use stats::{UsageClass, UsageStats};
